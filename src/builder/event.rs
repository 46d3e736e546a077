//! Builder for the transitions of a single event.

use crate::registry::DefinitionError;
use crate::core::{AsSymbol, Guard, GuardSpec, GuardTable, Symbol};
use crate::registry::{Event, StateRegistry};

/// Collects the transitions of one event while it is being declared.
///
/// Handed to the closure passed to
/// [`DefinitionBuilder::event`](crate::builder::DefinitionBuilder::event).
/// Every transition is validated against the states declared so far.
pub struct EventBuilder<'a, H> {
    event: Event<H>,
    states: &'a StateRegistry,
    guards: &'a GuardTable<H>,
}

impl<'a, H> EventBuilder<'a, H> {
    pub(crate) fn new(
        name: Symbol,
        states: &'a StateRegistry,
        guards: &'a GuardTable<H>,
    ) -> Self {
        Self {
            event: Event::new(name),
            states,
            guards,
        }
    }

    /// Add an unguarded transition.
    pub fn transition(
        self,
        from: impl AsSymbol,
        to: impl AsSymbol,
    ) -> Result<Self, DefinitionError> {
        self.transitions_when([from], to, GuardSpec::<H>::Always)
    }

    /// Add one unguarded transition per source state, in the given order.
    pub fn transitions<I>(self, from: I, to: impl AsSymbol) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: AsSymbol,
    {
        self.transitions_when(from, to, GuardSpec::<H>::Always)
    }

    /// Add a transition gated by `guard`.
    pub fn transition_when(
        self,
        from: impl AsSymbol,
        to: impl AsSymbol,
        guard: impl Into<GuardSpec<H>>,
    ) -> Result<Self, DefinitionError> {
        self.transitions_when([from], to, guard)
    }

    /// Add one transition per source state, all gated by the same guard.
    pub fn transitions_when<I>(
        mut self,
        from: I,
        to: impl AsSymbol,
        guard: impl Into<GuardSpec<H>>,
    ) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: AsSymbol,
    {
        let to = state_symbol(&to)?;
        let guard = self.resolve(guard.into())?;

        for source in from {
            let source = state_symbol(&source)?;
            self.event
                .add_transition(self.states, source, to.clone(), guard.clone())?;
        }
        Ok(self)
    }

    fn resolve(&self, spec: GuardSpec<H>) -> Result<Option<Guard<H>>, DefinitionError> {
        match spec {
            GuardSpec::Always => Ok(None),
            GuardSpec::Predicate(guard) => Ok(Some(guard)),
            GuardSpec::Method(name) => match self.guards.get(&name) {
                Some(guard) => Ok(Some(guard.clone())),
                None => Err(DefinitionError::InvalidGuardType { guard: name }),
            },
        }
    }

    pub(crate) fn into_event(self) -> Event<H> {
        self.event
    }
}

fn state_symbol(name: &impl AsSymbol) -> Result<Symbol, DefinitionError> {
    name.to_symbol()
        .map_err(|e| DefinitionError::InvalidStateValue { value: e.0 })
}
