//! Machine instances.

use crate::core::{AsSymbol, StateHistory, Symbol, TransitionRecord};
use crate::machine::error::MachineError;
use crate::machine::executor;
use crate::registry::{Definition, Event};
use std::fmt;
use std::mem;
use std::sync::Arc;

/// Host object of a machine instance.
///
/// Guards are evaluated against the host, and the host is told about
/// every transition applied by an event.
pub trait Host {
    /// Called once after each successful [`Machine::fire`], with the new
    /// state already in place. Does nothing by default.
    fn state_changed(&mut self, event: &Symbol, from: &Symbol, to: &Symbol) {
        let _ = (event, from, to);
    }
}

impl Host for () {}

/// One instance of a defined machine: a current state plus its host.
///
/// The definition is shared; the state is private to the instance and
/// always a member of the definition's state registry.
///
/// # Example
///
/// ```rust
/// use statewise::machine::Machine;
/// use statewise::registry::Definition;
///
/// let definition = Definition::<()>::builder()
///     .initial("standing").unwrap()
///     .state("walking").unwrap()
///     .event("walk", |e| e.transition("standing", "walking")).unwrap()
///     .build();
///
/// let mut machine = Machine::new(definition, ()).unwrap();
/// assert!(machine.can_fire("walk").unwrap());
///
/// machine.fire("walk").unwrap();
/// assert!(machine.is("walking").unwrap());
/// assert!(!machine.can_fire("walk").unwrap());
/// ```
pub struct Machine<H> {
    definition: Arc<Definition<H>>,
    state: Symbol,
    host: H,
    history: StateHistory,
}

impl<H> Machine<H> {
    /// Create an instance in the definition's initial state.
    pub fn new(definition: Arc<Definition<H>>, host: H) -> Result<Self, MachineError> {
        let state = match definition.initial() {
            Some(initial) => initial.clone(),
            None => {
                return Err(MachineError::InvalidStateValue {
                    value: String::new(),
                })
            }
        };
        Self::with_state(definition, host, state)
    }

    /// Create an instance in an explicitly chosen state.
    pub fn with_state(
        definition: Arc<Definition<H>>,
        host: H,
        state: impl AsSymbol,
    ) -> Result<Self, MachineError> {
        let state = registered_state(&definition, &state)?;
        Ok(Self {
            definition,
            state,
            host,
            history: StateHistory::new(),
        })
    }

    pub fn state(&self) -> &Symbol {
        &self.state
    }

    /// Assign a state directly. No event is involved, so neither the
    /// history nor the host hook sees the change.
    pub fn set_state(&mut self, state: impl AsSymbol) -> Result<(), MachineError> {
        self.state = registered_state(&self.definition, &state)?;
        Ok(())
    }

    /// Whether the current state is `state`, which must be declared.
    pub fn is(&self, state: impl AsSymbol) -> Result<bool, MachineError> {
        let state = registered_state(&self.definition, &state)?;
        Ok(self.state == state)
    }

    /// Whether firing `event` now would succeed. Never changes the instance.
    pub fn can_fire(&self, event: impl AsSymbol) -> Result<bool, MachineError> {
        let event = lookup_event(&self.definition, &event)?;
        executor::can_execute(event, self.definition.states(), self)
    }

    /// Events that currently have an eligible transition, in declaration order.
    pub fn available_events(&self) -> Result<Vec<Symbol>, MachineError> {
        let mut available = Vec::new();
        for event in self.definition.events().iter() {
            if executor::can_execute(event, self.definition.states(), self)? {
                available.push(event.name().clone());
            }
        }
        Ok(available)
    }

    pub fn definition(&self) -> &Arc<Definition<H>> {
        &self.definition
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Hand the recorded history to the caller and start a fresh one.
    pub fn take_history(&mut self) -> StateHistory {
        mem::take(&mut self.history)
    }

    pub(crate) fn record(&mut self, event: Symbol, from: Symbol, to: Symbol) {
        self.history.record(TransitionRecord::now(event, from, to));
    }
}

impl<H: Host> Machine<H> {
    /// Trigger `event`: apply its first eligible transition and return the
    /// `(from, to)` pair.
    ///
    /// Fails with [`MachineError::NoMatchingTransition`] when no transition
    /// leaves the current state or every candidate's guard refuses; the
    /// instance is left untouched in that case.
    pub fn fire(&mut self, event: impl AsSymbol) -> Result<(Symbol, Symbol), MachineError> {
        let definition = Arc::clone(&self.definition);
        let event = lookup_event(&definition, &event)?;
        executor::execute(event, definition.states(), self)
    }
}

impl<H: fmt::Debug> fmt::Debug for Machine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state)
            .field("host", &self.host)
            .field("transitions", &self.history.len())
            .finish()
    }
}

fn registered_state<H>(
    definition: &Definition<H>,
    state: &impl AsSymbol,
) -> Result<Symbol, MachineError> {
    let state = state
        .to_symbol()
        .map_err(|e| MachineError::InvalidStateValue { value: e.0 })?;
    if !definition.states().contains(&state) {
        return Err(MachineError::UndefinedState { state });
    }
    Ok(state)
}

fn lookup_event<'d, H>(
    definition: &'d Definition<H>,
    event: &impl AsSymbol,
) -> Result<&'d Event<H>, MachineError> {
    let name = event
        .to_symbol()
        .map_err(|e| MachineError::UndefinedEvent { event: e.0 })?;
    definition
        .event(&name)
        .ok_or_else(|| MachineError::UndefinedEvent {
            event: name.to_string(),
        })
}
