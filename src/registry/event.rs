//! Events and the guarded transitions they are composed of.

use super::error::DefinitionError;
use super::state::StateRegistry;
use crate::core::{Guard, GuardError, Symbol};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// A directed edge between two registered states, optionally gated.
pub struct Transition<H> {
    pub from: Symbol,
    pub to: Symbol,
    pub guard: Option<Guard<H>>,
}

impl<H> Transition<H> {
    /// Check if this transition is eligible for `state` (no mutation).
    ///
    /// The guard is only evaluated when the source state matches.
    pub fn can_execute(&self, state: &Symbol, host: &H) -> Result<bool, GuardError> {
        if *state != self.from {
            return Ok(false);
        }

        match &self.guard {
            None => Ok(true),
            Some(guard) => {
                let allowed = guard.check(host)?;
                trace!(from = %self.from, to = %self.to, allowed, "evaluated guard");
                Ok(allowed)
            }
        }
    }
}

impl<H> Clone for Transition<H> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<H> fmt::Debug for Transition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// A named event: an ordered list of transitions, first declared first tried.
pub struct Event<H> {
    name: Symbol,
    transitions: Vec<Transition<H>>,
}

impl<H> Event<H> {
    pub fn new(name: Symbol) -> Self {
        Self {
            name,
            transitions: Vec::new(),
        }
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition<H>] {
        &self.transitions
    }

    /// Append a transition after checking it against `states` and the
    /// transitions already declared on this event.
    pub fn add_transition(
        &mut self,
        states: &StateRegistry,
        from: Symbol,
        to: Symbol,
        guard: Option<Guard<H>>,
    ) -> Result<(), DefinitionError> {
        states.require(&from)?;
        states.require(&to)?;

        if from == to {
            return Err(DefinitionError::InvalidTransition { state: from });
        }
        // Guards are not part of a transition's identity.
        if self.transitions.iter().any(|t| t.from == from && t.to == to) {
            return Err(DefinitionError::DuplicateTransition { from, to });
        }

        debug!(
            event = %self.name,
            from = %from,
            to = %to,
            guarded = guard.is_some(),
            "registered transition"
        );
        self.transitions.push(Transition { from, to, guard });
        Ok(())
    }

    /// First transition, in declaration order, that leaves `state` and
    /// whose guard allows it for `host`.
    pub fn find_matching_transition(
        &self,
        state: &Symbol,
        host: &H,
    ) -> Result<Option<&Transition<H>>, GuardError> {
        for transition in &self.transitions {
            if transition.can_execute(state, host)? {
                return Ok(Some(transition));
            }
        }
        Ok(None)
    }
}

impl<H> fmt::Debug for Event<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("transitions", &self.transitions)
            .finish()
    }
}

/// Named events of a definition, kept in declaration order.
pub struct EventRegistry<H> {
    events: Vec<Event<H>>,
    index: HashMap<Symbol, usize>,
}

impl<H> EventRegistry<H> {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn define(&mut self, event: Event<H>) -> Result<(), DefinitionError> {
        if self.index.contains_key(event.name()) {
            return Err(DefinitionError::DuplicateEventDefinition {
                event: event.name().clone(),
            });
        }

        debug!(
            event = %event.name(),
            transitions = event.transitions().len(),
            "registered event"
        );
        self.index.insert(event.name().clone(), self.events.len());
        self.events.push(event);
        Ok(())
    }

    pub fn contains(&self, name: &Symbol) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &Symbol) -> Option<&Event<H>> {
        self.index.get(name).map(|&i| &self.events[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event<H>> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<H> Default for EventRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for EventRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.events).finish()
    }
}
