//! Immutable machine definitions.
//!
//! A [`Definition`] is produced once by a [`DefinitionBuilder`] and then
//! shared (through `Arc`) by every instance of the machine. It holds the
//! state registry and the event registry; neither changes after `build()`.
//!
//! [`DefinitionBuilder`]: crate::builder::DefinitionBuilder

mod error;
mod event;
mod state;

pub use error::DefinitionError;
pub use event::{Event, EventRegistry, Transition};
pub use state::StateRegistry;

use crate::builder::DefinitionBuilder;
use crate::core::Symbol;
use std::fmt;

/// Shared descriptor of a machine: its states, initial state and events.
pub struct Definition<H> {
    pub(crate) states: StateRegistry,
    pub(crate) events: EventRegistry<H>,
}

impl<H> Definition<H> {
    /// Start declaring a new definition.
    pub fn builder() -> DefinitionBuilder<H> {
        DefinitionBuilder::new()
    }

    pub fn states(&self) -> &StateRegistry {
        &self.states
    }

    pub fn events(&self) -> &EventRegistry<H> {
        &self.events
    }

    pub fn initial(&self) -> Option<&Symbol> {
        self.states.initial()
    }

    pub fn event(&self, name: &Symbol) -> Option<&Event<H>> {
        self.events.get(name)
    }
}

impl<H> fmt::Debug for Definition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("states", &self.states)
            .field("events", &self.events)
            .finish()
    }
}
