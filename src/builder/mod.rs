//! Builder API for declaring machine definitions.
//!
//! A definition is declared once with [`DefinitionBuilder`]: states first,
//! then named guards and events. Each event's transitions are added through
//! an [`EventBuilder`] handed to a closure, and `build()` freezes the result
//! into a shared [`Definition`](crate::registry::Definition).

pub mod definition;
pub mod event;
pub mod macros;

pub use crate::registry::DefinitionError;
pub use definition::DefinitionBuilder;
pub use event::EventBuilder;
