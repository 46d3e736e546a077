//! Core value types shared by definitions and instances.
//!
//! - Identifiers for states and events via [`Symbol`]
//! - Guard predicates evaluated against a machine's host
//! - In-memory history of applied transitions

mod guard;
mod history;
mod symbol;

pub use guard::{Guard, GuardError, GuardSpec, GuardTable};
pub use history::{StateHistory, TransitionRecord};
pub use symbol::{AsSymbol, InvalidIdentifier, Symbol};
