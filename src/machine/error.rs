//! Errors raised by machine instances.

use crate::core::{GuardError, Symbol};
use thiserror::Error;

/// Errors that can occur while constructing or driving an instance.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("State must be an identifier. Given: {value:?}")]
    InvalidStateValue { value: String },

    #[error("State :{state} is undefined")]
    UndefinedState { state: Symbol },

    #[error("Event {event:?} is undefined")]
    UndefinedEvent { event: String },

    #[error("No transition for event :{event} from state :{state}")]
    NoMatchingTransition { event: Symbol, state: Symbol },

    /// A guard failed while being evaluated.
    #[error(transparent)]
    Guard(#[from] GuardError),
}
