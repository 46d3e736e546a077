//! Errors raised while declaring a machine definition.
//!
//! Raised by the registries as states and transitions are added; the
//! builder re-exports them.

use crate::core::Symbol;
use thiserror::Error;

/// Errors that can occur when building a machine definition.
///
/// All of these indicate a mistake in the declaration itself; a definition
/// that fails to build cannot be used to construct instances.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("State must be an identifier. Given: {value:?}")]
    InvalidStateValue { value: String },

    #[error("State :{state} is already defined")]
    DuplicateStateDefinition { state: Symbol },

    #[error("Initial state is already set to {current}")]
    DuplicateInitialState { current: Symbol },

    #[error("State :{state} is undefined")]
    UndefinedState { state: Symbol },

    #[error("Transition :{state} -> :{state} is invalid")]
    InvalidTransition { state: Symbol },

    #[error("Transition is already defined :{from} -> :{to}")]
    DuplicateTransition { from: Symbol, to: Symbol },

    #[error("Event name must be an identifier. Given: {value:?}")]
    InvalidEventName { value: String },

    #[error("Event :{event} is already defined")]
    DuplicateEventDefinition { event: Symbol },

    #[error("Guard {guard:?} is neither a predicate nor a registered method")]
    InvalidGuardType { guard: String },
}
