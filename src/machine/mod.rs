//! Machine instances and event execution.
//!
//! A [`Machine`] pairs a shared definition with one host value and the
//! instance's current state. Events are triggered by name through a
//! uniform API:
//!
//! - [`Machine::is`] answers "is the current state X?"
//! - [`Machine::can_fire`] checks whether an event would succeed
//! - [`Machine::fire`] applies the first eligible transition
//!
//! Execution is synchronous and single-step: firing an event applies at
//! most one transition and never chains into another event.

mod error;
mod executor;
mod instance;

pub use error::MachineError;
pub use instance::{Host, Machine};
