//! Statewise: a declarative finite-state-machine library
//!
//! A machine is declared once as a shared [`Definition`]: a set of named
//! states, exactly one initial state, and named events whose transitions
//! may be gated by guards. Any number of [`Machine`] instances can then be
//! created from the same definition, each with its own current state and
//! its own host value.
//!
//! # Core Concepts
//!
//! - **Definition**: Immutable states and events, validated while declared
//! - **Guards**: Predicates over the host that gate individual transitions
//! - **Machine**: Current state plus host, driven by firing events by name
//! - **Host hook**: [`Host::state_changed`] runs after every applied transition
//! - **Descriptors**: Definitions loaded from JSON with all violations reported
//!
//! # Example
//!
//! ```rust
//! use statewise::{Definition, Guard, Host, Machine, Symbol};
//!
//! #[derive(Default)]
//! struct Walker {
//!     rested: bool,
//!     log: Vec<String>,
//! }
//!
//! impl Host for Walker {
//!     fn state_changed(&mut self, event: &Symbol, from: &Symbol, to: &Symbol) {
//!         self.log.push(format!("{event}: {from} -> {to}"));
//!     }
//! }
//!
//! let definition = Definition::builder()
//!     .initial("standing").unwrap()
//!     .state("walking").unwrap()
//!     .state("running").unwrap()
//!     .event("walk", |e| {
//!         e.transition_when("standing", "walking", Guard::new(|w: &Walker| w.rested))
//!     }).unwrap()
//!     .event("run", |e| e.transitions(["standing", "walking"], "running")).unwrap()
//!     .event("hold", |e| e.transitions(["walking", "running"], "standing")).unwrap()
//!     .build();
//!
//! let mut walker = Machine::new(definition, Walker::default()).unwrap();
//! assert!(!walker.can_fire("walk").unwrap());
//!
//! walker.host_mut().rested = true;
//! walker.fire("walk").unwrap();
//! walker.fire("run").unwrap();
//!
//! assert!(walker.is("running").unwrap());
//! assert_eq!(walker.host().log, ["walk: standing -> walking", "run: walking -> running"]);
//! ```

pub mod builder;
pub mod core;
pub mod descriptor;
pub mod machine;
pub mod registry;

// Re-export commonly used types
pub use builder::{DefinitionBuilder, DefinitionError};
pub use core::{AsSymbol, Guard, GuardSpec, GuardTable, StateHistory, Symbol};
pub use descriptor::{DescriptorError, MachineDescriptor};
pub use machine::{Host, Machine, MachineError};
pub use registry::Definition;
