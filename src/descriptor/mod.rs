//! Serializable machine descriptors.
//!
//! A [`MachineDescriptor`] is the data form of a definition, for machines
//! whose shape comes from configuration rather than code. Guards cannot be
//! serialized, so transitions refer to them by method name and the names
//! are resolved against a [`GuardTable`] when the definition is built.
//!
//! Unlike the builder, descriptor validation does not stop at the first
//! mistake: every violation in the document is collected and reported.
//!
//! # Example
//!
//! ```rust
//! use statewise::descriptor::MachineDescriptor;
//! use statewise::core::GuardTable;
//! use statewise::registry::Definition;
//!
//! let descriptor = MachineDescriptor::from_json(r#"{
//!     "states": [
//!         { "name": "standing", "initial": true },
//!         { "name": "walking" }
//!     ],
//!     "events": [
//!         { "name": "walk", "transitions": [{ "from": "standing", "to": "walking" }] },
//!         { "name": "hold", "transitions": [{ "from": ["walking"], "to": "standing" }] }
//!     ]
//! }"#).unwrap();
//!
//! let definition = Definition::<()>::from_descriptor(&descriptor, GuardTable::new()).unwrap();
//! assert_eq!(definition.events().len(), 2);
//! ```

pub mod error;

pub use error::DescriptorError;

use crate::builder::DefinitionBuilder;
use crate::core::{GuardSpec, GuardTable, Symbol};
use crate::registry::{Definition, DefinitionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionError>>;

/// Data form of a machine definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineDescriptor {
    #[serde(default)]
    pub states: Vec<StateDescriptor>,

    #[serde(default)]
    pub events: Vec<EventDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDescriptor {
    pub name: String,

    #[serde(default)]
    pub initial: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub name: String,

    #[serde(default)]
    pub transitions: Vec<TransitionDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionDescriptor {
    pub from: Sources,

    pub to: String,

    /// Name of a guard method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

/// One source state or a list of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sources {
    One(String),
    Many(Vec<String>),
}

impl Sources {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Sources::One(name) => std::slice::from_ref(name),
            Sources::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl MachineDescriptor {
    pub fn from_json(input: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Check the whole descriptor, accumulating ALL violations.
    ///
    /// `guards` is the table that `when` method names must resolve in.
    pub fn validate<H>(&self, guards: &GuardTable<H>) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        let mut declared = HashSet::new();
        let mut initial: Option<Symbol> = None;
        for state in &self.states {
            checks.push(check(declare_state(state, &mut declared, &mut initial)));
        }

        let mut events = HashSet::new();
        for event in &self.events {
            checks.push(check(declare_event(&event.name, &mut events)));

            let mut pairs = HashSet::new();
            for transition in &event.transitions {
                if let Some(method) = &transition.when {
                    if !guards.contains(method) {
                        checks.push(Validation::fail(DefinitionError::InvalidGuardType {
                            guard: method.clone(),
                        }));
                    }
                }

                let to = match target_state(&transition.to, &declared) {
                    Ok(to) => to,
                    Err(e) => {
                        checks.push(Validation::fail(e));
                        continue;
                    }
                };
                for from in transition.from.iter() {
                    checks.push(check(declare_transition(from, &to, &declared, &mut pairs)));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

fn check(result: Result<(), DefinitionError>) -> Check {
    match result {
        Ok(()) => Validation::success(()),
        Err(e) => Validation::fail(e),
    }
}

fn state_symbol(name: &str) -> Result<Symbol, DefinitionError> {
    Symbol::parse(name).map_err(|e| DefinitionError::InvalidStateValue { value: e.0 })
}

fn declare_state(
    state: &StateDescriptor,
    declared: &mut HashSet<Symbol>,
    initial: &mut Option<Symbol>,
) -> Result<(), DefinitionError> {
    let name = state_symbol(&state.name)?;
    if !declared.insert(name.clone()) {
        return Err(DefinitionError::DuplicateStateDefinition { state: name });
    }
    // A second initial state is still a declared state.
    if state.initial {
        if let Some(current) = initial {
            return Err(DefinitionError::DuplicateInitialState {
                current: current.clone(),
            });
        }
        *initial = Some(name);
    }
    Ok(())
}

fn declare_event(name: &str, events: &mut HashSet<Symbol>) -> Result<(), DefinitionError> {
    let name = Symbol::parse(name).map_err(|e| DefinitionError::InvalidEventName { value: e.0 })?;
    if !events.insert(name.clone()) {
        return Err(DefinitionError::DuplicateEventDefinition { event: name });
    }
    Ok(())
}

fn target_state(name: &str, declared: &HashSet<Symbol>) -> Result<Symbol, DefinitionError> {
    let to = state_symbol(name)?;
    if !declared.contains(&to) {
        return Err(DefinitionError::UndefinedState { state: to });
    }
    Ok(to)
}

fn declare_transition(
    from: &str,
    to: &Symbol,
    declared: &HashSet<Symbol>,
    pairs: &mut HashSet<(Symbol, Symbol)>,
) -> Result<(), DefinitionError> {
    let from = state_symbol(from)?;
    if !declared.contains(&from) {
        return Err(DefinitionError::UndefinedState { state: from });
    }
    if from == *to {
        return Err(DefinitionError::InvalidTransition { state: from });
    }
    if !pairs.insert((from.clone(), to.clone())) {
        return Err(DefinitionError::DuplicateTransition {
            from,
            to: to.clone(),
        });
    }
    Ok(())
}

impl<H> Definition<H> {
    /// Validate `descriptor` and build the definition it describes.
    ///
    /// `when` method names resolve against `guards`.
    pub fn from_descriptor(
        descriptor: &MachineDescriptor,
        guards: GuardTable<H>,
    ) -> Result<Arc<Self>, DescriptorError> {
        if let Validation::Failure(errors) = descriptor.validate(&guards) {
            return Err(DescriptorError::Invalid(errors.iter().cloned().collect()));
        }

        let mut builder = DefinitionBuilder::new().with_guards(guards);
        for state in &descriptor.states {
            builder = if state.initial {
                builder.initial(&state.name)?
            } else {
                builder.state(&state.name)?
            };
        }

        for event in &descriptor.events {
            builder = builder.event(&event.name, |mut e| {
                for transition in &event.transitions {
                    let guard = match &transition.when {
                        Some(method) => GuardSpec::<H>::method(method.clone()),
                        None => GuardSpec::Always,
                    };
                    e = e.transitions_when(transition.from.iter(), &transition.to, guard)?;
                }
                Ok(e)
            })?;
        }

        Ok(builder.build())
    }
}
