//! Registry of the states a definition declares.

use super::error::DefinitionError;
use crate::core::{AsSymbol, Symbol};
use std::collections::HashSet;
use tracing::debug;

/// Set of valid states plus the single optional initial state.
///
/// States are kept in declaration order for introspection; membership
/// checks go through a hash set.
#[derive(Clone, Debug, Default)]
pub struct StateRegistry {
    order: Vec<Symbol>,
    members: HashSet<Symbol>,
    initial: Option<Symbol>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state, optionally marking it as the initial state.
    ///
    /// Nothing is registered when an error is returned.
    pub fn register(
        &mut self,
        name: impl AsSymbol,
        initial: bool,
    ) -> Result<Symbol, DefinitionError> {
        let name = name
            .to_symbol()
            .map_err(|e| DefinitionError::InvalidStateValue { value: e.0 })?;

        if self.members.contains(&name) {
            return Err(DefinitionError::DuplicateStateDefinition { state: name });
        }
        if initial {
            if let Some(current) = &self.initial {
                return Err(DefinitionError::DuplicateInitialState {
                    current: current.clone(),
                });
            }
            self.initial = Some(name.clone());
        }

        self.members.insert(name.clone());
        self.order.push(name.clone());
        debug!(state = %name, initial, "registered state");
        Ok(name)
    }

    pub fn contains(&self, name: &Symbol) -> bool {
        self.members.contains(name)
    }

    /// Fail with `UndefinedState` unless `name` is registered.
    pub fn require(&self, name: &Symbol) -> Result<(), DefinitionError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(DefinitionError::UndefinedState {
                state: name.clone(),
            })
        }
    }

    pub fn initial(&self) -> Option<&Symbol> {
        self.initial.as_ref()
    }

    /// States in declaration order.
    pub fn states(&self) -> &[Symbol] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
