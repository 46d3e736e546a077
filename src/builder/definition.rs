//! Builder for constructing machine definitions.

use crate::registry::DefinitionError;
use crate::builder::event::EventBuilder;
use crate::core::{AsSymbol, Guard, GuardTable};
use crate::registry::{Definition, EventRegistry, StateRegistry};
use std::fmt;
use std::sync::Arc;

/// Builder for declaring states, named guards and events with a fluent API.
///
/// Each declaration is validated immediately; the first mistake is returned
/// and the definition is abandoned.
///
/// # Example
///
/// ```rust
/// use statewise::builder::DefinitionError;
/// use statewise::registry::Definition;
///
/// # fn main() -> Result<(), DefinitionError> {
/// let definition = Definition::<()>::builder()
///     .initial("standing")?
///     .state("walking")?
///     .state("running")?
///     .event("walk", |e| e.transition("standing", "walking"))?
///     .event("run", |e| e.transitions(["standing", "walking"], "running"))?
///     .event("hold", |e| e.transitions(["walking", "running"], "standing"))?
///     .build();
///
/// assert_eq!(definition.states().len(), 3);
/// assert_eq!(definition.initial().unwrap(), "standing");
/// # Ok(())
/// # }
/// ```
pub struct DefinitionBuilder<H> {
    states: StateRegistry,
    events: EventRegistry<H>,
    guards: GuardTable<H>,
}

impl<H> DefinitionBuilder<H> {
    pub fn new() -> Self {
        Self {
            states: StateRegistry::new(),
            events: EventRegistry::new(),
            guards: GuardTable::new(),
        }
    }

    /// Declare a state.
    pub fn state(mut self, name: impl AsSymbol) -> Result<Self, DefinitionError> {
        self.states.register(name, false)?;
        Ok(self)
    }

    /// Declare the initial state. Only one state may be initial.
    pub fn initial(mut self, name: impl AsSymbol) -> Result<Self, DefinitionError> {
        self.states.register(name, true)?;
        Ok(self)
    }

    /// Register a named guard that transitions can refer to with
    /// [`GuardSpec::method`](crate::core::GuardSpec::method).
    pub fn method(
        mut self,
        name: impl AsSymbol,
        guard: Guard<H>,
    ) -> Result<Self, DefinitionError> {
        if let Err(e) = self.guards.insert(name, guard) {
            return Err(DefinitionError::InvalidGuardType { guard: e.0 });
        }
        Ok(self)
    }

    /// Register every guard of `guards` as a named method.
    pub fn with_guards(mut self, guards: GuardTable<H>) -> Self {
        self.guards.extend(guards);
        self
    }

    /// Declare an event. `transitions` receives a fresh [`EventBuilder`]
    /// and returns it once all transitions are added.
    pub fn event<F>(
        mut self,
        name: impl AsSymbol,
        transitions: F,
    ) -> Result<Self, DefinitionError>
    where
        F: for<'a> FnOnce(EventBuilder<'a, H>) -> Result<EventBuilder<'a, H>, DefinitionError>,
    {
        let name = name
            .to_symbol()
            .map_err(|e| DefinitionError::InvalidEventName { value: e.0 })?;
        if self.events.contains(&name) {
            return Err(DefinitionError::DuplicateEventDefinition { event: name });
        }

        let builder = EventBuilder::new(name, &self.states, &self.guards);
        let event = transitions(builder)?.into_event();
        self.events.define(event)?;
        Ok(self)
    }

    /// Finish the definition. The result is shared by all instances.
    pub fn build(self) -> Arc<Definition<H>> {
        Arc::new(Definition {
            states: self.states,
            events: self.events,
        })
    }
}

impl<H> Default for DefinitionBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for DefinitionBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionBuilder")
            .field("states", &self.states)
            .field("events", &self.events)
            .field("guards", &self.guards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GuardSpec, Symbol};

    struct Walker {
        rested: bool,
    }

    fn sym(name: &str) -> Symbol {
        Symbol::parse(name).unwrap()
    }

    fn error_message(result: Result<DefinitionBuilder<()>, DefinitionError>) -> Option<String> {
        result.err().map(|e| e.to_string())
    }

    #[test]
    fn initial_state_cannot_be_defined_twice() {
        let result = DefinitionBuilder::new()
            .initial("standing")
            .and_then(|b| b.initial("walking"));

        assert_eq!(
            error_message(result).as_deref(),
            Some("Initial state is already set to standing")
        );
    }

    #[test]
    fn state_cannot_be_defined_twice() {
        let result = DefinitionBuilder::new()
            .state("standing")
            .and_then(|b| b.state("standing"));

        assert_eq!(
            error_message(result).as_deref(),
            Some("State :standing is already defined")
        );
    }

    #[test]
    fn state_must_be_an_identifier() {
        let result = DefinitionBuilder::new().state("standing still");

        assert_eq!(
            error_message(result).as_deref(),
            Some("State must be an identifier. Given: \"standing still\"")
        );
    }

    #[test]
    fn event_without_transitions_is_allowed() {
        let definition = DefinitionBuilder::<()>::new()
            .event("walk", |e| Ok(e))
            .unwrap()
            .build();

        assert!(definition.event(&sym("walk")).unwrap().transitions().is_empty());
    }

    #[test]
    fn event_name_must_be_an_identifier() {
        let result = DefinitionBuilder::<()>::new().event("walk!", |e| Ok(e));

        assert_eq!(
            result.err(),
            Some(DefinitionError::InvalidEventName {
                value: "walk!".to_string()
            })
        );
    }

    #[test]
    fn event_cannot_be_defined_twice() {
        let result = DefinitionBuilder::<()>::new()
            .event("walk", |e| Ok(e))
            .and_then(|b| b.event("walk", |e| Ok(e)));

        assert_eq!(
            result.err(),
            Some(DefinitionError::DuplicateEventDefinition { event: sym("walk") })
        );
    }

    #[test]
    fn transitions_require_defined_states() {
        let result = DefinitionBuilder::new()
            .event("event", |e| e.transition("standing", "walking"));
        assert_eq!(
            error_message(result).as_deref(),
            Some("State :standing is undefined")
        );

        let result = DefinitionBuilder::new()
            .state("standing")
            .and_then(|b| b.event("event", |e| e.transition("standing", "walking")));
        assert_eq!(
            error_message(result).as_deref(),
            Some("State :walking is undefined")
        );
    }

    #[test]
    fn transition_to_same_state_is_invalid() {
        let result = DefinitionBuilder::new()
            .state("standing")
            .and_then(|b| b.event("event", |e| e.transition("standing", "standing")));

        assert_eq!(
            error_message(result).as_deref(),
            Some("Transition :standing -> :standing is invalid")
        );
    }

    #[test]
    fn transition_cannot_be_defined_twice() {
        let result = DefinitionBuilder::new()
            .state("standing")
            .and_then(|b| b.state("walking"))
            .and_then(|b| {
                b.event("event", |e| {
                    e.transition("standing", "walking")?
                        .transition("standing", "walking")
                })
            });

        assert_eq!(
            error_message(result).as_deref(),
            Some("Transition is already defined :standing -> :walking")
        );
    }

    #[test]
    fn list_of_sources_expands_in_order() {
        let definition = DefinitionBuilder::<()>::new()
            .initial("standing")
            .and_then(|b| b.state("walking"))
            .and_then(|b| b.state("running"))
            .and_then(|b| {
                b.event("run", |e| e.transitions(["walking", "standing"], "running"))
            })
            .unwrap()
            .build();

        let run = definition.event(&sym("run")).unwrap();
        let sources: Vec<_> = run.transitions().iter().map(|t| t.from.as_str()).collect();
        assert_eq!(sources, ["walking", "standing"]);
    }

    #[test]
    fn invalid_source_in_list_is_reported() {
        let result = DefinitionBuilder::<()>::new()
            .state("standing")
            .and_then(|b| b.state("walking"))
            .and_then(|b| {
                b.event("walk", |e| {
                    e.transitions(["standing", "sitting down"], "walking")
                })
            });

        assert_eq!(
            result.err(),
            Some(DefinitionError::InvalidStateValue {
                value: "sitting down".to_string()
            })
        );
    }

    #[test]
    fn named_guards_resolve_against_registered_methods() {
        let definition = DefinitionBuilder::new()
            .initial("standing")
            .and_then(|b| b.state("walking"))
            .and_then(|b| b.method("rested", Guard::new(|w: &Walker| w.rested)))
            .and_then(|b| {
                b.event("walk", |e| {
                    e.transition_when("standing", "walking", GuardSpec::method("rested"))
                })
            })
            .unwrap()
            .build();

        let walk = definition.event(&sym("walk")).unwrap();
        let guard = walk.transitions()[0].guard.as_ref().unwrap();
        assert!(guard.check(&Walker { rested: true }).unwrap());
        assert!(!guard.check(&Walker { rested: false }).unwrap());
    }

    #[test]
    fn unknown_named_guard_is_rejected() {
        let result = DefinitionBuilder::<Walker>::new()
            .initial("standing")
            .and_then(|b| b.state("walking"))
            .and_then(|b| {
                b.event("walk", |e| {
                    e.transition_when("standing", "walking", GuardSpec::method("rested"))
                })
            });

        assert_eq!(
            result.err(),
            Some(DefinitionError::InvalidGuardType {
                guard: "rested".to_string()
            })
        );
    }

    #[test]
    fn method_name_must_be_an_identifier() {
        let result =
            DefinitionBuilder::new().method("rested?", Guard::new(|w: &Walker| w.rested));

        assert!(matches!(
            result,
            Err(DefinitionError::InvalidGuardType { guard }) if guard == "rested?"
        ));
    }

    #[test]
    fn guard_table_can_be_supplied_up_front() {
        let table = GuardTable::new()
            .register("rested", Guard::new(|w: &Walker| w.rested))
            .unwrap();

        let result = DefinitionBuilder::new()
            .with_guards(table)
            .initial("standing")
            .and_then(|b| b.state("walking"))
            .and_then(|b| {
                b.event("walk", |e| {
                    e.transition_when("standing", "walking", GuardSpec::method("rested"))
                })
            });

        assert!(result.is_ok());
    }

    #[test]
    fn failed_declaration_can_be_unwrapped_as_error() {
        let err = DefinitionBuilder::<()>::new()
            .initial("standing")
            .and_then(|b| b.state("standing"))
            .unwrap_err();

        assert_eq!(
            err,
            DefinitionError::DuplicateStateDefinition {
                state: sym("standing")
            }
        );
    }

    #[test]
    fn debug_lists_declared_states() {
        let builder = DefinitionBuilder::<()>::new()
            .initial("standing")
            .and_then(|b| b.state("walking"))
            .unwrap();

        let debug = format!("{builder:?}");
        assert!(debug.starts_with("DefinitionBuilder"));
        assert!(debug.contains(":walking"));
    }
}
