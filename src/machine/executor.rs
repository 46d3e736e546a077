//! Event execution: transition selection and application.

use crate::core::Symbol;
use crate::machine::error::MachineError;
use crate::machine::instance::{Host, Machine};
use crate::registry::{Event, StateRegistry};
use tracing::debug;

fn ensure_registered(states: &StateRegistry, state: &Symbol) -> Result<(), MachineError> {
    if states.contains(state) {
        Ok(())
    } else {
        Err(MachineError::UndefinedState {
            state: state.clone(),
        })
    }
}

/// Whether `event` has an eligible transition from the machine's current
/// state. Never mutates the machine.
pub(crate) fn can_execute<H>(
    event: &Event<H>,
    states: &StateRegistry,
    machine: &Machine<H>,
) -> Result<bool, MachineError> {
    ensure_registered(states, machine.state())?;
    let found = event.find_matching_transition(machine.state(), machine.host())?;
    Ok(found.is_some())
}

/// Apply the first eligible transition of `event`, then notify the host.
///
/// Nothing is mutated unless a transition matched.
pub(crate) fn execute<H: Host>(
    event: &Event<H>,
    states: &StateRegistry,
    machine: &mut Machine<H>,
) -> Result<(Symbol, Symbol), MachineError> {
    ensure_registered(states, machine.state())?;

    let found = event.find_matching_transition(machine.state(), machine.host())?;
    let Some(transition) = found else {
        debug!(event = %event.name(), state = %machine.state(), "no matching transition");
        return Err(MachineError::NoMatchingTransition {
            event: event.name().clone(),
            state: machine.state().clone(),
        });
    };

    let from = machine.state().clone();
    let to = transition.to.clone();
    machine.set_state(&to)?;
    machine.record(event.name().clone(), from.clone(), to.clone());
    debug!(event = %event.name(), from = %from, to = %to, "applied transition");

    machine.host_mut().state_changed(event.name(), &from, &to);
    Ok((from, to))
}
