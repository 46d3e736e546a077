//! Transition history tracking.
//!
//! Every machine instance keeps an ordered, in-memory log of the
//! transitions applied to it by its events.

use super::symbol::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Symbol, TransitionRecord};
///
/// let record = TransitionRecord::now(
///     Symbol::parse("walk").unwrap(),
///     Symbol::parse("standing").unwrap(),
///     Symbol::parse("walking").unwrap(),
/// );
/// assert_eq!(record.event, "walk");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The event that caused the transition
    pub event: Symbol,
    /// The state being transitioned from
    pub from: Symbol,
    /// The state being transitioned to
    pub to: Symbol,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn now(event: Symbol, from: Symbol, to: Symbol) -> Self {
        Self {
            event,
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use statewise::core::{StateHistory, Symbol, TransitionRecord};
///
/// let sym = |s: &str| Symbol::parse(s).unwrap();
///
/// let mut history = StateHistory::new();
/// history.record(TransitionRecord::now(sym("walk"), sym("standing"), sym("walking")));
/// history.record(TransitionRecord::now(sym("run"), sym("walking"), sym("running")));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // standing -> walking -> running
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: TransitionRecord) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the
    /// `to` state of each transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&Symbol> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time elapsed between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::parse(name).unwrap()
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(TransitionRecord::now(sym("walk"), sym("standing"), sym("walking")));
        history.record(TransitionRecord::now(sym("run"), sym("walking"), sym("running")));
        history.record(TransitionRecord::now(sym("hold"), sym("running"), sym("standing")));

        let path = history.get_path();
        assert_eq!(path, vec!["standing", "walking", "running", "standing"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        let start = Utc::now();

        history.record(TransitionRecord {
            event: sym("walk"),
            from: sym("standing"),
            to: sym("walking"),
            timestamp: start,
        });
        history.record(TransitionRecord {
            event: sym("run"),
            from: sym("walking"),
            to: sym("running"),
            timestamp: start + chrono::Duration::milliseconds(250),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(TransitionRecord::now(sym("walk"), sym("standing"), sym("walking")));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.record(TransitionRecord::now(sym("walk"), sym("standing"), sym("walking")));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
