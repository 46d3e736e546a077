//! Guard predicates for controlling transitions.
//!
//! A guard is a predicate over the host object of a machine. Transitions
//! carrying a guard are only eligible when the guard evaluates to `true`
//! against the instance being fired.

use super::symbol::{AsSymbol, InvalidIdentifier, Symbol};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Boxed error raised by a fallible guard.
///
/// The wrapped error is passed through to the caller of `fire`/`can_fire`
/// untouched; use [`GuardError::downcast_ref`] to recover it.
#[derive(Debug)]
pub struct GuardError(Box<dyn StdError + Send + Sync>);

impl GuardError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self(error.into())
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for GuardError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

type Predicate<H> = Arc<dyn Fn(&H) -> Result<bool, GuardError> + Send + Sync>;

/// Predicate evaluated against the host of a machine instance.
///
/// # Example
///
/// ```rust
/// use statewise::core::Guard;
///
/// struct Walker {
///     stamina: u32,
/// }
///
/// let rested = Guard::new(|w: &Walker| w.stamina > 10);
///
/// assert!(rested.check(&Walker { stamina: 20 }).unwrap());
/// assert!(!rested.check(&Walker { stamina: 5 }).unwrap());
/// ```
pub struct Guard<H> {
    predicate: Predicate<H>,
}

impl<H: 'static> Guard<H> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&H) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |host: &H| Ok::<bool, GuardError>(predicate(host))),
        }
    }

    /// Create a guard whose evaluation may fail.
    ///
    /// A failure aborts the trigger or feasibility check that evaluated
    /// the guard and is surfaced as-is.
    pub fn try_new<F, E>(predicate: F) -> Self
    where
        F: Fn(&H) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<Box<dyn StdError + Send + Sync>> + 'static,
    {
        Self {
            predicate: Arc::new(move |host: &H| predicate(host).map_err(GuardError::new)),
        }
    }
}

impl<H> Guard<H> {
    pub fn check(&self, host: &H) -> Result<bool, GuardError> {
        (self.predicate)(host)
    }
}

impl<H> Clone for Guard<H> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<H> fmt::Debug for Guard<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// How a transition is gated, as written at declaration time.
pub enum GuardSpec<H> {
    /// No guard; the transition is always eligible from its source state.
    Always,
    /// A predicate captured at declaration time.
    Predicate(Guard<H>),
    /// A named method looked up in the definition's [`GuardTable`].
    Method(String),
}

impl<H: 'static> GuardSpec<H> {
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&H) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Guard::new(predicate))
    }
}

impl<H> GuardSpec<H> {
    pub fn method(name: impl Into<String>) -> Self {
        Self::Method(name.into())
    }
}

impl<H> From<Guard<H>> for GuardSpec<H> {
    fn from(guard: Guard<H>) -> Self {
        Self::Predicate(guard)
    }
}

impl<H> fmt::Debug for GuardSpec<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Method(name) => f.debug_tuple("Method").field(name).finish(),
        }
    }
}

/// Named guards a definition can refer to by method name.
pub struct GuardTable<H> {
    guards: HashMap<Symbol, Guard<H>>,
}

impl<H> GuardTable<H> {
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
        }
    }

    /// Register a named guard. A later registration under the same name
    /// replaces the earlier one.
    pub fn register(
        mut self,
        name: impl AsSymbol,
        guard: Guard<H>,
    ) -> Result<Self, InvalidIdentifier> {
        self.insert(name, guard)?;
        Ok(self)
    }

    pub(crate) fn insert(
        &mut self,
        name: impl AsSymbol,
        guard: Guard<H>,
    ) -> Result<(), InvalidIdentifier> {
        let name = name.to_symbol()?;
        self.guards.insert(name, guard);
        Ok(())
    }

    pub(crate) fn extend(&mut self, other: GuardTable<H>) {
        self.guards.extend(other.guards);
    }

    /// Resolve a method name. Non-identifiers never resolve.
    pub fn get(&self, name: &str) -> Option<&Guard<H>> {
        let name = Symbol::parse(name).ok()?;
        self.guards.get(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl<H> Default for GuardTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    struct Runner {
        stamina: u32,
        injured: Option<&'static str>,
    }

    #[derive(Debug, Error)]
    #[error("runner is injured: {0}")]
    struct Injured(&'static str);

    #[derive(Debug, Error)]
    #[error("heart rate monitor failed")]
    struct MonitorFailed(#[source] std::io::Error);

    fn monitor_failure() -> GuardError {
        GuardError::new(MonitorFailed(std::io::Error::other("strap disconnected")))
    }

    #[test]
    fn guard_reads_host_fields() {
        let guard = Guard::new(|r: &Runner| r.stamina >= 10);

        let fresh = Runner {
            stamina: 12,
            injured: None,
        };
        let tired = Runner {
            stamina: 3,
            injured: None,
        };

        assert!(guard.check(&fresh).unwrap());
        assert!(!guard.check(&tired).unwrap());
    }

    #[test]
    fn fallible_guard_surfaces_predicate_error() {
        let guard = Guard::try_new(|r: &Runner| match r.injured {
            Some(part) => Err(Injured(part)),
            None => Ok(true),
        });

        let hurt = Runner {
            stamina: 12,
            injured: Some("ankle"),
        };

        let err = guard.check(&hurt).unwrap_err();
        assert_eq!(err.to_string(), "runner is injured: ankle");
        assert!(err.downcast_ref::<Injured>().is_some());
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|r: &Runner| r.stamina % 2 == 0);
        let runner = Runner {
            stamina: 4,
            injured: None,
        };

        assert_eq!(guard.check(&runner).unwrap(), guard.check(&runner).unwrap());
    }

    #[test]
    fn cloned_guards_share_predicate() {
        let guard = Guard::new(|r: &Runner| r.stamina > 0);
        let clone = guard.clone();
        let runner = Runner {
            stamina: 1,
            injured: None,
        };

        assert!(clone.check(&runner).unwrap());
    }

    #[test]
    fn table_resolves_registered_names() {
        let table = GuardTable::new()
            .register("rested", Guard::new(|r: &Runner| r.stamina > 5))
            .unwrap();

        assert!(table.contains("rested"));
        assert!(!table.contains("tired"));
        assert!(!table.contains("not a name"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn table_rejects_invalid_names() {
        let result = GuardTable::new().register("is rested?", Guard::new(|_: &Runner| true));

        assert!(matches!(result, Err(InvalidIdentifier(name)) if name == "is rested?"));
    }

    #[test]
    fn guard_error_displays_and_sources_like_wrapped_error() {
        let err = monitor_failure();

        assert_eq!(err.to_string(), "heart rate monitor failed");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("strap disconnected")
        );
        assert!(GuardError::new(Injured("knee")).source().is_none());
    }

    #[test]
    fn into_inner_returns_wrapped_error() {
        let inner = monitor_failure().into_inner();

        assert!(inner.downcast_ref::<MonitorFailed>().is_some());
        assert_eq!(inner.to_string(), "heart rate monitor failed");
    }
}
