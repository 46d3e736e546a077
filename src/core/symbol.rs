//! Identifiers for states and events.
//!
//! State and event names are never free-form strings. Every name passes
//! through [`Symbol::parse`], which accepts only identifier-shaped values,
//! so a registry can never hold a name that could not also be spelled as
//! a predicate or trigger in host code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A value that is not an identifier was given where a name is required.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{0}` is not a valid identifier")]
pub struct InvalidIdentifier(pub String);

/// Opaque, comparable name of a state or an event.
///
/// Symbols are immutable and cheap to clone. They compare by value and
/// serialize as plain strings.
///
/// # Example
///
/// ```rust
/// use statewise::core::Symbol;
///
/// let walking = Symbol::parse("walking").unwrap();
/// assert_eq!(walking.as_str(), "walking");
///
/// assert!(Symbol::parse("not a symbol").is_err());
/// assert!(Symbol::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Parse an identifier (`[A-Za-z_][A-Za-z0-9_]*`) into a symbol.
    pub fn parse(value: &str) -> Result<Self, InvalidIdentifier> {
        if is_identifier(value) {
            Ok(Self(Arc::from(value)))
        } else {
            Err(InvalidIdentifier(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = InvalidIdentifier;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Symbol::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0.to_string()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Anything that can name a state or an event.
///
/// Strings are validated on conversion; [`Symbol`] and enums generated by
/// [`identifier_enum!`](crate::identifier_enum) convert without surprises.
pub trait AsSymbol {
    fn to_symbol(&self) -> Result<Symbol, InvalidIdentifier>;
}

impl AsSymbol for Symbol {
    fn to_symbol(&self) -> Result<Symbol, InvalidIdentifier> {
        Ok(self.clone())
    }
}

impl AsSymbol for str {
    fn to_symbol(&self) -> Result<Symbol, InvalidIdentifier> {
        Symbol::parse(self)
    }
}

impl AsSymbol for String {
    fn to_symbol(&self) -> Result<Symbol, InvalidIdentifier> {
        Symbol::parse(self)
    }
}

impl<T: AsSymbol + ?Sized> AsSymbol for &T {
    fn to_symbol(&self) -> Result<Symbol, InvalidIdentifier> {
        (**self).to_symbol()
    }
}
