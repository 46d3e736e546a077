//! Descriptor loading errors.

use crate::registry::DefinitionError;
use thiserror::Error;

/// Errors that can occur when loading a definition from a descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The document is not a well-formed descriptor
    #[error("Failed to parse machine descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// The descriptor parsed but declares an invalid machine
    #[error("Invalid machine descriptor: {}", join(.0))]
    Invalid(Vec<DefinitionError>),
}

impl From<DefinitionError> for DescriptorError {
    fn from(error: DefinitionError) -> Self {
        Self::Invalid(vec![error])
    }
}

fn join(errors: &[DefinitionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
