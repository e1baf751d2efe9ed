//! # Function Mapping Error Types
//!
//! Errors raised while declaring modification function overrides, applying
//! them onto an inferred function mapping, and loading declarative
//! definitions.
//!
//! ## Error Categories
//!
//! - **Declaration Errors**: blank names or malformed property paths handed to
//!   the configuration setters
//! - **Resolution Errors**: a declared override that does not correlate to
//!   exactly one target in the inferred mapping
//! - **Merge Errors**: two declarations for the same function that disagree
//! - **Definition Errors**: file I/O and parsing issues while loading YAML/JSON
//!
//! Every resolution error names the function it was raised against. When a
//! name override was applied earlier in the same `configure` call, that is the
//! renamed function name.

use thiserror::Error;

use super::property_path::{PropertyId, PropertyPath};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FunctionMappingError {
    #[error("Invalid argument `{argument}`: {reason}")]
    PreconditionViolation {
        argument: &'static str,
        reason: String,
    },
    #[error("Function `{function}` does not expose a rows affected parameter.")]
    MissingRowsAffectedParameter { function: String },
    #[error(
        "No unique modification function parameter found for property `{path}` on function `{function}` ({matches} candidate bindings)."
    )]
    AmbiguousOrMissingParameterBinding {
        path: PropertyPath,
        function: String,
        matches: usize,
    },
    #[error(
        "No original value parameter found for property `{path}` on function `{function}`. The property is only bound to a current value parameter."
    )]
    OriginalValueNotApplicable { path: PropertyPath, function: String },
    #[error("No result binding found for property `{property}` on function `{function}`.")]
    MissingResultBinding { property: PropertyId, function: String },
    #[error(
        "Property `{property}` is bound to {matches} result columns on function `{function}`; expected exactly one."
    )]
    AmbiguousResultBinding {
        property: PropertyId,
        function: String,
        matches: usize,
    },
    #[error("No {kind} function mapping was inferred for the declared {kind} configuration.")]
    MissingFunctionMapping { kind: String },
    #[error("Incompatible {kind} function configurations: {reason}")]
    IncompatibleConfigurations { kind: String, reason: String },
    #[error("Invalid property path `{path}`: segments must be non-empty")]
    InvalidPropertyPath { path: String },
    #[error("Failed to read definition file: {error}")]
    DefinitionRead { error: String },
    #[error("Failed to parse definition: {error}")]
    DefinitionParse { error: String },
}

/// Helper methods for creating errors with context information
impl FunctionMappingError {
    /// Create a precondition error for a blank string argument
    ///
    /// # Example
    /// ```ignore
    /// FunctionMappingError::blank_argument("name")
    /// ```
    pub fn blank_argument(argument: &'static str) -> Self {
        FunctionMappingError::PreconditionViolation {
            argument,
            reason: "value must not be empty or whitespace".to_string(),
        }
    }

    /// Create a definition parse error with context information
    ///
    /// # Example
    /// ```ignore
    /// FunctionMappingError::parse_error_with_context(
    ///     err,
    ///     "While loading functions.yaml"
    /// )
    /// ```
    pub fn parse_error_with_context(
        error: impl std::fmt::Display,
        context: impl Into<String>,
    ) -> Self {
        FunctionMappingError::DefinitionParse {
            error: format!("{}\n  Context: {}", error, context.into()),
        }
    }

    /// Create an incompatibility error for one function kind (insert/update/delete)
    pub fn incompatible(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        FunctionMappingError::IncompatibleConfigurations {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Reject empty and whitespace-only arguments.
pub(crate) fn ensure_not_blank(
    argument: &'static str,
    value: &str,
) -> Result<(), FunctionMappingError> {
    if value.trim().is_empty() {
        return Err(FunctionMappingError::blank_argument(argument));
    }
    Ok(())
}
