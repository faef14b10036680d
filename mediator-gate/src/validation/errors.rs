//! Validation error types

use crate::types::{FieldError, ValidationOutcome};
use serde::Serialize;
use std::fmt;

/// Category of a pipeline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request rejected by its rule set
    Validation,
    /// Request abandoned because its cancellation signal fired
    Cancelled,
    /// Handler reported a failure
    Failure,
    /// Anything else
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Failure => "failure",
            ErrorKind::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// Rule violations that stopped a request before it reached its handler.
///
/// Always carries at least one [`FieldError`], in the order the rule set
/// reported them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename = "validation")]
#[error("Validation failed: {}", .errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// Turn an invalid outcome into a failure; `None` when the outcome is valid
    pub fn from_outcome(outcome: ValidationOutcome) -> Option<Self> {
        if outcome.is_valid() {
            None
        } else {
            Some(Self {
                errors: outcome.into_errors(),
            })
        }
    }

    /// Failure with a single field error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Client-facing JSON body: `{"kind": "validation", "errors": [...]}`
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Evaluation was abandoned because the request's cancellation signal fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Request cancelled before validation completed")]
pub struct Cancelled;

/// General purpose pipeline error for hosts without their own error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Create a handler error
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }

    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(_) => ErrorKind::Validation,
            PipelineError::Cancelled(_) => ErrorKind::Cancelled,
            PipelineError::Handler(_) => ErrorKind::Failure,
            PipelineError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Field errors when this is a validation error
    pub fn validation_errors(&self) -> Option<&[FieldError]> {
        match self {
            PipelineError::Validation(failure) => Some(failure.errors()),
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
