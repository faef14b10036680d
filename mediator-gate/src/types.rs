use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A request flowing through a mediator pipeline.
///
/// Each request type names the response its handler produces. The pipeline
/// hands requests to behaviors by value; behaviors only ever borrow them.
pub trait Request: Send + Sync + 'static {
    type Response: Send + 'static;
}

/// A single rule violation reported by a validator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of evaluating a rule set against a request.
///
/// An outcome with no errors is valid. Errors keep the order in which the
/// rule set reported them; the same field may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    errors: Vec<FieldError>,
}

impl ValidationOutcome {
    /// An outcome with no rule violations
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Record a violation for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Append every error of `other` after the ones already recorded
    pub fn extend(&mut self, other: ValidationOutcome) {
        self.errors.extend(other.errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl From<Vec<FieldError>> for ValidationOutcome {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::from_errors(errors)
    }
}

impl FromIterator<FieldError> for ValidationOutcome {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self::from_errors(iter.into_iter().collect())
    }
}

/// Configuration for a [`crate::ValidationGate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Label used in log lines emitted by the gate
    pub name: String,
    /// Log short-circuited requests at warn level instead of debug
    pub log_failures: bool,
    /// Include every `field: message` pair in the short-circuit log line
    pub log_field_errors: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            name: "validation".to_string(),
            log_failures: true,
            log_field_errors: false,
        }
    }
}

impl GateConfig {
    /// Parse and validate a configuration from its JSON form
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GateConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Gate name cannot be empty".to_string(),
            ));
        }

        if self.name.chars().any(char::is_control) {
            return Err(ConfigError::Invalid(
                "Gate name cannot contain control characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid gate configuration: {0}\n💡 Gate names must be non-empty printable labels, e.g. \"validation\"")]
    Invalid(String),

    #[error("Failed to parse gate configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
