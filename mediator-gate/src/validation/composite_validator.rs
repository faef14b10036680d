//! Composite validator that folds several rule sets into one

use crate::types::ValidationOutcome;
use crate::validation::Validator;
use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Runs a list of validators as a single rule set.
///
/// Every child is evaluated, in insertion order, even after an earlier one
/// has reported violations. Their errors are concatenated in that same order,
/// so a request sees one batch of errors instead of the first failure only.
pub struct CompositeValidator<R> {
    validators: Vec<Box<dyn Validator<R>>>,
}

impl<R> CompositeValidator<R>
where
    R: Send + Sync,
{
    /// Create an empty composite; it accepts every request
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Create a composite from already boxed validators
    pub fn with_validators(validators: Vec<Box<dyn Validator<R>>>) -> Self {
        Self { validators }
    }

    /// Add a validator after the existing ones
    pub fn add_validator<V>(&mut self, validator: V)
    where
        V: Validator<R> + 'static,
    {
        self.validators.push(Box::new(validator));
    }

    /// Builder form of [`CompositeValidator::add_validator`]
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validator<R> + 'static,
    {
        self.add_validator(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<R> Default for CompositeValidator<R>
where
    R: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for CompositeValidator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeValidator")
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[async_trait]
impl<R> Validator<R> for CompositeValidator<R>
where
    R: Send + Sync,
{
    async fn validate(&self, request: &R, cancel: &CancellationToken) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();
        for validator in &self.validators {
            outcome.extend(validator.validate(request, cancel).await);
        }
        outcome
    }
}
