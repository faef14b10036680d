//! Core validation traits and interfaces

use crate::types::ValidationOutcome;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Rule set bound to a single request type.
///
/// Evaluation may suspend, e.g. to check uniqueness against external state.
/// Implementations should watch `cancel` during long lookups; the gate drops
/// the evaluation future when the token fires regardless.
#[async_trait]
pub trait Validator<R>: Send + Sync {
    /// Evaluate every rule against `request`, reporting all violations
    async fn validate(&self, request: &R, cancel: &CancellationToken) -> ValidationOutcome;
}
