use crate::pipeline::{GateResponse, Next, PipelineBehavior};
use crate::registry::ValidatorRegistry;
use crate::types::{GateConfig, Request};
use crate::validation::{Cancelled, ValidationFailure, Validator};
use async_trait::async_trait;
use std::any::type_name;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use ulid::Ulid;

/// Pipeline behavior that runs a request's rule set before its handler.
///
/// With no rule set bound the gate is a pass-through. Otherwise the request
/// is evaluated first; a valid request continues down the pipeline, an invalid
/// one is answered with a [`ValidationFailure`] and never reaches the handler.
pub struct ValidationGate<R>
where
    R: Request,
{
    validator: Option<Arc<dyn Validator<R>>>,
    config: GateConfig,
}

impl<R> ValidationGate<R>
where
    R: Request,
    R::Response: GateResponse,
{
    pub fn new(validator: Option<Arc<dyn Validator<R>>>) -> Self {
        Self {
            validator,
            config: GateConfig::default(),
        }
    }

    /// Gate with no rule set; every request is forwarded
    pub fn unvalidated() -> Self {
        Self::new(None)
    }

    pub fn with_validator<V>(validator: V) -> Self
    where
        V: Validator<R> + 'static,
    {
        Self::new(Some(Arc::new(validator)))
    }

    /// Gate using whatever validator `registry` binds to `R`
    pub fn from_registry(registry: &ValidatorRegistry) -> Self {
        Self::new(registry.resolve::<R>())
    }

    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Decide whether `request` continues down the pipeline.
    ///
    /// `next` is called at most once, and only after evaluation has completed
    /// with a valid outcome. If `cancel` fires while the rule set is still
    /// evaluating, evaluation is dropped and the cancellation is returned
    /// through the response type instead.
    pub async fn intercept<F, Fut>(
        &self,
        request: &R,
        next: F,
        cancel: &CancellationToken,
    ) -> R::Response
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R::Response>,
    {
        let request_type = type_name::<R>();

        let Some(validator) = &self.validator else {
            debug!(
                "[{}] No validator for {}, forwarding request",
                self.config.name, request_type
            );
            return next().await;
        };

        let intercept_id = Ulid::new();
        debug!(
            "[{}] Validating {} ({})",
            self.config.name, request_type, intercept_id
        );

        let outcome = tokio::select! {
            biased;
            outcome = validator.validate(request, cancel) => Some(outcome),
            _ = cancel.cancelled() => None,
        };

        let Some(outcome) = outcome else {
            info!(
                "[{}] Validation of {} cancelled ({})",
                self.config.name, request_type, intercept_id
            );
            return <R::Response as GateResponse>::from_cancellation(Cancelled);
        };

        match ValidationFailure::from_outcome(outcome) {
            None => {
                debug!(
                    "[{}] {} passed validation ({})",
                    self.config.name, request_type, intercept_id
                );
                next().await
            }
            Some(failure) => {
                self.log_failure(request_type, intercept_id, &failure);
                <R::Response as GateResponse>::from_validation_failure(failure)
            }
        }
    }

    fn log_failure(&self, request_type: &str, intercept_id: Ulid, failure: &ValidationFailure) {
        let details = if self.config.log_field_errors {
            format!(": {}", failure)
        } else {
            String::new()
        };

        if self.config.log_failures {
            warn!(
                "[{}] {} rejected with {} validation error(s) ({}){}",
                self.config.name,
                request_type,
                failure.errors().len(),
                intercept_id,
                details
            );
        } else {
            debug!(
                "[{}] {} rejected with {} validation error(s) ({}){}",
                self.config.name,
                request_type,
                failure.errors().len(),
                intercept_id,
                details
            );
        }
    }
}

impl<R> Clone for ValidationGate<R>
where
    R: Request,
{
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> fmt::Debug for ValidationGate<R>
where
    R: Request,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationGate")
            .field("request_type", &type_name::<R>())
            .field("has_validator", &self.validator.is_some())
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl<R> PipelineBehavior<R> for ValidationGate<R>
where
    R: Request,
    R::Response: GateResponse,
{
    async fn handle(
        &self,
        request: R,
        next: Next<R::Response>,
        cancel: CancellationToken,
    ) -> R::Response {
        self.intercept(&request, move || next.run(), &cancel).await
    }
}
