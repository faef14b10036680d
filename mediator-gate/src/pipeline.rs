//! Seams between the gate and the host pipeline

use crate::types::Request;
use crate::validation::{Cancelled, ValidationFailure};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// The rest of the pipeline, as seen from a behavior.
///
/// Consumed on use, so a behavior can continue the pipeline at most once.
pub struct Next<T> {
    run: Box<dyn FnOnce() -> BoxFuture<'static, T> + Send>,
}

impl<T> Next<T>
where
    T: Send + 'static,
{
    pub fn new<F, Fut>(continuation: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            run: Box::new(move || continuation().boxed()),
        }
    }

    /// Continue the pipeline and wait for its result
    pub async fn run(self) -> T {
        (self.run)().await
    }
}

impl<T> fmt::Debug for Next<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// Response types able to carry the gate's own outcomes.
///
/// Any `Result<T, E>` whose error type converts from [`ValidationFailure`]
/// and [`Cancelled`] qualifies, so a gate over a response type without such
/// conversions is rejected at compile time.
pub trait GateResponse: Sized {
    fn from_validation_failure(failure: ValidationFailure) -> Self;

    fn from_cancellation(cancelled: Cancelled) -> Self;
}

impl<T, E> GateResponse for Result<T, E>
where
    E: From<ValidationFailure> + From<Cancelled>,
{
    fn from_validation_failure(failure: ValidationFailure) -> Self {
        Err(E::from(failure))
    }

    fn from_cancellation(cancelled: Cancelled) -> Self {
        Err(E::from(cancelled))
    }
}

/// Middleware stage of a mediator pipeline
#[async_trait]
pub trait PipelineBehavior<R>: Send + Sync
where
    R: Request,
{
    async fn handle(
        &self,
        request: R,
        next: Next<R::Response>,
        cancel: CancellationToken,
    ) -> R::Response;
}
