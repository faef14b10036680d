//! Closure-backed validators

use crate::types::ValidationOutcome;
use crate::validation::Validator;
use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;

/// Adapts a synchronous closure into a [`Validator`]
pub struct FnValidator<R> {
    rules: Box<dyn Fn(&R) -> ValidationOutcome + Send + Sync>,
    _request: PhantomData<fn(&R)>,
}

impl<R> FnValidator<R> {
    pub fn new<F>(rules: F) -> Self
    where
        F: Fn(&R) -> ValidationOutcome + Send + Sync + 'static,
    {
        Self {
            rules: Box::new(rules),
            _request: PhantomData,
        }
    }
}

impl<R> fmt::Debug for FnValidator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

#[async_trait]
impl<R> Validator<R> for FnValidator<R>
where
    R: Send + Sync,
{
    async fn validate(&self, request: &R, _cancel: &CancellationToken) -> ValidationOutcome {
        (self.rules)(request)
    }
}
