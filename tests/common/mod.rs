#![allow(dead_code)]

use async_trait::async_trait;
use mediator_gate::{
    CancellationToken, FieldError, FnValidator, Next, PipelineBehavior, PipelineError,
    PipelineResult, Request, ValidationGate, ValidationOutcome, Validator, ValidatorRegistry,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Test utilities and common setup functions

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

impl Request for CreateUser {
    type Response = PipelineResult<UserCreated>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreated {
    pub name: String,
}

/// Request type that never gets a validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub payload: String,
}

impl Request for Ping {
    type Response = PipelineResult<String>;
}

/// Async rule set that checks uniqueness against an external store
pub struct UniqueEmailValidator {
    taken: Arc<HashSet<String>>,
    lookup_delay: Duration,
}

impl UniqueEmailValidator {
    pub fn new(taken: &[&str]) -> Self {
        Self {
            taken: Arc::new(taken.iter().map(|e| e.to_string()).collect()),
            lookup_delay: Duration::from_millis(5),
        }
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }
}

#[async_trait]
impl Validator<CreateUser> for UniqueEmailValidator {
    async fn validate(&self, request: &CreateUser, _cancel: &CancellationToken) -> ValidationOutcome {
        tokio::time::sleep(self.lookup_delay).await;

        let mut outcome = ValidationOutcome::valid();
        if self.taken.contains(&request.email) {
            outcome.push("email", "is already registered");
        }
        outcome
    }
}

/// Counts how many times the downstream handler ran
#[derive(Debug, Clone, Default)]
pub struct HandlerSpy {
    calls: Arc<AtomicUsize>,
}

impl HandlerSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Continuation standing in for the `CreateUser` handler
    pub fn create_user(&self, request: &CreateUser) -> Next<PipelineResult<UserCreated>> {
        let calls = Arc::clone(&self.calls);
        let name = request.name.clone();
        Next::new(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(UserCreated { name })
        })
    }

    /// Continuation standing in for the `Ping` handler
    pub fn ping(&self, request: &Ping) -> Next<PipelineResult<String>> {
        let calls = Arc::clone(&self.calls);
        let payload = request.payload.clone();
        Next::new(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("pong: {}", payload))
        })
    }

    /// Continuation for a handler that fails on its own
    pub fn failing<T: Send + 'static>(&self, message: &str) -> Next<PipelineResult<T>> {
        let calls = Arc::clone(&self.calls);
        let message = message.to_string();
        Next::new(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(PipelineError::handler(message))
        })
    }
}

pub struct TestHelper;

impl TestHelper {
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    pub fn create_user(name: &str, email: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Synchronous shape rules for `CreateUser`
    pub fn user_shape_rules() -> FnValidator<CreateUser> {
        FnValidator::new(|request: &CreateUser| {
            let mut outcome = ValidationOutcome::valid();
            if request.name.is_empty() {
                outcome.push("name", "must not be empty");
            }
            if !request.email.contains('@') {
                outcome.push("email", "must be an email address");
            }
            outcome
        })
    }

    /// Rule set that reports exactly the given errors for every request
    pub fn fixed_rules<R>(errors: Vec<FieldError>) -> FnValidator<R>
    where
        R: Send + Sync + 'static,
    {
        FnValidator::new(move |_: &R| ValidationOutcome::from_errors(errors.clone()))
    }

    /// Registry as a host would assemble it at startup
    pub fn registry() -> ValidatorRegistry {
        let mut registry = ValidatorRegistry::new();
        registry.register::<CreateUser, _>(Self::user_shape_rules());
        registry
    }

    /// Run a request through a gate the way a host pipeline would
    pub async fn dispatch<R>(gate: &ValidationGate<R>, request: R, next: Next<R::Response>) -> R::Response
    where
        R: Request,
        R::Response: mediator_gate::GateResponse,
    {
        gate.handle(request, next, CancellationToken::new()).await
    }
}
