//! Basic usage of the validation gate
//!
//! Builds a gate around a closure rule set and sends one valid and one
//! invalid request through it, printing what the caller gets back.

use mediator_gate::{
    CancellationToken, FnValidator, PipelineError, PipelineResult, Request, ValidationGate,
    ValidationOutcome,
};
use tracing::info;

#[derive(Debug, Clone)]
struct CreateUser {
    name: String,
}

impl Request for CreateUser {
    type Response = PipelineResult<u64>;
}

async fn create_user_handler(request: &CreateUser) -> PipelineResult<u64> {
    info!("Handler creating user {}", request.name);
    Ok(42)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let gate = ValidationGate::with_validator(FnValidator::new(|request: &CreateUser| {
        let mut outcome = ValidationOutcome::valid();
        if request.name.is_empty() {
            outcome.push("name", "must not be empty");
        }
        outcome
    }));
    let cancel = CancellationToken::new();

    for name in ["Alice", ""] {
        let request = CreateUser {
            name: name.to_string(),
        };

        match gate
            .intercept(&request, || create_user_handler(&request), &cancel)
            .await
        {
            Ok(id) => info!("Created user {:?} with id {}", request.name, id),
            Err(PipelineError::Validation(failure)) => {
                info!("Rejected: {}", serde_json::to_string_pretty(&failure.to_json()?)?)
            }
            Err(other) => return Err(other.into()),
        }
    }

    Ok(())
}
