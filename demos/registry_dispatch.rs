//! Registry driven dispatch
//!
//! Shows how a host pipeline binds validators per request type at startup
//! and resolves a gate for each request at dispatch time. `GetStatus` has
//! no validator and passes straight through.

use mediator_gate::{
    CancellationToken, CompositeValidator, FnValidator, GateConfig, Next, PipelineBehavior,
    PipelineResult, Request, ValidationGate, ValidationOutcome, ValidatorRegistry,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
struct PlaceOrder {
    sku: String,
    quantity: u32,
}

impl Request for PlaceOrder {
    type Response = PipelineResult<String>;
}

#[derive(Debug, Clone)]
struct GetStatus;

impl Request for GetStatus {
    type Response = PipelineResult<&'static str>;
}

fn order_rules() -> CompositeValidator<PlaceOrder> {
    CompositeValidator::new()
        .with(FnValidator::new(|order: &PlaceOrder| {
            let mut outcome = ValidationOutcome::valid();
            if order.sku.trim().is_empty() {
                outcome.push("sku", "must not be empty");
            }
            outcome
        }))
        .with(FnValidator::new(|order: &PlaceOrder| {
            let mut outcome = ValidationOutcome::valid();
            if order.quantity == 0 {
                outcome.push("quantity", "must be at least 1");
            }
            if order.quantity > 100 {
                outcome.push("quantity", "must be at most 100");
            }
            outcome
        }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut registry = ValidatorRegistry::new();
    registry.register::<PlaceOrder, _>(order_rules());
    let registry = Arc::new(registry);
    info!("Validators registered: {:?}", registry);

    let config = GateConfig::from_json(r#"{"name": "orders", "log_field_errors": true}"#)?;
    let orders = ValidationGate::<PlaceOrder>::from_registry(&registry).with_config(config);
    let status = ValidationGate::<GetStatus>::from_registry(&registry);

    for order in [
        PlaceOrder {
            sku: "A-100".to_string(),
            quantity: 3,
        },
        PlaceOrder {
            sku: " ".to_string(),
            quantity: 0,
        },
    ] {
        let sku = order.sku.clone();
        let next = Next::new(move || async move { Ok(format!("order for {} accepted", sku)) });
        match orders.handle(order, next, CancellationToken::new()).await {
            Ok(message) => info!("{}", message),
            Err(error) => warn!("{}", error),
        }
    }

    let next = Next::new(|| async { Ok("healthy") });
    let result = status.handle(GetStatus, next, CancellationToken::new()).await?;
    info!("Status: {}", result);

    Ok(())
}
