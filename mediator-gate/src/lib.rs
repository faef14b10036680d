pub mod gate;
pub mod pipeline;
pub mod registry;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use types::*;

// Re-export the gate and its pipeline seams
pub use gate::ValidationGate;
pub use pipeline::{GateResponse, Next, PipelineBehavior};
pub use registry::ValidatorRegistry;

// Re-export validation functionality
pub use validation::{
    Cancelled, CompositeValidator, ErrorKind, FnValidator, PipelineError, PipelineResult,
    ValidationFailure, Validator,
};

// Hosts need the token type to call the gate
pub use tokio_util::sync::CancellationToken;
