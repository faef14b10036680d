//! Validation system for pipeline requests
//!
//! Rule sets implement [`Validator`] for exactly one request type. Several rule
//! sets can be folded into one with [`CompositeValidator`], and plain closures
//! become rule sets through [`FnValidator`].

pub mod composite_validator;
pub mod errors;
pub mod fn_validator;
pub mod traits;

// Re-export main validation types
pub use composite_validator::CompositeValidator;
pub use errors::{Cancelled, ErrorKind, PipelineError, PipelineResult, ValidationFailure};
pub use fn_validator::FnValidator;
pub use traits::Validator;
