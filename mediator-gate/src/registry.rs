use crate::types::Request;
use crate::validation::Validator;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

struct Registration {
    request_type: &'static str,
    // Always an `Arc<dyn Validator<R>>` for the `R` whose `TypeId` keys it
    validator: Box<dyn Any + Send + Sync>,
}

/// Binds at most one validator to each concrete request type.
///
/// Lookups are by exact type: a validator registered for `A` is never used
/// for `B`, whatever the relationship between the two.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<TypeId, Registration>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `validator` to `R`, returning the validator it replaces
    pub fn register<R, V>(&mut self, validator: V) -> Option<Arc<dyn Validator<R>>>
    where
        R: Request,
        V: Validator<R> + 'static,
    {
        self.register_arc(Arc::new(validator))
    }

    /// Bind an already shared validator to `R`, returning the one it replaces
    pub fn register_arc<R>(
        &mut self,
        validator: Arc<dyn Validator<R>>,
    ) -> Option<Arc<dyn Validator<R>>>
    where
        R: Request,
    {
        let request_type = type_name::<R>();
        debug!("Registering validator for {}", request_type);

        let previous = self.validators.insert(
            TypeId::of::<R>(),
            Registration {
                request_type,
                validator: Box::new(validator),
            },
        );

        previous.and_then(|registration| Self::downcast::<R>(&registration))
    }

    /// Validator bound to `R`, if any
    pub fn resolve<R>(&self) -> Option<Arc<dyn Validator<R>>>
    where
        R: Request,
    {
        self.validators
            .get(&TypeId::of::<R>())
            .and_then(Self::downcast::<R>)
    }

    pub fn contains<R>(&self) -> bool
    where
        R: Request,
    {
        self.validators.contains_key(&TypeId::of::<R>())
    }

    /// Unbind the validator for `R`
    pub fn remove<R>(&mut self) -> Option<Arc<dyn Validator<R>>>
    where
        R: Request,
    {
        self.validators
            .remove(&TypeId::of::<R>())
            .and_then(|registration| Self::downcast::<R>(&registration))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of the request types that have a validator, sorted
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .validators
            .values()
            .map(|registration| registration.request_type)
            .collect();
        names.sort_unstable();
        names
    }

    fn downcast<R>(registration: &Registration) -> Option<Arc<dyn Validator<R>>>
    where
        R: Request,
    {
        registration
            .validator
            .downcast_ref::<Arc<dyn Validator<R>>>()
            .cloned()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("request_types", &self.registered_types())
            .finish()
    }
}
