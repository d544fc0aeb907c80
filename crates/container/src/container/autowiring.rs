use crate::container::arguments::ResolvedArguments;
use crate::container::descriptor::{Callable, ClassDescriptor, ParameterSpec};
use crate::container::instance::Instance;
use crate::errors::ContainerError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Trait for services that can be automatically constructed by the container
pub trait Injectable: Send + Sync + 'static {
    /// Identifier the class is registered and built under
    fn class_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Constructor parameters, in declaration order
    fn parameters() -> Vec<ParameterSpec> {
        Vec::new()
    }

    /// Interfaces this class satisfies, used to match type-scoped resolving callbacks
    fn implements() -> Vec<&'static str> {
        Vec::new()
    }

    /// Create an instance from the resolved constructor arguments
    fn create(args: ResolvedArguments) -> Result<Self, ContainerError>
    where
        Self: Sized;
}

impl ClassDescriptor {
    /// Describe an [`Injectable`] type
    pub fn injectable<T: Injectable>() -> Self {
        let descriptor = T::parameters().into_iter().fold(
            ClassDescriptor::concrete(T::class_name(), |args| T::create(args).map(Instance::new)),
            ClassDescriptor::param,
        );
        T::implements()
            .into_iter()
            .fold(descriptor, ClassDescriptor::implements)
    }
}

/// Reports constructor signatures for the types the container may build
///
/// Rust has no runtime reflection, so the host supplies this capability.
pub trait Introspector: Send + Sync {
    /// Describe a constructible target, or `None` if it is unknown
    fn describe(&self, target: &str) -> Option<ClassDescriptor>;

    /// Look up a free function by name
    fn function(&self, _name: &str) -> Option<Callable> {
        None
    }
}

/// Registration-time catalog of class descriptors and named functions
#[derive(Debug, Default)]
pub struct ClassCatalog {
    classes: RwLock<HashMap<String, ClassDescriptor>>,
    functions: RwLock<HashMap<String, Callable>>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&self, descriptor: ClassDescriptor) {
        let mut classes = self.classes.write().unwrap_or_else(PoisonError::into_inner);
        classes.insert(descriptor.name.clone(), descriptor);
    }

    pub fn declare_function(&self, name: impl Into<String>, callable: Callable) {
        let name = name.into();
        let callable = callable.named(name.clone());
        let mut functions = self.functions.write().unwrap_or_else(PoisonError::into_inner);
        functions.insert(name, callable);
    }

    pub fn contains(&self, target: &str) -> bool {
        let classes = self.classes.read().unwrap_or_else(PoisonError::into_inner);
        classes.contains_key(target)
    }

    pub fn len(&self) -> usize {
        let classes = self.classes.read().unwrap_or_else(PoisonError::into_inner);
        classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Introspector for ClassCatalog {
    fn describe(&self, target: &str) -> Option<ClassDescriptor> {
        let classes = self.classes.read().unwrap_or_else(PoisonError::into_inner);
        classes.get(target).cloned()
    }

    fn function(&self, name: &str) -> Option<Callable> {
        let functions = self.functions.read().unwrap_or_else(PoisonError::into_inner);
        functions.get(name).cloned()
    }
}
