use crate::errors::ContainerError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Marker stored by [`Instance::null`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Null;

/// A resolved value held by the container
///
/// Cloning an `Instance` clones the handle, not the value, so two clones are
/// the same object as far as [`Instance::ptr_eq`] is concerned.
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    class: Option<Arc<str>>,
    satisfies: Arc<[String]>,
}

impl Instance {
    /// Wrap a value in a new shared handle
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an existing `Arc` without re-allocating
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
            class: None,
            satisfies: Arc::from(Vec::new()),
        }
    }

    /// The value used for optional dependencies that could not be resolved
    pub fn null() -> Self {
        Self::new(Null)
    }

    /// Declare additional identifiers (interfaces, parent classes) this value satisfies
    pub fn implementing<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut satisfies = self.satisfies.to_vec();
        satisfies.extend(identifiers.into_iter().map(Into::into));
        self.satisfies = Arc::from(satisfies);
        self
    }

    /// Stamp the class this value was built from
    pub(crate) fn with_class(mut self, class: &str, implements: &[String]) -> Self {
        self.class = Some(Arc::from(class));
        self.implementing(implements.iter().cloned())
    }

    /// The class name recorded when the container built this value
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// The Rust type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Name used for method binding keys and call-target lookups
    pub fn class_name(&self) -> &str {
        self.class().unwrap_or(self.type_name)
    }

    /// Whether this value answers to the given identifier
    pub fn satisfies(&self, identifier: &str) -> bool {
        self.class() == Some(identifier)
            || self.type_name == identifier
            || self.satisfies.iter().any(|s| s == identifier)
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn is_null(&self) -> bool {
        self.is::<Null>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>, ContainerError> {
        self.value
            .clone()
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                actual: self.type_name,
            })
    }

    /// Identity comparison: true when both handles point at the same value
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("class", &self.class)
            .field("satisfies", &self.satisfies)
            .finish()
    }
}
