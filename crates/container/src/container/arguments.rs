use crate::container::instance::Instance;
use crate::errors::ContainerError;
use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

/// A caller-supplied argument, either matched to a parameter by name or passed through positionally
#[derive(Debug, Clone)]
pub enum Argument {
    Named(String, Instance),
    Positional(Instance),
}

impl Argument {
    pub fn value(&self) -> &Instance {
        match self {
            Argument::Named(_, value) | Argument::Positional(value) => value,
        }
    }
}

/// Ordered overrides for `make_with` and explicit arguments for `call`
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    arguments: Vec<Argument>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named argument, replacing an earlier one with the same name
    pub fn with(mut self, name: impl Into<String>, value: Instance) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a named argument wrapping `value`
    pub fn with_value<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
        self.with(name, Instance::new(value))
    }

    /// Append a positional argument
    pub fn push(mut self, value: Instance) -> Self {
        self.arguments.push(Argument::Positional(value));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Instance) {
        let name = name.into();
        match self
            .arguments
            .iter_mut()
            .find(|a| matches!(a, Argument::Named(n, _) if *n == name))
        {
            Some(existing) => *existing = Argument::Named(name, value),
            None => self.arguments.push(Argument::Named(name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.arguments.iter().find_map(|a| match a {
            Argument::Named(n, value) if n == name => Some(value),
            _ => None,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter()
    }

    /// Values not consumed by a named parameter, in their original order
    pub fn unmatched(&self, consumed: &HashSet<&str>) -> Vec<Instance> {
        self.arguments
            .iter()
            .filter(|a| match a {
                Argument::Named(name, _) => !consumed.contains(name.as_str()),
                Argument::Positional(_) => true,
            })
            .map(|a| a.value().clone())
            .collect()
    }
}

impl FromIterator<Argument> for Parameters {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        let mut parameters = Parameters::new();
        for argument in iter {
            match argument {
                Argument::Named(name, value) => parameters.insert(name, value),
                positional => parameters.arguments.push(positional),
            }
        }
        parameters
    }
}

/// Arguments assembled by the container for a constructor or callable
#[derive(Debug, Clone, Default)]
pub struct ResolvedArguments {
    values: Vec<Instance>,
}

impl ResolvedArguments {
    pub fn new(values: Vec<Instance>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn instance(&self, index: usize) -> Result<&Instance, ContainerError> {
        self.values
            .get(index)
            .ok_or(ContainerError::ArgumentMissing {
                index,
                count: self.values.len(),
            })
    }

    /// Shared handle to the argument at `index`
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, ContainerError> {
        self.instance(index)?.downcast::<T>()
    }

    /// Owned copy of the argument at `index`
    pub fn value<T: Any + Send + Sync + Clone>(&self, index: usize) -> Result<T, ContainerError> {
        let instance = self.instance(index)?;
        instance
            .downcast_ref::<T>()
            .cloned()
            .ok_or(ContainerError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                actual: instance.type_name(),
            })
    }

    /// Optional dependency at `index`; `None` when the container substituted null
    pub fn optional<T: Any + Send + Sync>(
        &self,
        index: usize,
    ) -> Result<Option<Arc<T>>, ContainerError> {
        let instance = self.instance(index)?;
        if instance.is_null() {
            Ok(None)
        } else {
            instance.downcast::<T>().map(Some)
        }
    }

    /// Trailing arguments starting at `from`
    pub fn rest(&self, from: usize) -> &[Instance] {
        self.values.get(from..).unwrap_or(&[])
    }

    pub fn into_vec(self) -> Vec<Instance> {
        self.values
    }
}
