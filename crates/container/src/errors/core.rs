use thiserror::Error;

/// Error type for every container operation
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Target [{target}] is not instantiable{}.", while_building(.build_stack))]
    NotInstantiable {
        target: String,
        build_stack: Vec<String>,
    },

    #[error("Unresolvable dependency resolving [${parameter}] in class {class}")]
    UnresolvablePrimitive { parameter: String, class: String },

    #[error("Method not provided for call target [{target}].")]
    MissingMethod { target: String },

    #[error("[{alias}] is aliased to itself.")]
    SelfAliased { alias: String },

    #[error("Circular dependency detected: {path} (cycle at: {cycle_service})")]
    CircularDependency { path: String, cycle_service: String },

    #[error("Maximum resolution depth of {depth} exceeded while resolving [{abstract_id}]")]
    ResolutionDepthExceeded { depth: usize, abstract_id: String },

    #[error("Method [{method}] does not exist on [{class}]")]
    MethodNotFound { class: String, method: String },

    #[error("Non-static method {class}::{method}() cannot be called statically")]
    NonStaticMethod { class: String, method: String },

    #[error("Function [{name}] does not exist")]
    FunctionNotFound { name: String },

    #[error("Argument #{index} requested but only {count} were supplied")]
    ArgumentMissing { index: usize, count: usize },

    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Lock error on resource: {resource}")]
    LockError { resource: String },

    #[error("Service initialization failed for '{service_type}': {source}")]
    ServiceInitializationFailed {
        service_type: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn while_building(build_stack: &[String]) -> String {
    if build_stack.is_empty() {
        String::new()
    } else {
        format!(" while building [{}]", build_stack.join(", "))
    }
}

impl ContainerError {
    /// Create a not-instantiable error carrying the active build chain
    pub fn not_instantiable(target: impl Into<String>, build_stack: Vec<String>) -> Self {
        Self::NotInstantiable {
            target: target.into(),
            build_stack,
        }
    }

    /// Create an unresolvable primitive error
    pub fn unresolvable_primitive(parameter: impl Into<String>, class: impl Into<String>) -> Self {
        Self::UnresolvablePrimitive {
            parameter: parameter.into(),
            class: class.into(),
        }
    }

    /// Wrap an error raised while constructing a service
    pub fn initialization_failed(
        service_type: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ServiceInitializationFailed {
            service_type: service_type.into(),
            source: source.into(),
        }
    }

    /// Check if the error is a not-instantiable error
    pub fn is_not_instantiable(&self) -> bool {
        matches!(self, Self::NotInstantiable { .. })
    }

    /// Check if the error is an unresolvable primitive error
    pub fn is_unresolvable_primitive(&self) -> bool {
        matches!(self, Self::UnresolvablePrimitive { .. })
    }

    /// Check if the error was caused by a dependency cycle
    pub fn is_circular(&self) -> bool {
        matches!(
            self,
            Self::CircularDependency { .. } | Self::ResolutionDepthExceeded { .. }
        )
    }
}
