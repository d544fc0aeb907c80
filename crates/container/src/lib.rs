pub mod config;
pub mod container;
pub mod errors;
pub mod providers;

// Re-export key types for convenience
pub use config::{ConfigError, ConfigSource, ContainerConfig};
pub use container::{
    Argument, CallTarget, Callable, ClassCatalog, ClassDescriptor, ClassKind, Concrete, Container,
    DefaultContainer, DependencyKind, Injectable, Instance, Introspector, MethodDescriptor,
    Parameters, ParameterSpec, ResolvedArguments,
};
pub use errors::ContainerError;
pub use providers::{ProviderError, ProviderRegistry, ServiceProvider};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get crate version
pub fn version() -> &'static str {
    VERSION
}
