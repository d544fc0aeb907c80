pub mod arguments;
pub mod autowiring;
pub mod binding;
pub mod bound_method;
pub mod contextual;
pub mod default;
pub mod descriptor;
pub mod instance;
pub mod ioc_container;
pub mod lifecycle;
pub mod registry;
pub mod resolver;

pub use arguments::{Argument, Parameters, ResolvedArguments};
pub use autowiring::{ClassCatalog, Injectable, Introspector};
pub use binding::{Binding, BindingRegistry, Concrete, Extender, Factory, MethodBinding};
pub use bound_method::CallTarget;
pub use contextual::{ContextualBindingBuilder, PendingContextualBinding};
pub use default::DefaultContainer;
pub use descriptor::{
    Callable, ClassDescriptor, ClassKind, Constructor, DependencyKind, FunctionBody, MethodBody,
    MethodDescriptor, ParameterSpec,
};
pub use instance::{Instance, Null};
pub use ioc_container::Container;
pub use lifecycle::{LifecycleHooks, ReboundCallback, ResolutionPhase, ResolvingCallback};
pub use registry::InstanceCache;
