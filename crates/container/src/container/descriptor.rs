use crate::container::arguments::ResolvedArguments;
use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::errors::ContainerError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a value from its resolved constructor arguments
pub type Constructor =
    Arc<dyn Fn(ResolvedArguments) -> Result<Instance, ContainerError> + Send + Sync>;

/// Body of an instance method: receives the target and its arguments
pub type MethodBody =
    Arc<dyn Fn(&Instance, ResolvedArguments) -> Result<Instance, ContainerError> + Send + Sync>;

/// Body of a static method or free function
pub type FunctionBody =
    Arc<dyn Fn(&Container, ResolvedArguments) -> Result<Instance, ContainerError> + Send + Sync>;

/// What a parameter depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyKind {
    /// A class or interface, resolved recursively through the container
    Class(String),
    /// A scalar or otherwise untyped value
    Primitive,
}

/// One declared parameter of a constructor, method or function
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: DependencyKind,
    pub default: Option<Instance>,
    pub optional: bool,
}

impl ParameterSpec {
    /// Parameter typed as a class or interface
    pub fn class(name: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DependencyKind::Class(dependency.into()),
            default: None,
            optional: false,
        }
    }

    /// Untyped parameter
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DependencyKind::Primitive,
            default: None,
            optional: false,
        }
    }

    /// Give the parameter a default value, which also makes it optional
    pub fn with_default(mut self, default: Instance) -> Self {
        self.default = Some(default);
        self.optional = true;
        self
    }

    /// Mark the parameter nullable; its default becomes [`Instance::null`] unless one is set
    pub fn nullable(mut self) -> Self {
        if self.default.is_none() {
            self.default = Some(Instance::null());
        }
        self.optional = true;
        self
    }

    pub fn dependency(&self) -> Option<&str> {
        match &self.kind {
            DependencyKind::Class(id) => Some(id),
            DependencyKind::Primitive => None,
        }
    }
}

/// Whether a described type can be instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Concrete,
    Interface,
    Abstract,
}

/// A method exposed to the call injector
#[derive(Clone)]
pub enum MethodDescriptor {
    Instance {
        parameters: Vec<ParameterSpec>,
        body: MethodBody,
    },
    Static {
        parameters: Vec<ParameterSpec>,
        body: FunctionBody,
    },
}

impl MethodDescriptor {
    pub fn instance<F>(parameters: Vec<ParameterSpec>, body: F) -> Self
    where
        F: Fn(&Instance, ResolvedArguments) -> Result<Instance, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        Self::Instance {
            parameters,
            body: Arc::new(body),
        }
    }

    pub fn static_method<F>(parameters: Vec<ParameterSpec>, body: F) -> Self
    where
        F: Fn(&Container, ResolvedArguments) -> Result<Instance, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        Self::Static {
            parameters,
            body: Arc::new(body),
        }
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        match self {
            Self::Instance { parameters, .. } | Self::Static { parameters, .. } => parameters,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static { .. })
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("static", &self.is_static())
            .field("parameters", &self.parameters())
            .finish()
    }
}

/// Constructor signature and metadata for one class
#[derive(Clone)]
pub struct ClassDescriptor {
    pub name: String,
    pub kind: ClassKind,
    pub parameters: Vec<ParameterSpec>,
    pub implements: Vec<String>,
    pub methods: HashMap<String, MethodDescriptor>,
    constructor: Option<Constructor>,
}

impl ClassDescriptor {
    /// An instantiable class built by `constructor`
    pub fn concrete<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(ResolvedArguments) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ClassKind::Concrete,
            parameters: Vec::new(),
            implements: Vec::new(),
            methods: HashMap::new(),
            constructor: Some(Arc::new(constructor)),
        }
    }

    /// An interface: resolvable only through a binding
    pub fn interface(name: impl Into<String>) -> Self {
        Self::uninstantiable(name, ClassKind::Interface)
    }

    /// An abstract class: resolvable only through a binding
    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::uninstantiable(name, ClassKind::Abstract)
    }

    fn uninstantiable(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Vec::new(),
            implements: Vec::new(),
            methods: HashMap::new(),
            constructor: None,
        }
    }

    pub fn param(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn implements(mut self, identifier: impl Into<String>) -> Self {
        self.implements.push(identifier.into());
        self
    }

    pub fn method(mut self, name: impl Into<String>, method: MethodDescriptor) -> Self {
        self.methods.insert(name.into(), method);
        self
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassKind::Concrete && self.constructor.is_some()
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .field("implements", &self.implements)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A closure or named function the call injector can invoke
#[derive(Clone)]
pub struct Callable {
    pub name: Option<String>,
    pub parameters: Vec<ParameterSpec>,
    body: FunctionBody,
}

impl Callable {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Container, ResolvedArguments) -> Result<Instance, ContainerError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: None,
            parameters: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// Name used to look up a method binding for this callable
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn param(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub(crate) fn body(&self) -> &FunctionBody {
        &self.body
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}
