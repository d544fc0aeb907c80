use tracing::trace;

use crate::container::arguments::{Parameters, ResolvedArguments};
use crate::container::descriptor::{Callable, MethodDescriptor};
use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::errors::ContainerError;

/// Something `Container::call` can invoke
#[derive(Debug, Clone)]
pub enum CallTarget {
    /// A closure with declared parameters
    Closure(Callable),
    /// A method on an existing instance
    Method { instance: Instance, method: String },
    /// A static method on a declared class
    Static { class: String, method: String },
    /// `Class@method`, `Class::method`, a class name used with a default method, or a function name
    Named(String),
}

impl CallTarget {
    pub fn method(instance: Instance, method: impl Into<String>) -> Self {
        Self::Method {
            instance,
            method: method.into(),
        }
    }

    pub fn static_method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Static {
            class: class.into(),
            method: method.into(),
        }
    }
}

impl From<Callable> for CallTarget {
    fn from(callable: Callable) -> Self {
        Self::Closure(callable)
    }
}

impl From<&str> for CallTarget {
    fn from(target: &str) -> Self {
        Self::Named(target.to_string())
    }
}

impl From<String> for CallTarget {
    fn from(target: String) -> Self {
        Self::Named(target)
    }
}

impl From<(Instance, &str)> for CallTarget {
    fn from((instance, method): (Instance, &str)) -> Self {
        Self::method(instance, method)
    }
}

impl Container {
    /// Invoke `target`, resolving any parameter `parameters` does not supply
    ///
    /// Named arguments are matched to parameters by name; whatever is left
    /// over is appended after the resolved arguments in its original order.
    pub fn call(
        &self,
        target: impl Into<CallTarget>,
        parameters: Parameters,
        default_method: Option<&str>,
    ) -> Result<Instance, ContainerError> {
        match target.into() {
            CallTarget::Named(name) if name.contains('@') || default_method.is_some() => {
                self.call_class(&name, parameters, default_method)
            }
            target => self.call_bound_method(target, parameters),
        }
    }

    /// Defer a `call` until the returned closure is invoked
    pub fn wrap(
        &self,
        target: impl Into<CallTarget>,
        parameters: Parameters,
    ) -> impl Fn() -> Result<Instance, ContainerError> + '_ {
        let target = target.into();
        move || self.call(target.clone(), parameters.clone(), None)
    }

    fn call_class(
        &self,
        target: &str,
        parameters: Parameters,
        default_method: Option<&str>,
    ) -> Result<Instance, ContainerError> {
        let segments: Vec<&str> = target.split('@').collect();
        let method = match (segments.as_slice(), default_method) {
            ([_, method], _) => *method,
            (_, Some(method)) => method,
            _ => {
                return Err(ContainerError::MissingMethod {
                    target: target.to_string(),
                })
            }
        };

        trace!("Calling {}@{}", segments[0], method);
        let instance = self.make(segments[0])?;
        self.call(CallTarget::method(instance, method), parameters, None)
    }

    fn call_bound_method(&self, target: CallTarget, parameters: Parameters) -> Result<Instance, ContainerError> {
        match target {
            CallTarget::Method { instance, method } => {
                let key = format!("{}@{}", instance.class_name(), method);
                if self.has_method_binding(&key) {
                    return self.call_method_binding(&key, &instance);
                }
                let descriptor = self.method_descriptor(instance.class_name(), &method)?;
                let arguments =
                    self.resolve_dependencies(instance.class_name(), descriptor.parameters(), &parameters)?;
                match descriptor {
                    MethodDescriptor::Instance { body, .. } => body(&instance, arguments),
                    MethodDescriptor::Static { body, .. } => body(self, arguments),
                }
            }
            CallTarget::Static { class, method } => {
                let key = format!("{}@{}", class, method);
                if self.has_method_binding(&key) {
                    return self.call_method_binding(&key, &Instance::new(class));
                }
                self.call_static(&class, &method, parameters)
            }
            CallTarget::Named(name) => match name.split_once("::") {
                Some((class, method)) => self.call_static(class, method, parameters),
                None => {
                    if self.has_method_binding(&name) {
                        return self.call_method_binding(&name, &Instance::null());
                    }
                    let callable = self
                        .function(&name)
                        .ok_or(ContainerError::FunctionNotFound { name })?;
                    self.call_callable(&callable, parameters)
                }
            },
            CallTarget::Closure(callable) => {
                if let Some(name) = callable.name.as_deref() {
                    if self.has_method_binding(name) {
                        return self.call_method_binding(name, &Instance::null());
                    }
                }
                self.call_callable(&callable, parameters)
            }
        }
    }

    fn call_static(&self, class: &str, method: &str, parameters: Parameters) -> Result<Instance, ContainerError> {
        let descriptor = self.method_descriptor(class, method)?;
        let MethodDescriptor::Static { parameters: declared, body } = descriptor else {
            return Err(ContainerError::NonStaticMethod {
                class: class.to_string(),
                method: method.to_string(),
            });
        };
        let arguments = self.resolve_dependencies(class, &declared, &parameters)?;
        body(self, arguments)
    }

    fn call_callable(&self, callable: &Callable, parameters: Parameters) -> Result<Instance, ContainerError> {
        let declaring = callable.name.as_deref().unwrap_or("{closure}");
        let arguments = self.resolve_dependencies(declaring, &callable.parameters, &parameters)?;
        (callable.body())(self, arguments)
    }

    fn method_descriptor(&self, class: &str, method: &str) -> Result<MethodDescriptor, ContainerError> {
        self.describe(class)
            .and_then(|descriptor| descriptor.methods.get(method).cloned())
            .ok_or_else(|| ContainerError::MethodNotFound {
                class: class.to_string(),
                method: method.to_string(),
            })
    }

    /// Invoke `method` on `target` with exactly `arguments`, without injection
    pub(crate) fn invoke_method(
        &self,
        target: &Instance,
        method: &str,
        arguments: ResolvedArguments,
    ) -> Result<Instance, ContainerError> {
        match self.method_descriptor(target.class_name(), method)? {
            MethodDescriptor::Instance { body, .. } => body(target, arguments),
            MethodDescriptor::Static { body, .. } => body(self, arguments),
        }
    }
}
