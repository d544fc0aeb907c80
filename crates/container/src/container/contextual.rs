use crate::container::arguments::Parameters;
use crate::container::binding::Concrete;
use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::errors::ContainerError;

/// Fluent recorder for `when(consumer).needs(dependency).give(implementation)`
#[derive(Debug)]
pub struct ContextualBindingBuilder<'a> {
    container: &'a Container,
    concrete: String,
}

impl<'a> ContextualBindingBuilder<'a> {
    pub fn new(container: &'a Container, concrete: impl Into<String>) -> Self {
        Self {
            container,
            concrete: concrete.into(),
        }
    }

    /// The dependency to override; `$name` targets a primitive parameter
    pub fn needs(self, abstract_id: impl Into<String>) -> PendingContextualBinding<'a> {
        PendingContextualBinding {
            container: self.container,
            concrete: self.concrete,
            needs: abstract_id.into(),
        }
    }
}

/// A contextual rule waiting for its implementation
#[derive(Debug)]
pub struct PendingContextualBinding<'a> {
    container: &'a Container,
    concrete: String,
    needs: String,
}

impl PendingContextualBinding<'_> {
    pub fn give(self, implementation: impl Into<Concrete>) -> Result<(), ContainerError> {
        self.container
            .add_contextual_binding(&self.concrete, &self.needs, implementation.into())
    }

    pub fn give_factory<F>(self, factory: F) -> Result<(), ContainerError>
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        self.give(Concrete::factory(factory))
    }

    pub fn give_value<T>(self, value: T) -> Result<(), ContainerError>
    where
        T: std::any::Any + Send + Sync,
    {
        self.give(Instance::new(value))
    }
}

impl Container {
    /// Start a contextual rule for `concrete`
    pub fn when(&self, concrete: impl Into<String>) -> ContextualBindingBuilder<'_> {
        ContextualBindingBuilder::new(self, concrete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::descriptor::{ClassDescriptor, ParameterSpec};

    #[test]
    fn test_give_value_for_primitive() {
        let container = Container::new();
        container.declare(
            ClassDescriptor::concrete("Mailer", |args| Ok(Instance::new(args.value::<String>(0)?)))
                .param(ParameterSpec::primitive("host")),
        );

        container
            .when("Mailer")
            .needs("$host")
            .give_value("smtp.local".to_string())
            .unwrap();

        let mailer = container.make("Mailer").unwrap();
        assert_eq!(mailer.downcast_ref::<String>().map(String::as_str), Some("smtp.local"));
    }

    #[test]
    fn test_give_factory_is_invoked_lazily() {
        let container = Container::new();
        container.declare(
            ClassDescriptor::concrete("Reporter", |args| Ok(args.instance(0)?.clone()))
                .param(ParameterSpec::primitive("limit")),
        );
        container
            .when("Reporter")
            .needs("$limit")
            .give_factory(|_, _| Ok(Instance::new(25usize)))
            .unwrap();

        let limit = container.make_as::<usize>("Reporter").unwrap();
        assert_eq!(*limit, 25);
    }
}
