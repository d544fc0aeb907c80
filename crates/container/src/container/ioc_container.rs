use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::config::ContainerConfig;
use crate::container::arguments::{Parameters, ResolvedArguments};
use crate::container::autowiring::{ClassCatalog, Injectable, Introspector};
use crate::container::binding::{Binding, BindingRegistry, Concrete, Extender, MethodBinding};
use crate::container::descriptor::{Callable, ClassDescriptor, DependencyKind, ParameterSpec};
use crate::container::instance::Instance;
use crate::container::lifecycle::{LifecycleHooks, ResolutionPhase};
use crate::container::registry::InstanceCache;
use crate::container::resolver;
use crate::errors::ContainerError;

/// Registry tables and the shared-instance cache, updated together
#[derive(Debug, Default)]
struct ContainerState {
    registry: BindingRegistry,
    instances: InstanceCache,
}

impl ContainerState {
    fn bound(&self, abstract_id: &str) -> bool {
        self.registry.has_binding(abstract_id)
            || self.instances.contains(abstract_id)
            || self.registry.is_alias(abstract_id)
    }

    fn resolved(&self, abstract_id: &str) -> Result<bool, ContainerError> {
        let abstract_id = self.registry.canonical(abstract_id)?;
        Ok(self.registry.is_marked_resolved(&abstract_id) || self.instances.contains(&abstract_id))
    }

    fn is_shared(&self, abstract_id: &str) -> bool {
        self.instances.contains(abstract_id) || self.registry.is_shared_binding(abstract_id)
    }

    fn drop_stale_instances(&mut self, abstract_id: &str) {
        self.instances.remove(abstract_id);
        self.registry.remove_alias(abstract_id);
    }
}

/// String-keyed dependency resolution container
///
/// Bindings map an abstract identifier to a recipe. Anything without a
/// binding is treated as a concrete class name and built from the
/// descriptor the catalog (or the fallback [`Introspector`]) reports for it.
pub struct Container {
    id: Uuid,
    config: ContainerConfig,
    state: RwLock<ContainerState>,
    hooks: RwLock<LifecycleHooks>,
    catalog: ClassCatalog,
    introspector: Option<Arc<dyn Introspector>>,
}

impl Container {
    /// Create an empty container with the default configuration
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            state: RwLock::new(ContainerState::default()),
            hooks: RwLock::new(LifecycleHooks::new()),
            catalog: ClassCatalog::new(),
            introspector: None,
        }
    }

    /// Consult `introspector` for targets the built-in catalog does not know
    pub fn with_introspector(mut self, introspector: Arc<dyn Introspector>) -> Self {
        self.introspector = Some(introspector);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Make a class descriptor available to autowiring
    pub fn declare(&self, descriptor: ClassDescriptor) {
        debug!("Declaring class: {}", descriptor.name);
        self.catalog.declare(descriptor);
    }

    /// Make a named function available to `call`
    pub fn declare_function(&self, name: impl Into<String>, callable: Callable) {
        let name = name.into();
        debug!("Declaring function: {}", name);
        self.catalog.declare_function(name, callable);
    }

    /// Declare an [`Injectable`] type under its class name
    pub fn register<T: Injectable>(&self) {
        self.declare(ClassDescriptor::injectable::<T>());
    }

    /// Descriptor for `target` from the catalog, then the fallback introspector
    pub fn describe(&self, target: &str) -> Option<ClassDescriptor> {
        self.catalog
            .describe(target)
            .or_else(|| self.introspector.as_ref()?.describe(target))
    }

    pub(crate) fn function(&self, name: &str) -> Option<Callable> {
        self.catalog
            .function(name)
            .or_else(|| self.introspector.as_ref()?.function(name))
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, ContainerState>, ContainerError> {
        self.state.read().map_err(|_| ContainerError::LockError {
            resource: "container_state".to_string(),
        })
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, ContainerState>, ContainerError> {
        self.state.write().map_err(|_| ContainerError::LockError {
            resource: "container_state".to_string(),
        })
    }

    /// Run a boolean-style query; a poisoned state lock reads as "nothing registered"
    fn query<R: Default>(&self, f: impl FnOnce(&ContainerState) -> R) -> R {
        match self.read_state() {
            Ok(state) => f(&state),
            Err(error) => {
                warn!("Container query answered with default: {}", error);
                R::default()
            }
        }
    }

    fn read_hooks(&self) -> Result<RwLockReadGuard<'_, LifecycleHooks>, ContainerError> {
        self.hooks.read().map_err(|_| ContainerError::LockError {
            resource: "lifecycle_hooks".to_string(),
        })
    }

    fn write_hooks(&self) -> Result<RwLockWriteGuard<'_, LifecycleHooks>, ContainerError> {
        self.hooks.write().map_err(|_| ContainerError::LockError {
            resource: "lifecycle_hooks".to_string(),
        })
    }

    // Registration

    /// Register a non-shared binding; `abstract_id` is built directly
    pub fn bind(&self, abstract_id: &str, concrete: impl Into<Concrete>) -> Result<(), ContainerError> {
        self.bind_with(abstract_id, Some(concrete.into()), false)
    }

    /// Register a non-shared binding backed by a factory closure
    pub fn bind_factory<F>(&self, abstract_id: &str, factory: F) -> Result<(), ContainerError>
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        self.bind_with(abstract_id, Some(Concrete::factory(factory)), false)
    }

    /// Register a binding; with no concrete the abstract builds itself
    pub fn bind_with(
        &self,
        abstract_id: &str,
        concrete: Option<Concrete>,
        shared: bool,
    ) -> Result<(), ContainerError> {
        let concrete = concrete.unwrap_or_else(|| Concrete::Type(abstract_id.to_string()));
        debug!(
            "Binding {} to {:?} (shared: {})",
            abstract_id, concrete, shared
        );

        let was_resolved = {
            let mut state = self.write_state()?;
            state.drop_stale_instances(abstract_id);
            state.registry.insert_binding(
                abstract_id.to_string(),
                Binding::new(abstract_id, concrete, shared),
            );
            state.resolved(abstract_id)?
        };

        if was_resolved {
            self.rebound(abstract_id)?;
        }
        Ok(())
    }

    /// Register a binding only when nothing is bound under `abstract_id` yet
    pub fn bind_if(
        &self,
        abstract_id: &str,
        concrete: Option<Concrete>,
        shared: bool,
    ) -> Result<(), ContainerError> {
        if self.bound(abstract_id) {
            return Ok(());
        }
        self.bind_with(abstract_id, concrete, shared)
    }

    /// Register a shared binding
    pub fn singleton(&self, abstract_id: &str, concrete: impl Into<Concrete>) -> Result<(), ContainerError> {
        self.bind_with(abstract_id, Some(concrete.into()), true)
    }

    /// Register a shared binding backed by a factory closure
    pub fn singleton_factory<F>(&self, abstract_id: &str, factory: F) -> Result<(), ContainerError>
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        self.bind_with(abstract_id, Some(Concrete::factory(factory)), true)
    }

    /// Store an existing value as the shared instance for `abstract_id`
    pub fn instance(&self, abstract_id: &str, instance: Instance) -> Result<(), ContainerError> {
        debug!("Registering instance for {} ({})", abstract_id, instance.type_name());

        let was_bound = {
            let mut state = self.write_state()?;
            state.registry.remove_abstract_alias(abstract_id);
            let was_bound = state.bound(abstract_id);
            state.registry.remove_alias(abstract_id);
            state.instances.insert(abstract_id.to_string(), instance);
            was_bound
        };

        if was_bound {
            self.rebound(abstract_id)?;
        }
        Ok(())
    }

    /// Make `alias` resolve to `abstract_id`
    pub fn alias(&self, abstract_id: &str, alias: &str) -> Result<(), ContainerError> {
        if abstract_id == alias {
            return Err(ContainerError::SelfAliased {
                alias: alias.to_string(),
            });
        }
        debug!("Aliasing {} to {}", alias, abstract_id);
        self.write_state()?
            .registry
            .add_alias(abstract_id.to_string(), alias.to_string());
        Ok(())
    }

    /// Decorate `abstract_id`: applied now to an existing instance, otherwise on every later resolution
    pub fn extend<F>(&self, abstract_id: &str, extender: F) -> Result<(), ContainerError>
    where
        F: Fn(Instance, &Container) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        let abstract_id = self.get_alias(abstract_id)?;
        let extender: Extender = Arc::new(extender);
        debug!("Extending {}", abstract_id);

        let existing = self.read_state()?.instances.get(&abstract_id);
        if let Some(existing) = existing {
            let extended = extender(existing, self)?;
            self.write_state()?
                .instances
                .insert(abstract_id.clone(), extended);
            return self.rebound(&abstract_id);
        }

        let was_resolved = {
            let mut state = self.write_state()?;
            state.registry.push_extender(abstract_id.clone(), extender);
            state.resolved(&abstract_id)?
        };
        if was_resolved {
            self.rebound(&abstract_id)?;
        }
        Ok(())
    }

    /// Add every identifier in `abstract_ids` to every tag in `tags`
    pub fn tag<A, T>(&self, abstract_ids: A, tags: T) -> Result<(), ContainerError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let abstract_ids: Vec<String> = abstract_ids.into_iter().map(Into::into).collect();
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        debug!("Tagging {:?} with {:?}", abstract_ids, tags);
        self.write_state()?.registry.tag(&abstract_ids, &tags);
        Ok(())
    }

    /// Resolve every identifier registered under `tag`, in tagging order
    pub fn tagged(&self, tag: &str) -> Result<Vec<Instance>, ContainerError> {
        let abstract_ids = self.read_state()?.registry.tagged(tag);
        abstract_ids.iter().map(|id| self.make(id)).collect()
    }

    // Lifecycle hooks

    /// Listen for `abstract_id` being rebound
    ///
    /// Returns the current instance when `abstract_id` is already bound.
    pub fn rebinding<F>(&self, abstract_id: &str, callback: F) -> Result<Option<Instance>, ContainerError>
    where
        F: Fn(&Container, &Instance) -> Result<(), ContainerError> + Send + Sync + 'static,
    {
        let abstract_id = self.get_alias(abstract_id)?;
        self.write_hooks()?
            .add_rebound(abstract_id.clone(), Arc::new(callback));

        if self.bound(&abstract_id) {
            return self.make(&abstract_id).map(Some);
        }
        debug!("Rebinding listener registered before {} was bound", abstract_id);
        Ok(None)
    }

    /// Call `method` on `target` with the fresh instance whenever `abstract_id` is rebound
    pub fn refresh(
        &self,
        abstract_id: &str,
        target: Instance,
        method: &str,
    ) -> Result<Option<Instance>, ContainerError> {
        let method = method.to_string();
        self.rebinding(abstract_id, move |container, instance| {
            container
                .invoke_method(&target, &method, ResolvedArguments::new(vec![instance.clone()]))
                .map(|_| ())
        })
    }

    fn rebound(&self, abstract_id: &str) -> Result<(), ContainerError> {
        let instance = self.make(abstract_id)?;
        let callbacks = self.read_hooks()?.rebound_callbacks(abstract_id);
        trace!("Rebound {} ({} listeners)", abstract_id, callbacks.len());
        for callback in callbacks {
            callback(self, &instance)?;
        }
        Ok(())
    }

    /// Listen for resolutions of `abstract_id`, or of everything when `None`
    pub fn resolving<F>(&self, abstract_id: Option<&str>, callback: F) -> Result<(), ContainerError>
    where
        F: Fn(&Instance, &Container) -> Result<(), ContainerError> + Send + Sync + 'static,
    {
        self.add_resolution_hook(ResolutionPhase::Resolving, abstract_id, callback)
    }

    /// Like [`Container::resolving`], fired after all resolving listeners
    pub fn after_resolving<F>(&self, abstract_id: Option<&str>, callback: F) -> Result<(), ContainerError>
    where
        F: Fn(&Instance, &Container) -> Result<(), ContainerError> + Send + Sync + 'static,
    {
        self.add_resolution_hook(ResolutionPhase::AfterResolving, abstract_id, callback)
    }

    fn add_resolution_hook<F>(
        &self,
        phase: ResolutionPhase,
        abstract_id: Option<&str>,
        callback: F,
    ) -> Result<(), ContainerError>
    where
        F: Fn(&Instance, &Container) -> Result<(), ContainerError> + Send + Sync + 'static,
    {
        let abstract_id = abstract_id.map(|id| self.get_alias(id)).transpose()?;
        self.write_hooks()?
            .add(phase, abstract_id, Arc::new(callback));
        Ok(())
    }

    fn fire_resolving_callbacks(&self, abstract_id: &str, instance: &Instance) -> Result<(), ContainerError> {
        for phase in [ResolutionPhase::Resolving, ResolutionPhase::AfterResolving] {
            let callbacks = self.read_hooks()?.callbacks_for(phase, abstract_id, instance);
            for callback in callbacks {
                callback(instance, self)?;
            }
        }
        Ok(())
    }

    // Method and contextual bindings

    /// Replace the `Class@method` call target with `callback`
    pub fn bind_method<F>(&self, method: &str, callback: F) -> Result<(), ContainerError>
    where
        F: Fn(&Instance, &Container) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        debug!("Binding method {}", method);
        let callback: MethodBinding = Arc::new(callback);
        self.write_state()?
            .registry
            .bind_method(method.to_string(), callback);
        Ok(())
    }

    pub fn has_method_binding(&self, method: &str) -> bool {
        self.query(|state| state.registry.method_binding(method).is_some())
    }

    /// Run the method binding registered under `method` against `instance`
    pub fn call_method_binding(&self, method: &str, instance: &Instance) -> Result<Instance, ContainerError> {
        let binding = self.read_state()?.registry.method_binding(method);
        match binding {
            Some(binding) => binding(instance, self),
            None => {
                let (class, name) = method.split_once('@').unwrap_or((instance.class_name(), method));
                Err(ContainerError::MethodNotFound {
                    class: class.to_string(),
                    method: name.to_string(),
                })
            }
        }
    }

    /// Record that `concrete` receives `implementation` when it needs `abstract_id`
    ///
    /// Both names are stored under their canonical identifiers, so rules may
    /// be declared through aliases of either side.
    pub fn add_contextual_binding(
        &self,
        concrete: &str,
        abstract_id: &str,
        implementation: Concrete,
    ) -> Result<(), ContainerError> {
        let mut state = self.write_state()?;
        let concrete = state.registry.canonical(concrete)?;
        let abstract_id = state.registry.canonical(abstract_id)?;
        debug!(
            "Contextual binding: {} needs {} -> {:?}",
            concrete, abstract_id, implementation
        );
        state
            .registry
            .add_contextual(concrete, abstract_id, implementation);
        Ok(())
    }

    // Resolution

    /// Resolve `abstract_id`
    pub fn make(&self, abstract_id: &str) -> Result<Instance, ContainerError> {
        self.resolve(abstract_id, Parameters::new())
    }

    /// Resolve `abstract_id` with override parameters, bypassing the shared-instance cache
    pub fn make_with(&self, abstract_id: &str, parameters: Parameters) -> Result<Instance, ContainerError> {
        self.resolve(abstract_id, parameters)
    }

    /// Resolve `abstract_id` and downcast the result
    pub fn make_as<T>(&self, abstract_id: &str) -> Result<Arc<T>, ContainerError>
    where
        T: std::any::Any + Send + Sync,
    {
        self.make(abstract_id)?.downcast::<T>()
    }

    /// Deferred `make`
    pub fn factory(&self, abstract_id: &str) -> impl Fn() -> Result<Instance, ContainerError> + '_ {
        let abstract_id = abstract_id.to_string();
        move || self.make(&abstract_id)
    }

    fn resolve(&self, abstract_id: &str, parameters: Parameters) -> Result<Instance, ContainerError> {
        let abstract_id = self.get_alias(abstract_id)?;
        let consumer = resolver::current_consumer(self.id);

        let (contextual, cached) = {
            let state = self.read_state()?;
            (
                state
                    .registry
                    .contextual_concrete(consumer.as_deref(), &abstract_id),
                state.instances.get(&abstract_id),
            )
        };
        let needs_contextual_build = !parameters.is_empty() || contextual.is_some();

        if let Some(instance) = cached {
            if !needs_contextual_build {
                return Ok(instance);
            }
        }

        trace!(
            "Resolving {} (consumer: {:?}, overrides: {})",
            abstract_id,
            consumer,
            parameters.len()
        );
        let overrides = parameters.clone();
        let _frame = resolver::enter_resolution(
            self.id,
            parameters,
            self.config.max_resolution_depth,
            &abstract_id,
        )?;

        let concrete = match contextual {
            Some(concrete) => concrete,
            None => self.concrete_for(&abstract_id)?,
        };

        let mut object = match concrete {
            Concrete::Type(target) if target == abstract_id => self.build(&target)?,
            Concrete::Type(target) => self.make(&target)?,
            Concrete::Factory(factory) => factory(self, &overrides)?,
            Concrete::Value(instance) => instance,
        };

        let extenders = self.read_state()?.registry.extenders(&abstract_id);
        for extender in extenders {
            object = extender(object, self)?;
        }

        {
            let mut state = self.write_state()?;
            if state.is_shared(&abstract_id) && !needs_contextual_build {
                state.instances.insert(abstract_id.clone(), object.clone());
            }
        }

        self.fire_resolving_callbacks(&abstract_id, &object)?;

        self.write_state()?.registry.mark_resolved(abstract_id);
        Ok(object)
    }

    fn concrete_for(&self, abstract_id: &str) -> Result<Concrete, ContainerError> {
        let state = self.read_state()?;
        Ok(match state.registry.binding(abstract_id) {
            Some(binding) => Concrete::Factory(Arc::clone(&binding.concrete)),
            None => Concrete::Type(abstract_id.to_string()),
        })
    }

    /// Instantiate `concrete` from its descriptor, autowiring its constructor parameters
    pub fn build(&self, concrete: &str) -> Result<Instance, ContainerError> {
        let descriptor = match self.describe(concrete) {
            Some(descriptor) if descriptor.is_instantiable() => descriptor,
            _ => {
                return Err(ContainerError::not_instantiable(
                    concrete,
                    resolver::build_stack(self.id),
                ))
            }
        };
        let constructor = descriptor
            .constructor()
            .cloned()
            .ok_or_else(|| ContainerError::not_instantiable(concrete, resolver::build_stack(self.id)))?;

        trace!("Building {}", descriptor.name);
        let arguments = {
            let frame = resolver::enter_build(self.id, concrete, self.config.detect_circular_dependencies)
                .inspect_err(|error| warn!("{}", error))?;
            let arguments = if descriptor.parameters.is_empty() {
                ResolvedArguments::default()
            } else {
                let overrides = resolver::last_parameter_override(self.id);
                self.resolve_dependencies(&descriptor.name, &descriptor.parameters, &overrides)?
            };
            drop(frame);
            arguments
        };

        let instance = constructor(arguments)?;
        Ok(instance.with_class(&descriptor.name, &descriptor.implements))
    }

    /// Resolve `parameters` in order, then append every override no parameter consumed
    pub(crate) fn resolve_dependencies(
        &self,
        declaring: &str,
        parameters: &[ParameterSpec],
        overrides: &Parameters,
    ) -> Result<ResolvedArguments, ContainerError> {
        let mut consumed: HashSet<&str> = HashSet::new();
        let mut values = Vec::with_capacity(parameters.len());

        for parameter in parameters {
            if let Some(value) = overrides.get(&parameter.name) {
                consumed.insert(parameter.name.as_str());
                values.push(value.clone());
                continue;
            }

            let value = match &parameter.kind {
                DependencyKind::Primitive => self.resolve_primitive(declaring, parameter)?,
                DependencyKind::Class(dependency) => self.resolve_class(parameter, dependency)?,
            };
            values.push(value);
        }

        values.extend(overrides.unmatched(&consumed));
        Ok(ResolvedArguments::new(values))
    }

    fn resolve_primitive(&self, declaring: &str, parameter: &ParameterSpec) -> Result<Instance, ContainerError> {
        let consumer = resolver::current_consumer(self.id);
        let key = format!("${}", parameter.name);
        let contextual = self
            .read_state()?
            .registry
            .contextual_concrete(consumer.as_deref(), &key);

        match contextual {
            Some(Concrete::Factory(factory)) => factory(self, &Parameters::new()),
            Some(Concrete::Value(value)) => Ok(value),
            Some(Concrete::Type(literal)) => Ok(Instance::new(literal)),
            None => parameter
                .default
                .clone()
                .ok_or_else(|| ContainerError::unresolvable_primitive(&parameter.name, declaring)),
        }
    }

    fn resolve_class(&self, parameter: &ParameterSpec, dependency: &str) -> Result<Instance, ContainerError> {
        match self.make(dependency) {
            Err(error) if error.is_not_instantiable() && parameter.optional => {
                trace!("Falling back to default for optional {}: {}", parameter.name, error);
                Ok(parameter.default.clone().unwrap_or_else(Instance::null))
            }
            result => result,
        }
    }

    // Queries

    /// Whether `abstract_id` has a binding, an instance or is an alias
    pub fn bound(&self, abstract_id: &str) -> bool {
        self.query(|state| state.bound(abstract_id))
    }

    pub fn has(&self, key: &str) -> bool {
        self.bound(key)
    }

    pub fn resolved(&self, abstract_id: &str) -> bool {
        self.query(|state| state.resolved(abstract_id).unwrap_or(false))
    }

    pub fn is_shared(&self, abstract_id: &str) -> bool {
        self.query(|state| state.is_shared(abstract_id))
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.query(|state| state.registry.is_alias(name))
    }

    /// Canonical identifier behind `name`, following aliases transitively
    pub fn get_alias(&self, name: &str) -> Result<String, ContainerError> {
        self.read_state()?.registry.canonical(name)
    }

    /// Bound identifiers and whether each is shared
    pub fn get_bindings(&self) -> BTreeMap<String, bool> {
        self.query(|state| state.registry.binding_summary())
    }

    // Accessors

    pub fn get(&self, key: &str) -> Result<Instance, ContainerError> {
        self.make(key)
    }

    /// Bind `key` to a factory returning `value`
    pub fn set(&self, key: &str, value: Instance) -> Result<(), ContainerError> {
        self.bind_factory(key, move |_, _| Ok(value.clone()))
    }

    /// Drop the binding, instance and resolved mark for `key`
    pub fn unset(&self, key: &str) -> Result<(), ContainerError> {
        debug!("Unsetting {}", key);
        let mut state = self.write_state()?;
        state.registry.remove_binding(key);
        state.instances.remove(key);
        state.registry.forget_resolved(key);
        Ok(())
    }

    // Cleanup

    pub fn forget_extenders(&self, abstract_id: &str) -> Result<(), ContainerError> {
        let abstract_id = self.get_alias(abstract_id)?;
        self.write_state()?.registry.forget_extenders(&abstract_id);
        Ok(())
    }

    pub fn forget_instance(&self, abstract_id: &str) -> Result<(), ContainerError> {
        self.write_state()?.instances.remove(abstract_id);
        Ok(())
    }

    pub fn forget_instances(&self) -> Result<(), ContainerError> {
        self.write_state()?.instances.clear();
        Ok(())
    }

    /// Clear bindings, aliases, resolved marks and shared instances
    pub fn flush(&self) -> Result<(), ContainerError> {
        debug!("Flushing container {}", self.id);
        let mut state = self.write_state()?;
        state.registry.flush();
        state.instances.clear();
        Ok(())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Container");
        debug.field("id", &self.id).field("config", &self.config);
        if let Ok(state) = self.state.read() {
            debug
                .field("registry", &state.registry)
                .field("instances", &state.instances.len());
        }
        debug
            .field("declared_classes", &self.catalog.len())
            .field("has_introspector", &self.introspector.is_some())
            .finish()
    }
}
