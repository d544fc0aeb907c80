use crate::container::arguments::Parameters;
use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::errors::ContainerError;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Produces an instance from the container and the caller's override parameters
pub type Factory =
    Arc<dyn Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync>;

/// Post-construction decorator
pub type Extender =
    Arc<dyn Fn(Instance, &Container) -> Result<Instance, ContainerError> + Send + Sync>;

/// Replacement for a `Class@method` call target
pub type MethodBinding =
    Arc<dyn Fn(&Instance, &Container) -> Result<Instance, ContainerError> + Send + Sync>;

/// What an abstract identifier (or a contextual dependency) resolves to
#[derive(Clone)]
pub enum Concrete {
    /// Another identifier: built directly when it equals the abstract, resolved otherwise
    Type(String),
    /// A closure invoked with the container and the current override parameters
    Factory(Factory),
    /// A ready-made value
    Value(Instance),
}

impl Concrete {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        Concrete::Factory(Arc::new(factory))
    }

    pub fn value(instance: Instance) -> Self {
        Concrete::Value(instance)
    }
}

impl From<&str> for Concrete {
    fn from(target: &str) -> Self {
        Concrete::Type(target.to_string())
    }
}

impl From<String> for Concrete {
    fn from(target: String) -> Self {
        Concrete::Type(target)
    }
}

impl From<Instance> for Concrete {
    fn from(instance: Instance) -> Self {
        Concrete::Value(instance)
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concrete::Type(target) => write!(f, "Type({})", target),
            Concrete::Factory(_) => write!(f, "Factory(<factory_fn>)"),
            Concrete::Value(instance) => write!(f, "Value({})", instance.type_name()),
        }
    }
}

/// A registered construction recipe
#[derive(Clone)]
pub struct Binding {
    pub concrete: Factory,
    pub shared: bool,
}

impl Binding {
    /// Wrap any concrete into the factory form stored by the registry
    pub fn new(abstract_id: &str, concrete: Concrete, shared: bool) -> Self {
        let concrete: Factory = match concrete {
            Concrete::Factory(factory) => factory,
            Concrete::Value(instance) => Arc::new(move |_: &Container, _: &Parameters| Ok(instance.clone())),
            Concrete::Type(target) if target == abstract_id => {
                Arc::new(move |container: &Container, _: &Parameters| container.build(&target))
            }
            Concrete::Type(target) => Arc::new(move |container: &Container, parameters: &Parameters| {
                container.make_with(&target, parameters.clone())
            }),
        };
        Self { concrete, shared }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("concrete", &"<factory_fn>")
            .field("shared", &self.shared)
            .finish()
    }
}

/// Bindings, aliases, contextual rules, extenders, tags and method bindings
#[derive(Default)]
pub struct BindingRegistry {
    bindings: HashMap<String, Binding>,
    aliases: HashMap<String, String>,
    abstract_aliases: HashMap<String, Vec<String>>,
    contextual: HashMap<String, HashMap<String, Concrete>>,
    extenders: HashMap<String, Vec<Extender>>,
    tags: HashMap<String, Vec<String>>,
    method_bindings: HashMap<String, MethodBinding>,
    resolved: HashSet<String>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self, abstract_id: &str) -> Option<&Binding> {
        self.bindings.get(abstract_id)
    }

    pub fn has_binding(&self, abstract_id: &str) -> bool {
        self.bindings.contains_key(abstract_id)
    }

    pub fn is_shared_binding(&self, abstract_id: &str) -> bool {
        self.bindings.get(abstract_id).is_some_and(|b| b.shared)
    }

    pub fn insert_binding(&mut self, abstract_id: String, binding: Binding) {
        self.bindings.insert(abstract_id, binding);
    }

    pub fn remove_binding(&mut self, abstract_id: &str) -> Option<Binding> {
        self.bindings.remove(abstract_id)
    }

    /// Abstract identifier -> shared flag, sorted by identifier
    pub fn binding_summary(&self) -> BTreeMap<String, bool> {
        self.bindings
            .iter()
            .map(|(id, binding)| (id.clone(), binding.shared))
            .collect()
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn add_alias(&mut self, abstract_id: String, alias: String) {
        self.abstract_aliases
            .entry(abstract_id.clone())
            .or_default()
            .push(alias.clone());
        self.aliases.insert(alias, abstract_id);
    }

    pub fn remove_alias(&mut self, name: &str) -> Option<String> {
        self.aliases.remove(name)
    }

    /// Drop `searched` from the reverse alias index if it is currently an alias
    pub fn remove_abstract_alias(&mut self, searched: &str) {
        if !self.aliases.contains_key(searched) {
            return;
        }
        for aliases in self.abstract_aliases.values_mut() {
            aliases.retain(|alias| alias != searched);
        }
    }

    /// Follow the alias chain to the canonical identifier
    pub fn canonical(&self, name: &str) -> Result<String, ContainerError> {
        let mut current = name;
        let mut visited: HashSet<&str> = HashSet::new();
        while let Some(target) = self.aliases.get(current) {
            if target.as_str() == current || !visited.insert(current) {
                return Err(ContainerError::SelfAliased {
                    alias: current.to_string(),
                });
            }
            current = target.as_str();
        }
        Ok(current.to_string())
    }

    pub fn add_contextual(&mut self, consumer: String, abstract_id: String, implementation: Concrete) {
        self.contextual
            .entry(consumer)
            .or_default()
            .insert(abstract_id, implementation);
    }

    /// Contextual implementation for `abstract_id` (or any alias chaining to it) when built by `consumer`
    pub fn contextual_concrete(&self, consumer: Option<&str>, abstract_id: &str) -> Option<Concrete> {
        let rules = self.contextual.get(consumer?)?;
        if let Some(found) = rules.get(abstract_id) {
            return Some(found.clone());
        }

        // Rules recorded before an alias existed are keyed by the alias itself
        let mut visited: HashSet<&str> = HashSet::from([abstract_id]);
        let mut pending: Vec<&str> = vec![abstract_id];
        while let Some(current) = pending.pop() {
            for alias in self.abstract_aliases.get(current).into_iter().flatten() {
                if !visited.insert(alias.as_str()) {
                    continue;
                }
                if let Some(found) = rules.get(alias) {
                    return Some(found.clone());
                }
                pending.push(alias.as_str());
            }
        }
        None
    }

    pub fn push_extender(&mut self, abstract_id: String, extender: Extender) {
        self.extenders.entry(abstract_id).or_default().push(extender);
    }

    pub fn extenders(&self, abstract_id: &str) -> Vec<Extender> {
        self.extenders.get(abstract_id).cloned().unwrap_or_default()
    }

    pub fn forget_extenders(&mut self, abstract_id: &str) {
        self.extenders.remove(abstract_id);
    }

    pub fn tag(&mut self, abstract_ids: &[String], tags: &[String]) {
        for tag in tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .extend(abstract_ids.iter().cloned());
        }
    }

    pub fn tagged(&self, tag: &str) -> Vec<String> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    pub fn bind_method(&mut self, key: String, binding: MethodBinding) {
        self.method_bindings.insert(key, binding);
    }

    pub fn method_binding(&self, key: &str) -> Option<MethodBinding> {
        self.method_bindings.get(key).cloned()
    }

    pub fn mark_resolved(&mut self, abstract_id: String) {
        self.resolved.insert(abstract_id);
    }

    pub fn is_marked_resolved(&self, abstract_id: &str) -> bool {
        self.resolved.contains(abstract_id)
    }

    pub fn forget_resolved(&mut self, abstract_id: &str) {
        self.resolved.remove(abstract_id);
    }

    /// Clear aliases, resolved marks and bindings
    pub fn flush(&mut self) {
        self.aliases.clear();
        self.resolved.clear();
        self.bindings.clear();
        self.abstract_aliases.clear();
    }
}

impl fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("bindings", &self.binding_summary())
            .field("aliases", &self.aliases)
            .field("contextual", &self.contextual)
            .field("tags", &self.tags)
            .field("resolved", &self.resolved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_chain_resolves_transitively() {
        let mut registry = BindingRegistry::new();
        registry.add_alias("baz".to_string(), "bar".to_string());
        registry.add_alias("bar".to_string(), "foo".to_string());

        assert_eq!(registry.canonical("foo").unwrap(), "baz");
        assert_eq!(registry.canonical("bar").unwrap(), "baz");
        assert_eq!(registry.canonical("baz").unwrap(), "baz");
        assert!(registry.is_alias("foo"));
        assert!(!registry.is_alias("baz"));
    }

    #[test]
    fn test_alias_cycles_are_rejected() {
        let mut registry = BindingRegistry::new();
        registry.add_alias("name".to_string(), "name".to_string());
        assert!(matches!(
            registry.canonical("name"),
            Err(ContainerError::SelfAliased { ref alias }) if alias == "name"
        ));

        let mut registry = BindingRegistry::new();
        registry.add_alias("a".to_string(), "b".to_string());
        registry.add_alias("b".to_string(), "a".to_string());
        assert!(registry.canonical("a").is_err());
    }

    #[test]
    fn test_contextual_lookup_falls_back_to_aliases() {
        let mut registry = BindingRegistry::new();
        registry.add_alias("Repository".to_string(), "stub".to_string());
        registry.add_contextual(
            "Consumer".to_string(),
            "stub".to_string(),
            Concrete::from("SqliteRepository"),
        );

        let found = registry.contextual_concrete(Some("Consumer"), "Repository");
        assert!(matches!(found, Some(Concrete::Type(ref t)) if t == "SqliteRepository"));
        assert!(registry.contextual_concrete(Some("Other"), "Repository").is_none());
        assert!(registry.contextual_concrete(None, "Repository").is_none());
    }

    #[test]
    fn test_contextual_lookup_follows_alias_chains() {
        let mut registry = BindingRegistry::new();
        registry.add_contextual(
            "Consumer".to_string(),
            "repo".to_string(),
            Concrete::from("SqliteRepository"),
        );
        registry.add_alias("Repository".to_string(), "repository".to_string());
        registry.add_alias("repository".to_string(), "repo".to_string());

        let found = registry.contextual_concrete(Some("Consumer"), "Repository");
        assert!(matches!(found, Some(Concrete::Type(ref t)) if t == "SqliteRepository"));
    }

    #[test]
    fn test_remove_abstract_alias_only_touches_aliases() {
        let mut registry = BindingRegistry::new();
        registry.add_alias("PostgresRepository".to_string(), "foo".to_string());

        registry.remove_abstract_alias("PostgresRepository");
        registry.remove_abstract_alias("foo");
        registry.add_contextual("Consumer".to_string(), "foo".to_string(), Concrete::from("X"));
        assert!(registry.contextual_concrete(Some("Consumer"), "PostgresRepository").is_none());
    }

    #[test]
    fn test_tags_preserve_order_and_duplicates() {
        let mut registry = BindingRegistry::new();
        let ids = vec!["a".to_string(), "b".to_string()];
        registry.tag(&ids, &["foo".to_string(), "bar".to_string()]);
        registry.tag(&["a".to_string()], &["foo".to_string()]);

        assert_eq!(registry.tagged("foo"), vec!["a", "b", "a"]);
        assert_eq!(registry.tagged("bar"), vec!["a", "b"]);
        assert!(registry.tagged("missing").is_empty());
    }

    #[test]
    fn test_flush_clears_bindings_and_aliases() {
        let mut registry = BindingRegistry::new();
        registry.insert_binding(
            "foo".to_string(),
            Binding::new("foo", Concrete::value(Instance::new("bar")), true),
        );
        registry.add_alias("foo".to_string(), "baz".to_string());
        registry.mark_resolved("foo".to_string());

        assert!(registry.is_shared_binding("foo"));
        registry.flush();

        assert!(registry.binding_summary().is_empty());
        assert!(!registry.is_alias("baz"));
        assert!(!registry.is_marked_resolved("foo"));
    }
}
