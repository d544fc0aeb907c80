use crate::container::Container;
use crate::providers::{ProviderError, ProviderMetadata, ServiceProvider};
use std::collections::HashMap;

/// Runs service providers against a container in dependency order
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn ServiceProvider>>,
    order: Vec<usize>,
    metadata_cache: HashMap<String, ProviderMetadata>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service provider
    pub fn register<P: ServiceProvider + 'static>(&mut self, provider: P) {
        let metadata = ProviderMetadata::from_provider(&provider);
        self.metadata_cache.insert(metadata.name.clone(), metadata);
        self.providers.push(Box::new(provider));
        self.order.clear();
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn get_metadata(&self, name: &str) -> Option<&ProviderMetadata> {
        self.metadata_cache.get(name)
    }

    /// Order providers so dependencies come first, keeping insertion order otherwise
    pub fn resolve_dependencies(&mut self) -> Result<(), ProviderError> {
        let name_to_index: HashMap<&'static str, usize> = self
            .providers
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name(), i))
            .collect();

        let provider_count = self.providers.len();
        let mut visited = vec![false; provider_count];
        let mut temp_mark = vec![false; provider_count];
        let mut order = Vec::with_capacity(provider_count);

        for i in 0..provider_count {
            if !visited[i] {
                self.visit_provider(i, &name_to_index, &mut visited, &mut temp_mark, &mut order)?;
            }
        }

        self.order = order;
        Ok(())
    }

    fn visit_provider(
        &self,
        index: usize,
        name_to_index: &HashMap<&'static str, usize>,
        visited: &mut [bool],
        temp_mark: &mut [bool],
        order: &mut Vec<usize>,
    ) -> Result<(), ProviderError> {
        if temp_mark[index] {
            return Err(ProviderError::CircularDependency {
                provider: self.providers[index].name().to_string(),
            });
        }
        if visited[index] {
            return Ok(());
        }

        temp_mark[index] = true;
        for dependency in self.providers[index].dependencies() {
            let Some(&dependency_index) = name_to_index.get(dependency) else {
                return Err(ProviderError::MissingDependency {
                    provider: self.providers[index].name().to_string(),
                    dependency: dependency.to_string(),
                });
            };
            self.visit_provider(dependency_index, name_to_index, visited, temp_mark, order)?;
        }
        temp_mark[index] = false;
        visited[index] = true;
        order.push(index);

        Ok(())
    }

    /// Run every provider's `register` against `container`
    pub fn register_all(&mut self, container: &Container) -> Result<(), ProviderError> {
        if self.order.len() != self.providers.len() {
            self.resolve_dependencies()?;
        }
        for &index in &self.order {
            let provider = &self.providers[index];
            tracing::info!("Registering provider: {}", provider.name());
            provider
                .register(container)
                .map_err(|source| ProviderError::RegistrationFailed {
                    provider: provider.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Run every provider's `boot`; call after `register_all`
    pub fn boot_all(&mut self, container: &Container) -> Result<(), ProviderError> {
        if self.order.len() != self.providers.len() {
            self.resolve_dependencies()?;
        }
        for &index in &self.order {
            let provider = &self.providers[index];
            tracing::info!("Booting provider: {}", provider.name());
            provider
                .boot(container)
                .map_err(|source| ProviderError::BootFailed {
                    provider: provider.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Instance;
    use crate::errors::ContainerError;
    use std::sync::{Arc, Mutex};

    struct RecordingProvider {
        name: &'static str,
        dependencies: Vec<&'static str>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl ServiceProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn register(&self, container: &Container) -> Result<(), ContainerError> {
            self.log.lock().unwrap().push(format!("register:{}", self.name));
            container.instance(self.name, Instance::new(self.name))
        }

        fn boot(&self, container: &Container) -> Result<(), ContainerError> {
            assert!(container.bound(self.name));
            self.log.lock().unwrap().push(format!("boot:{}", self.name));
            Ok(())
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.dependencies.clone()
        }
    }

    fn provider(
        name: &'static str,
        dependencies: Vec<&'static str>,
        log: &Arc<Mutex<Vec<String>>>,
    ) -> RecordingProvider {
        RecordingProvider {
            name,
            dependencies,
            log: Arc::clone(log),
        }
    }

    #[test]
    fn test_dependencies_register_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ProviderRegistry::new();
        registry.register(provider("cache", vec!["config"], &log));
        registry.register(provider("config", vec![], &log));

        let container = Container::new();
        registry.register_all(&container).unwrap();
        registry.boot_all(&container).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["register:config", "register:cache", "boot:config", "boot:cache"]
        );
        assert_eq!(registry.get_metadata("cache").unwrap().dependencies, vec!["config"]);
    }

    #[test]
    fn test_missing_dependency() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ProviderRegistry::new();
        registry.register(provider("cache", vec!["config"], &log));

        let result = registry.resolve_dependencies();
        assert!(matches!(result, Err(ProviderError::MissingDependency { .. })));
    }

    #[test]
    fn test_circular_dependency() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ProviderRegistry::new();
        registry.register(provider("a", vec!["b"], &log));
        registry.register(provider("b", vec!["a"], &log));

        let result = registry.register_all(&Container::new());
        assert!(matches!(result, Err(ProviderError::CircularDependency { .. })));
        assert!(log.lock().unwrap().is_empty());
    }
}
