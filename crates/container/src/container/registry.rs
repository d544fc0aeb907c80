use crate::container::instance::Instance;
use std::collections::HashMap;

/// Shared instances keyed by canonical abstract identifier
#[derive(Debug, Default)]
pub struct InstanceCache {
    instances: HashMap<String, Instance>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, abstract_id: &str) -> Option<Instance> {
        self.instances.get(abstract_id).cloned()
    }

    pub fn contains(&self, abstract_id: &str) -> bool {
        self.instances.contains_key(abstract_id)
    }

    pub fn insert(&mut self, abstract_id: String, instance: Instance) {
        self.instances.insert(abstract_id, instance);
    }

    pub fn remove(&mut self, abstract_id: &str) -> Option<Instance> {
        self.instances.remove(abstract_id)
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_returns_same_handle() {
        let mut cache = InstanceCache::new();
        let instance = Instance::new(42u32);
        cache.insert("answer".to_string(), instance.clone());

        assert!(cache.contains("answer"));
        assert!(cache.get("answer").unwrap().ptr_eq(&instance));

        cache.remove("answer");
        assert!(cache.is_empty());
    }
}
