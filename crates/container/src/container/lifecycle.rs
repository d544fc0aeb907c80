use crate::container::instance::Instance;
use crate::container::ioc_container::Container;
use crate::errors::ContainerError;
use std::collections::HashMap;
use std::sync::Arc;

/// Listener fired when an abstract is resolved
pub type ResolvingCallback =
    Arc<dyn Fn(&Instance, &Container) -> Result<(), ContainerError> + Send + Sync>;

/// Listener fired with the fresh instance when a resolved abstract is rebound
pub type ReboundCallback =
    Arc<dyn Fn(&Container, &Instance) -> Result<(), ContainerError> + Send + Sync>;

/// The two points in `resolve` where listeners run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPhase {
    Resolving,
    AfterResolving,
}

#[derive(Default)]
struct PhaseCallbacks {
    global: Vec<ResolvingCallback>,
    // Grouped by identifier, groups in first-registration order
    typed: Vec<(String, Vec<ResolvingCallback>)>,
}

impl PhaseCallbacks {
    fn add(&mut self, abstract_id: Option<String>, callback: ResolvingCallback) {
        let Some(abstract_id) = abstract_id else {
            self.global.push(callback);
            return;
        };
        match self.typed.iter_mut().find(|(id, _)| *id == abstract_id) {
            Some((_, callbacks)) => callbacks.push(callback),
            None => self.typed.push((abstract_id, vec![callback])),
        }
    }

    fn matching(&self, abstract_id: &str, instance: &Instance) -> Vec<ResolvingCallback> {
        let typed = self
            .typed
            .iter()
            .filter(|(id, _)| id == abstract_id || instance.satisfies(id))
            .flat_map(|(_, callbacks)| callbacks.iter().cloned());
        self.global.iter().cloned().chain(typed).collect()
    }
}

/// Resolving, after-resolving and rebound listener tables
#[derive(Default)]
pub struct LifecycleHooks {
    resolving: PhaseCallbacks,
    after_resolving: PhaseCallbacks,
    rebound: HashMap<String, Vec<ReboundCallback>>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; `None` registers it for every resolution
    pub fn add(
        &mut self,
        phase: ResolutionPhase,
        abstract_id: Option<String>,
        callback: ResolvingCallback,
    ) {
        match phase {
            ResolutionPhase::Resolving => self.resolving.add(abstract_id, callback),
            ResolutionPhase::AfterResolving => self.after_resolving.add(abstract_id, callback),
        }
    }

    /// Global listeners followed by those registered for the abstract or a type the instance satisfies
    pub fn callbacks_for(
        &self,
        phase: ResolutionPhase,
        abstract_id: &str,
        instance: &Instance,
    ) -> Vec<ResolvingCallback> {
        match phase {
            ResolutionPhase::Resolving => self.resolving.matching(abstract_id, instance),
            ResolutionPhase::AfterResolving => self.after_resolving.matching(abstract_id, instance),
        }
    }

    pub fn add_rebound(&mut self, abstract_id: String, callback: ReboundCallback) {
        self.rebound.entry(abstract_id).or_default().push(callback);
    }

    pub fn rebound_callbacks(&self, abstract_id: &str) -> Vec<ReboundCallback> {
        self.rebound.get(abstract_id).cloned().unwrap_or_default()
    }
}

impl std::fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("global_resolving", &self.resolving.global.len())
            .field("global_after_resolving", &self.after_resolving.global.len())
            .field(
                "rebound",
                &self.rebound.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
