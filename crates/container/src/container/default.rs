use crate::container::ioc_container::Container;
use crate::errors::ContainerError;
use std::sync::{Arc, RwLock};

/// A slot holding the application's default container
///
/// The slot is owned by the composition root and handed to whoever needs
/// it; nothing in this crate reaches for it implicitly.
#[derive(Debug, Default)]
pub struct DefaultContainer {
    slot: RwLock<Option<Arc<Container>>>,
}

impl DefaultContainer {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// The current container, creating an empty one on first use
    pub fn get_or_init(&self) -> Result<Arc<Container>, ContainerError> {
        if let Some(container) = self.get()? {
            return Ok(container);
        }
        let mut slot = self.slot.write().map_err(|_| ContainerError::LockError {
            resource: "default_container".to_string(),
        })?;
        Ok(Arc::clone(slot.get_or_insert_with(|| Arc::new(Container::new()))))
    }

    pub fn get(&self) -> Result<Option<Arc<Container>>, ContainerError> {
        let slot = self.slot.read().map_err(|_| ContainerError::LockError {
            resource: "default_container".to_string(),
        })?;
        Ok(slot.clone())
    }

    /// Replace the current container, returning the one that was set
    pub fn set(&self, container: Arc<Container>) -> Result<Arc<Container>, ContainerError> {
        let mut slot = self.slot.write().map_err(|_| ContainerError::LockError {
            resource: "default_container".to_string(),
        })?;
        *slot = Some(Arc::clone(&container));
        Ok(container)
    }

    /// Empty the slot, returning the previous container
    pub fn clear(&self) -> Result<Option<Arc<Container>>, ContainerError> {
        let mut slot = self.slot.write().map_err(|_| ContainerError::LockError {
            resource: "default_container".to_string(),
        })?;
        Ok(slot.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_init_returns_same_container() {
        let slot = DefaultContainer::new();
        assert!(slot.get().unwrap().is_none());

        let first = slot.get_or_init().unwrap();
        let second = slot.get_or_init().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_set_and_clear() {
        static SLOT: DefaultContainer = DefaultContainer::new();

        let container = Arc::new(Container::new());
        SLOT.set(Arc::clone(&container)).unwrap();
        assert!(Arc::ptr_eq(&SLOT.get_or_init().unwrap(), &container));

        let previous = SLOT.clear().unwrap().unwrap();
        assert!(Arc::ptr_eq(&previous, &container));
        assert!(SLOT.get().unwrap().is_none());
    }
}
