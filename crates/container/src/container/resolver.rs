//! Per-thread resolution state
//!
//! The build stack and the parameter override stack only live for the
//! duration of a single top-level `make` call, so they are kept in thread
//! local storage keyed by the owning container instead of behind the
//! container's locks. Frames are pushed through guards that pop on drop,
//! which keeps both stacks balanced when resolution fails half way.

use crate::container::arguments::Parameters;
use crate::errors::ContainerError;
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
struct ResolutionFrames {
    build_stack: Vec<String>,
    with: Vec<Parameters>,
}

impl ResolutionFrames {
    fn is_idle(&self) -> bool {
        self.build_stack.is_empty() && self.with.is_empty()
    }
}

thread_local! {
    static FRAMES: RefCell<HashMap<Uuid, ResolutionFrames>> = RefCell::new(HashMap::new());
}

fn with_frames<R>(container: Uuid, f: impl FnOnce(&mut ResolutionFrames) -> R) -> R {
    FRAMES.with(|frames| {
        let mut frames = frames.borrow_mut();
        f(frames.entry(container).or_default())
    })
}

fn release(container: Uuid, f: impl FnOnce(&mut ResolutionFrames)) {
    // Guards may be dropped during thread teardown
    let _ = FRAMES.try_with(|frames| {
        let mut frames = frames.borrow_mut();
        if let Some(entry) = frames.get_mut(&container) {
            f(entry);
            if entry.is_idle() {
                frames.remove(&container);
            }
        }
    });
}

/// Parameter override frame for one `resolve` call
#[derive(Debug)]
pub struct ParameterFrame {
    container: Uuid,
}

impl Drop for ParameterFrame {
    fn drop(&mut self) {
        release(self.container, |frames| {
            frames.with.pop();
        });
    }
}

/// Push the override parameters of a `resolve` call
pub fn enter_resolution(
    container: Uuid,
    parameters: Parameters,
    max_depth: usize,
    abstract_id: &str,
) -> Result<ParameterFrame, ContainerError> {
    with_frames(container, |frames| {
        if frames.with.len() >= max_depth {
            return Err(ContainerError::ResolutionDepthExceeded {
                depth: max_depth,
                abstract_id: abstract_id.to_string(),
            });
        }
        frames.with.push(parameters);
        Ok(())
    })?;
    Ok(ParameterFrame { container })
}

/// Overrides of the innermost active `resolve` call, empty when there is none
pub fn last_parameter_override(container: Uuid) -> Parameters {
    FRAMES.with(|frames| {
        frames
            .borrow()
            .get(&container)
            .and_then(|entry| entry.with.last().cloned())
            .unwrap_or_default()
    })
}

/// Build stack frame for one concrete type being constructed
#[derive(Debug)]
pub struct BuildFrame {
    container: Uuid,
}

impl Drop for BuildFrame {
    fn drop(&mut self) {
        release(self.container, |frames| {
            frames.build_stack.pop();
        });
    }
}

/// Push `concrete` onto the build stack
///
/// With cycle detection enabled, entering a concrete that is already being
/// built fails with the full chain, e.g. `A -> B -> A`.
pub fn enter_build(
    container: Uuid,
    concrete: &str,
    detect_cycles: bool,
) -> Result<BuildFrame, ContainerError> {
    with_frames(container, |frames| {
        if detect_cycles && frames.build_stack.iter().any(|entry| entry == concrete) {
            let mut path = frames.build_stack.clone();
            path.push(concrete.to_string());
            return Err(ContainerError::CircularDependency {
                path: path.join(" -> "),
                cycle_service: concrete.to_string(),
            });
        }
        frames.build_stack.push(concrete.to_string());
        Ok(())
    })?;
    Ok(BuildFrame { container })
}

/// The concrete currently being built, used as the contextual consumer
pub fn current_consumer(container: Uuid) -> Option<String> {
    FRAMES.with(|frames| {
        frames
            .borrow()
            .get(&container)
            .and_then(|entry| entry.build_stack.last().cloned())
    })
}

/// Snapshot of the build stack, outermost first
pub fn build_stack(container: Uuid) -> Vec<String> {
    FRAMES.with(|frames| {
        frames
            .borrow()
            .get(&container)
            .map(|entry| entry.build_stack.clone())
            .unwrap_or_default()
    })
}
