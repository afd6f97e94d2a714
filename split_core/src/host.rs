//! # Host Collaborators
//!
//! The splitter never talks to a browser directly. It reads and writes the
//! split property through a [`StyleHost`] and registers document listeners
//! through a [`ListenerHost`]. `split_web` implements both over the DOM; the
//! in-memory versions here drive headless runs and the test suite.
//!
//! Listener registration is scoped: [`ListenerHost::listen`] hands back a
//! [`ListenerGuard`] and the listener stays attached exactly as long as the
//! guard lives.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::errors::{SplitError, SplitResult};
use crate::units::Pixels;

/// Style and viewport access on the document root.
///
/// Methods take `&self`: hosts are cheap handles onto shared state, so the
/// controller and its drag callbacks can each hold a clone.
pub trait StyleHost {
    /// Current value of a custom property, `None` when unset or empty.
    fn read_property(&self, name: &str) -> SplitResult<Option<String>>;

    /// Overwrite a custom property on the root element.
    fn write_property(&self, name: &str, value: &str) -> SplitResult<()>;

    /// Current viewport width.
    fn viewport_width(&self) -> SplitResult<Pixels>;
}

/// Document-level event listener registration.
pub trait ListenerHost {
    /// Attach the session listener for `event_type`. Dropping the returned
    /// guard detaches it again.
    fn listen(&self, event_type: &'static str) -> SplitResult<ListenerGuard>;
}

/// Keeps one document listener attached until released or dropped.
pub struct ListenerGuard {
    event_type: &'static str,
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new(event_type: &'static str, release: impl FnOnce() + 'static) -> Self {
        ListenerGuard {
            event_type,
            release: Some(Box::new(release)),
        }
    }

    /// Detach now instead of waiting for drop.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("event_type", &self.event_type)
            .field("attached", &self.release.is_some())
            .finish()
    }
}

// ============================================================================
// In-memory hosts
// ============================================================================

#[derive(Debug, Default)]
struct MemoryStyleState {
    properties: HashMap<String, String>,
    viewport_width: Pixels,
    writes: usize,
}

/// Root style backed by a map, with a settable viewport width.
#[derive(Debug, Clone, Default)]
pub struct MemoryStyle {
    state: Rc<RefCell<MemoryStyleState>>,
}

impl MemoryStyle {
    pub fn new(viewport_width: Pixels) -> Self {
        let style = MemoryStyle::default();
        style.set_viewport_width(viewport_width);
        style
    }

    pub fn set_viewport_width(&self, width: Pixels) {
        self.state.borrow_mut().viewport_width = width;
    }

    /// Raw property value, bypassing parsing
    pub fn property(&self, name: &str) -> Option<String> {
        self.state.borrow().properties.get(name).cloned()
    }

    /// Seed a property without counting it as a write
    pub fn seed_property(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .properties
            .insert(name.to_string(), value.to_string());
    }

    /// Number of `write_property` calls so far
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

impl StyleHost for MemoryStyle {
    fn read_property(&self, name: &str) -> SplitResult<Option<String>> {
        Ok(self
            .state
            .borrow()
            .properties
            .get(name)
            .filter(|value| !value.trim().is_empty())
            .cloned())
    }

    fn write_property(&self, name: &str, value: &str) -> SplitResult<()> {
        let mut state = self.state.borrow_mut();
        state.properties.insert(name.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn viewport_width(&self) -> SplitResult<Pixels> {
        Ok(self.state.borrow().viewport_width)
    }
}

#[derive(Debug, Default)]
struct MemoryListenerState {
    attached: Vec<&'static str>,
    rejected: Vec<&'static str>,
}

/// Listener registry that only records which event types are attached.
#[derive(Debug, Clone, Default)]
pub struct MemoryListeners {
    state: Rc<RefCell<MemoryListenerState>>,
}

impl MemoryListeners {
    pub fn new() -> Self {
        MemoryListeners::default()
    }

    /// Event types currently attached, in attach order (duplicates kept)
    pub fn attached(&self) -> Vec<&'static str> {
        self.state.borrow().attached.clone()
    }

    pub fn is_listening(&self, event_type: &str) -> bool {
        self.state.borrow().attached.iter().any(|t| *t == event_type)
    }

    /// Make every later `listen` for `event_type` fail with a host error
    pub fn reject(&self, event_type: &'static str) {
        self.state.borrow_mut().rejected.push(event_type);
    }
}

impl ListenerHost for MemoryListeners {
    fn listen(&self, event_type: &'static str) -> SplitResult<ListenerGuard> {
        {
            let mut state = self.state.borrow_mut();
            if state.rejected.contains(&event_type) {
                return Err(SplitError::host_error(
                    "addEventListener",
                    format!("listener for '{}' rejected", event_type),
                ));
            }
            state.attached.push(event_type);
        }

        let state = Rc::clone(&self.state);
        Ok(ListenerGuard::new(event_type, move || {
            let mut state = state.borrow_mut();
            if let Some(index) = state.attached.iter().position(|t| *t == event_type) {
                state.attached.remove(index);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_detaches_on_drop() {
        let listeners = MemoryListeners::new();
        let guard = listeners.listen("mousemove").unwrap();
        assert!(listeners.is_listening("mousemove"));
        drop(guard);
        assert!(!listeners.is_listening("mousemove"));
    }

    #[test]
    fn test_guard_release_is_idempotent() {
        let listeners = MemoryListeners::new();
        let first = listeners.listen("touchend").unwrap();
        let second = listeners.listen("touchend").unwrap();
        first.release();
        assert_eq!(listeners.attached(), vec!["touchend"]);
        drop(second);
        assert!(listeners.attached().is_empty());
    }

    #[test]
    fn test_rejected_listener() {
        let listeners = MemoryListeners::new();
        listeners.reject("mouseup");
        let err = listeners.listen("mouseup").unwrap_err();
        assert_eq!(err.error_code(), "HOST_ERROR");
        assert!(listeners.attached().is_empty());
    }

    #[test]
    fn test_memory_style_treats_blank_as_unset() {
        let style = MemoryStyle::new(Pixels(800));
        style.seed_property("--split-point", "   ");
        assert_eq!(style.read_property("--split-point").unwrap(), None);
        assert_eq!(style.write_count(), 0);

        style.write_property("--split-point", "400px").unwrap();
        assert_eq!(
            style.read_property("--split-point").unwrap(),
            Some("400px".to_string())
        );
        assert_eq!(style.write_count(), 1);
    }
}
