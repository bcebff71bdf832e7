//! Element-targeted event handlers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use arbor_dom::Event;

/// A handler invoked with the event that reached its element.
pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Event name for activation: left click, or Enter/Space on the target.
pub const ON_ACTIVATE: &str = "on_activate";

/// Registry for element event handlers.
///
/// Maps (element_id, event) to handler closures. Owners clear it at the start
/// of each render so handlers from previous renders don't persist.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<(String, String), Handler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an element event, replacing any previous one.
    pub fn register(&self, element_id: &str, event: &str, handler: Handler) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.insert((element_id.to_string(), event.to_string()), handler);
        }
    }

    /// Get a handler for an element event.
    pub fn get(&self, element_id: &str, event: &str) -> Option<Handler> {
        self.handlers
            .read()
            .ok()?
            .get(&(element_id.to_string(), event.to_string()))
            .cloned()
    }

    /// Route an event to the handler registered for its target.
    ///
    /// Only activation events are routed. Returns whether a handler ran.
    pub fn dispatch(&self, event: &Event) -> bool {
        let Some(target) = event.target() else {
            return false;
        };
        if !event.is_activation() {
            return false;
        }
        // Clone out of the lock so the handler may touch the registry.
        let Some(handler) = self.get(target, ON_ACTIVATE) else {
            return false;
        };
        log::debug!("dispatching {ON_ACTIVATE} to {target}");
        handler(event);
        true
    }

    /// Drop every handler of one element. Returns how many were removed.
    pub fn remove(&self, element_id: &str) -> usize {
        let Ok(mut handlers) = self.handlers.write() else {
            return 0;
        };
        let before = handlers.len();
        handlers.retain(|(id, _), _| id != element_id);
        before - handlers.len()
    }

    /// Clear all handlers.
    pub fn clear(&self) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.clear();
        }
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers
            .read()
            .map(|h| h.is_empty())
            .unwrap_or(true)
    }

    /// Get the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &count)
            .finish()
    }
}
