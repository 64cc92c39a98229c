//! Intent registry
//!
//! Maps intent names to handlers. Populated once at start, then shared
//! read-only (behind `Arc`) by every turn.

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::IntentHandler;

/// Registry that holds every intent handler
pub struct IntentRegistry {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
}

impl IntentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its own name
    ///
    /// A later registration for the same name replaces the earlier one.
    pub fn register<H: IntentHandler + 'static>(&mut self, handler: H) -> &mut Self {
        let name = handler.name().to_string();
        tracing::info!("Registering intent handler: {}", name);
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_some() {
            tracing::warn!("Intent handler '{}' replaced", name);
        }
        self
    }

    /// Get a handler by exact intent name
    pub fn get(&self, name: &str) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a handler is registered for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get the list of intent names
    pub fn intent_names(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for IntentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IntentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.intent_names();
        names.sort_unstable();
        f.debug_struct("IntentRegistry")
            .field("intents", &names)
            .finish()
    }
}
