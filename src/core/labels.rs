//! Display labels for invoice statuses.
//!
//! Users may rename status labels locally, independent of the server.
//! Storage is injected through [`LabelStore`] so nothing reads or writes a
//! process-wide global.

use std::collections::HashMap;

/// Key-value storage for label overrides.
pub trait LabelStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    /// Remove every stored override.
    fn reset(&mut self);
}

/// In-memory [`LabelStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLabelStore {
    entries: HashMap<String, String>,
}

impl MemoryLabelStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelStore for MemoryLabelStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

const KEY_PREFIX: &str = "status_label.";

/// Status labels: stored overrides on top of built-in defaults.
#[derive(Debug, Clone)]
pub struct StatusLabels<S> {
    store: S,
    defaults: HashMap<String, String>,
}

impl<S: LabelStore> StatusLabels<S> {
    /// Wrap `store` with no defaults registered.
    pub fn new(store: S) -> Self {
        Self {
            store,
            defaults: HashMap::new(),
        }
    }

    /// Register the default label for a status key.
    pub fn with_default(mut self, status: impl Into<String>, label: impl Into<String>) -> Self {
        self.defaults.insert(status.into(), label.into());
        self
    }

    /// Override, then default, then the raw status key.
    pub fn label(&self, status: &str) -> String {
        self.store
            .get(&format!("{KEY_PREFIX}{status}"))
            .or_else(|| self.defaults.get(status).cloned())
            .unwrap_or_else(|| status.to_string())
    }

    /// Store an override. A blank label is ignored.
    pub fn rename(&mut self, status: &str, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        tracing::debug!(status, label, "status label renamed");
        self.store.set(&format!("{KEY_PREFIX}{status}"), label);
    }

    /// Drop all overrides, back to defaults.
    pub fn reset(&mut self) {
        tracing::debug!("status labels reset");
        self.store.reset();
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
