//! Rendered-view caching and invalidation
//!
//! Listings are cached per path + query string. Every successful mutation
//! must signal staleness through [`ViewInvalidator`] so the next listing
//! request recomputes instead of serving the stale payload. The capability
//! is injected into the action pipeline, which keeps it assertable in tests
//! without a real rendering layer.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Signal that cached views under a path are stale.
pub trait ViewInvalidator: Send + Sync {
    /// Invalidate every cached view whose key starts with `path`.
    fn invalidate(&self, path: &str);
}

/// Keyed payload cache for rendered listing pages.
///
/// Keys are full request paths including the query string
/// (`/dashboard/invoices?query=lee&page=2`); invalidation takes the bare
/// path and evicts the whole family of query variants under it.
#[derive(Default)]
pub struct ViewCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached payload. A poisoned lock behaves as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        entries.get(key).cloned()
    }

    /// Store a computed payload under its request key.
    pub fn put(&self, key: impl Into<String>, payload: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), payload);
        }
    }

    /// Number of cached payloads currently held.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ViewInvalidator for ViewCache {
    fn invalidate(&self, path: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| !key.starts_with(path));
        }
        tracing::debug!(path, "invalidated cached views");
    }
}

/// Test double that records invalidated paths instead of evicting anything.
#[derive(Default)]
pub struct RecordingInvalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths invalidated so far, in call order.
    pub fn invalidated(&self) -> Vec<String> {
        self.paths.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ViewInvalidator for RecordingInvalidator {
    fn invalidate(&self, path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
    }
}
