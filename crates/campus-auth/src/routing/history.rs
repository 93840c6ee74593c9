//! In-process [`Navigator`] that records every committed path.

use std::sync::Mutex;

use campus_core::traits::Navigator;
use tracing::debug;

/// Records navigations in order. The last entry is the current location.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    entries: Mutex<Vec<String>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed paths, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// The most recent path, if any.
    pub fn current(&self) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, path: &str) {
        debug!(path, "Navigating");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(path.to_string());
        }
    }
}
