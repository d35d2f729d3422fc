// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory enabled-list store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use bindery_core::{BinderyError, EnabledListStore};

/// An [`EnabledListStore`] that keeps lists in a map and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: Mutex<HashMap<String, String>>,
    saves: AtomicUsize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    pub fn with_list(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Every save fails with a persistence error.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl EnabledListStore for MemoryStore {
    fn load_enabled(&self, key: &str) -> Result<Option<String>, BinderyError> {
        Ok(self.get(key))
    }

    fn save_enabled(&self, key: &str, value: &str) -> Result<(), BinderyError> {
        if self.fail_saves {
            return Err(BinderyError::Persistence {
                message: format!("refusing to save `{key}`"),
                source: None,
            });
        }
        self.lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        assert_eq!(store.load_enabled("k").unwrap(), None);
        store.save_enabled("k", "a,b").unwrap();
        assert_eq!(store.load_enabled("k").unwrap().as_deref(), Some("a,b"));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn failing_saves_leave_value_untouched() {
        let store = MemoryStore::with_list("k", "a").failing_saves();
        assert!(store.save_enabled("k", "b").is_err());
        assert_eq!(store.get("k").as_deref(), Some("a"));
        assert_eq!(store.save_count(), 0);
    }
}
