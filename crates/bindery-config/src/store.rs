// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ConfigStore`]: the loaded configuration plus where to persist changes.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use bindery_core::{BinderyError, EnabledListStore};
use tracing::info;

use crate::model::BinderyConfig;
use crate::persist;

/// Holds the live configuration and persists enabled-plugin lists.
///
/// A file-backed store writes every saved list through to its TOML file; an
/// in-memory store only updates the model (useful for tests and for hosts
/// that persist configuration themselves).
#[derive(Debug)]
pub struct ConfigStore {
    config: RwLock<BinderyConfig>,
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// Creates a store that never touches the filesystem.
    pub fn in_memory(config: BinderyConfig) -> Self {
        Self {
            config: RwLock::new(config),
            path: None,
        }
    }

    /// Creates a store that persists saved lists into the TOML file at `path`.
    pub fn file_backed(config: BinderyConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            config: RwLock::new(config),
            path: Some(path.into()),
        }
    }

    /// The file saves are written to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns a copy of the current configuration.
    pub fn snapshot(&self) -> BinderyConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EnabledListStore for ConfigStore {
    fn load_enabled(&self, key: &str) -> Result<Option<String>, BinderyError> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        Ok(config.enabled_list(key).map(str::to_string))
    }

    fn save_enabled(&self, key: &str, value: &str) -> Result<(), BinderyError> {
        // Hold the write lock across the file write so concurrent saves land in order.
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = &self.path {
            persist::write_enabled_list(path, key, value)?;
            info!(path = %path.display(), key, value, "saved enabled plugins");
        }
        config
            .plugins
            .enabled
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::METADATA_PROVIDERS_KEY;

    #[test]
    fn in_memory_round_trip() {
        let store = ConfigStore::in_memory(BinderyConfig::default());
        assert_eq!(
            store.load_enabled(METADATA_PROVIDERS_KEY).unwrap().as_deref(),
            Some("douban,google")
        );

        store.save_enabled(METADATA_PROVIDERS_KEY, "google").unwrap();
        assert_eq!(
            store.load_enabled(METADATA_PROVIDERS_KEY).unwrap().as_deref(),
            Some("google")
        );
        assert_eq!(store.snapshot().enabled_list(METADATA_PROVIDERS_KEY), Some("google"));
        assert!(store.path().is_none());
    }

    #[test]
    fn file_backed_save_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bindery.toml");
        let store = ConfigStore::file_backed(BinderyConfig::default(), &path);

        store.save_enabled(METADATA_PROVIDERS_KEY, "douban").unwrap();

        let reloaded = crate::load_config_from_path(&path).unwrap();
        assert_eq!(reloaded.enabled_list(METADATA_PROVIDERS_KEY), Some("douban"));
    }

    #[test]
    fn failed_write_leaves_model_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bindery.toml");
        std::fs::write(&path, "plugins = 3\n").unwrap();
        let store = ConfigStore::file_backed(BinderyConfig::default(), &path);

        assert!(store.save_enabled(METADATA_PROVIDERS_KEY, "google").is_err());
        assert_eq!(
            store.load_enabled(METADATA_PROVIDERS_KEY).unwrap().as_deref(),
            Some("douban,google")
        );
    }
}
