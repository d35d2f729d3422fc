// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generic plugin registry for one plugin kind.
//!
//! A [`PluginCategory`] owns the *available* plugin types (fixed once
//! discovery has run) and tracks which of them are *enabled*. It reads and
//! writes the enabled list through an [`EnabledListStore`] under the kind's
//! config key.
//!
//! Locking: the available list sits behind an `RwLock` that is only held
//! while cloning entry handles. Each entry guards its own instance slot.
//! Category-wide administrative operations (`load_available`, `enable_all`,
//! `save_to_config`) serialise on an admin mutex. No lock is held while a
//! caller uses an instance.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use bindery_core::{BinderyError, EnabledListStore, PluginInfo};
use tracing::{debug, error, info, warn};

use crate::discovery::scan_root;
use crate::kind::PluginKind;
use crate::manifest::PluginManifest;
use crate::registry::{FactoryTable, PluginEntry, PluginOrigin};

type Entry<K> = PluginEntry<<K as PluginKind>::Instance>;

/// Split a persisted enabled list: comma-separated, trimmed, empties dropped.
pub fn parse_enabled_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Registry of the plugin types of kind `K`.
pub struct PluginCategory<K: PluginKind> {
    search_roots: Vec<PathBuf>,
    factories: FactoryTable<K::Instance>,
    builtins: Vec<PluginManifest>,
    store: Arc<dyn EnabledListStore>,
    available: RwLock<Vec<Arc<Entry<K>>>>,
    admin: Mutex<()>,
}

/// Builder for [`PluginCategory`].
pub struct PluginCategoryBuilder<K: PluginKind> {
    search_roots: Vec<PathBuf>,
    factories: FactoryTable<K::Instance>,
    builtins: Vec<PluginManifest>,
    store: Arc<dyn EnabledListStore>,
}

impl<K: PluginKind> PluginCategoryBuilder<K> {
    /// Add a root directory; packages are looked up in `<root>/<K::SUBDIRECTORY>`.
    pub fn search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    pub fn search_roots<I, R>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<PathBuf>,
    {
        self.search_roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Use `factories` as the table of compiled-in implementations.
    pub fn factories(mut self, factories: FactoryTable<K::Instance>) -> Self {
        self.factories = factories;
        self
    }

    /// Register a compiled-in plugin type, discovered before any directory.
    pub fn builtin(mut self, manifest: PluginManifest) -> Self {
        self.builtins.push(manifest);
        self
    }

    pub fn build(self) -> PluginCategory<K> {
        PluginCategory {
            search_roots: self.search_roots,
            factories: self.factories,
            builtins: self.builtins,
            store: self.store,
            available: RwLock::new(Vec::new()),
            admin: Mutex::new(()),
        }
    }
}

impl<K: PluginKind> PluginCategory<K> {
    /// Start building a category that persists its enabled list in `store`.
    pub fn builder(store: Arc<dyn EnabledListStore>) -> PluginCategoryBuilder<K> {
        PluginCategoryBuilder {
            search_roots: Vec::new(),
            factories: FactoryTable::new(),
            builtins: Vec::new(),
            store,
        }
    }

    pub fn name(&self) -> &'static str {
        K::NAME
    }

    pub fn config_key(&self) -> &'static str {
        K::CONFIG_KEY
    }

    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// Discover plugin types: built-ins first, then every package under the
    /// search roots. Broken packages are logged and skipped.
    ///
    /// Registration is set-like by name; a type already registered is
    /// returned as-is. Returns the entries loaded by this call.
    pub fn load_available(&self) -> Vec<Arc<Entry<K>>> {
        let _admin = self.lock_admin();
        let mut loaded: Vec<Arc<Entry<K>>> = Vec::new();

        let builtins = self
            .builtins
            .iter()
            .map(|manifest| (manifest.clone(), PluginOrigin::Builtin));
        let discovered = self.search_roots.iter().flat_map(|root| {
            scan_root(root, K::SUBDIRECTORY)
                .into_iter()
                .filter_map(|result| match result {
                    Ok(package) => Some((package.manifest, PluginOrigin::Directory(package.path))),
                    Err(e) => {
                        error!(category = K::NAME, error = %e, "skipping plugin package");
                        None
                    }
                })
        });

        for (manifest, origin) in builtins.chain(discovered) {
            match self.register(manifest, origin) {
                Ok(entry) => {
                    if !loaded.iter().any(|e| Arc::ptr_eq(e, &entry)) {
                        loaded.push(entry);
                    }
                }
                Err(e) => error!(category = K::NAME, error = %e, "skipping plugin package"),
            }
        }

        info!(
            category = K::NAME,
            loaded = loaded.len(),
            available = self.read_available().len(),
            "plugin discovery finished"
        );
        loaded
    }

    fn register(
        &self,
        manifest: PluginManifest,
        origin: PluginOrigin,
    ) -> Result<Arc<Entry<K>>, BinderyError> {
        let factory = self
            .factories
            .get(&manifest.factory)
            .ok_or_else(|| BinderyError::Discovery {
                path: origin.to_string(),
                message: format!(
                    "plugin `{}` names unknown factory `{}` (registered: {})",
                    manifest.name,
                    manifest.factory,
                    self.factories.keys().join(", ")
                ),
            })?;

        let mut available = self.available.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = available.iter().find(|e| e.name() == manifest.name) {
            if existing.origin() != &origin {
                warn!(
                    category = K::NAME,
                    plugin = %manifest.name,
                    kept = %existing.origin(),
                    ignored = %origin,
                    "duplicate plugin name, keeping first registration"
                );
            }
            return Ok(Arc::clone(existing));
        }

        debug!(category = K::NAME, plugin = %manifest.name, origin = %origin, "registered plugin");
        let entry = Arc::new(PluginEntry::new(manifest, origin, factory));
        available.push(Arc::clone(&entry));
        Ok(entry)
    }

    /// The enabled instance named `name`. Disabled plugins are not returned.
    pub fn get(&self, name: &str) -> Option<Arc<K::Instance>> {
        self.entry(name)?.instance()
    }

    /// The available entry named `name`, enabled or not.
    pub fn entry(&self, name: &str) -> Option<Arc<Entry<K>>> {
        self.read_available()
            .iter()
            .find(|e| e.name() == name)
            .cloned()
    }

    /// Every available plugin type, in discovery order.
    pub fn list_available(&self) -> Vec<Arc<Entry<K>>> {
        self.read_available().clone()
    }

    pub fn describe_available(&self) -> Vec<PluginInfo> {
        self.list_available().iter().map(|e| e.describe()).collect()
    }

    /// Instances of every enabled plugin, in discovery order.
    pub fn list_enabled(&self) -> Vec<Arc<K::Instance>> {
        self.list_available()
            .iter()
            .filter_map(|e| e.instance())
            .collect()
    }

    /// Names of every enabled plugin, in discovery order.
    pub fn enabled_names(&self) -> Vec<String> {
        self.list_available()
            .iter()
            .filter(|e| e.enabled())
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Enable one plugin. `Ok(false)` means its construction failed.
    pub fn enable(&self, name: &str) -> Result<bool, BinderyError> {
        Ok(self.require(name)?.enable())
    }

    pub fn disable(&self, name: &str) -> Result<(), BinderyError> {
        self.require(name)?.disable();
        Ok(())
    }

    /// Enable available plugins in bulk; returns how many are enabled afterwards
    /// out of those selected.
    ///
    /// With `use_config` the persisted list selects the plugins; names that
    /// are not available are ignored. Without it every plugin is enabled.
    /// A plugin that fails to construct does not stop the others.
    pub fn enable_all(&self, use_config: bool) -> Result<usize, BinderyError> {
        let _admin = self.lock_admin();
        let available = self.list_available();

        let selected: Vec<Arc<Entry<K>>> = if use_config {
            let list = self.store.load_enabled(K::CONFIG_KEY)?.unwrap_or_default();
            let names = parse_enabled_list(&list);
            for name in &names {
                if !available.iter().any(|e| e.name() == *name) {
                    debug!(category = K::NAME, plugin = %name, "configured plugin is not available");
                }
            }
            available
                .into_iter()
                .filter(|e| names.iter().any(|name| *name == e.name()))
                .collect()
        } else {
            for entry in &available {
                info!(
                    category = K::NAME,
                    plugin = %entry.name(),
                    description = %entry.manifest().description,
                    "enabling plugin"
                );
            }
            available
        };

        let enabled = selected.iter().filter(|entry| entry.enable()).count();
        info!(
            category = K::NAME,
            enabled,
            selected = selected.len(),
            from_config = use_config,
            "enabled plugins"
        );
        Ok(enabled)
    }

    /// Persist the names of the enabled plugins and return the saved list.
    pub fn save_to_config(&self) -> Result<String, BinderyError> {
        let _admin = self.lock_admin();
        let value = self.enabled_names().join(",");
        self.store.save_enabled(K::CONFIG_KEY, &value)?;
        info!(category = K::NAME, key = K::CONFIG_KEY, enabled = %value, "saved enabled plugins");
        Ok(value)
    }

    fn require(&self, name: &str) -> Result<Arc<Entry<K>>, BinderyError> {
        self.entry(name).ok_or_else(|| BinderyError::PluginNotFound {
            category: K::NAME.to_string(),
            name: name.to_string(),
        })
    }

    fn read_available(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<Entry<K>>>> {
        self.available.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_admin(&self) -> std::sync::MutexGuard<'_, ()> {
        self.admin.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: PluginKind> std::fmt::Debug for PluginCategory<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCategory")
            .field("name", &K::NAME)
            .field("search_roots", &self.search_roots)
            .field("available", &*self.read_available())
            .finish()
    }
}
