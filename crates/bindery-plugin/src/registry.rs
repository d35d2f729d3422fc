// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Factory registration and the per-type lifecycle slot.
//!
//! A [`FactoryTable`] maps factory keys to the compiled-in code that builds
//! instances. A [`PluginEntry`] is one available plugin type: its manifest,
//! its factory, and a slot holding at most one live instance.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use bindery_core::{BinderyError, PluginInfo, PluginStatus};
use tracing::{error, info};

use crate::manifest::PluginManifest;

/// Builds instances of a plugin type from its manifest.
pub trait PluginFactory<P: ?Sized>: Send + Sync {
    /// Create a new instance. Errors leave the plugin disabled.
    fn create(&self, manifest: &PluginManifest) -> Result<Arc<P>, BinderyError>;
}

struct FnFactory<F>(F);

impl<P, F> PluginFactory<P> for FnFactory<F>
where
    P: ?Sized,
    F: Fn(&PluginManifest) -> Result<Arc<P>, BinderyError> + Send + Sync,
{
    fn create(&self, manifest: &PluginManifest) -> Result<Arc<P>, BinderyError> {
        (self.0)(manifest)
    }
}

/// Factory keys mapped to the implementations compiled into the binary.
pub struct FactoryTable<P: ?Sized + 'static> {
    factories: HashMap<String, Arc<dyn PluginFactory<P>>>,
}

impl<P: ?Sized + 'static> FactoryTable<P> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under `key`, replacing any previous one.
    pub fn register(&mut self, key: impl Into<String>, factory: Arc<dyn PluginFactory<P>>) {
        self.factories.insert(key.into(), factory);
    }

    /// Register a closure as the factory for `key`.
    pub fn register_fn<F>(&mut self, key: impl Into<String>, f: F)
    where
        F: Fn(&PluginManifest) -> Result<Arc<P>, BinderyError> + Send + Sync + 'static,
    {
        self.register(key, Arc::new(FnFactory(f)));
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn PluginFactory<P>>> {
        self.factories.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<P: ?Sized + 'static> Default for FactoryTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized + 'static> fmt::Debug for FactoryTable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryTable")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Where a plugin type was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOrigin {
    /// Compiled into the binary.
    Builtin,
    /// A package directory under a search root.
    Directory(PathBuf),
}

impl fmt::Display for PluginOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginOrigin::Builtin => write!(f, "builtin"),
            PluginOrigin::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

enum Slot<P: ?Sized> {
    Disabled,
    Enabled(Arc<P>),
    Failed(String),
}

/// One available plugin type and its instance slot.
///
/// The slot is swapped under a short write lock, so readers see either no
/// instance or a fully constructed one. Construction itself runs under a
/// separate per-entry lifecycle lock: concurrent `enable` calls build at most
/// one instance, and readers are never blocked by a slow factory.
pub struct PluginEntry<P: ?Sized + 'static> {
    manifest: PluginManifest,
    origin: PluginOrigin,
    factory: Arc<dyn PluginFactory<P>>,
    slot: RwLock<Slot<P>>,
    lifecycle: Mutex<()>,
}

impl<P: ?Sized + 'static> PluginEntry<P> {
    pub fn new(
        manifest: PluginManifest,
        origin: PluginOrigin,
        factory: Arc<dyn PluginFactory<P>>,
    ) -> Self {
        Self {
            manifest,
            origin,
            factory,
            slot: RwLock::new(Slot::Disabled),
            lifecycle: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    pub fn origin(&self) -> &PluginOrigin {
        &self.origin
    }

    /// Construct the instance if there is none. Returns whether the plugin
    /// is enabled afterwards; an already-enabled plugin is not rebuilt.
    ///
    /// Factory errors and panics are logged and recorded, never propagated.
    pub fn enable(&self) -> bool {
        let _lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        if self.enabled() {
            return true;
        }

        let created = panic::catch_unwind(AssertUnwindSafe(|| self.factory.create(&self.manifest)))
            .unwrap_or_else(|payload| {
                Err(BinderyError::Enable {
                    name: self.manifest.name.clone(),
                    message: panic_message(payload.as_ref()),
                })
            });

        match created {
            Ok(instance) => {
                *self.write_slot() = Slot::Enabled(instance);
                info!(
                    plugin = %self.manifest.name,
                    version = %self.manifest.version,
                    origin = %self.origin,
                    "plugin enabled"
                );
                true
            }
            Err(e) => {
                error!(plugin = %self.manifest.name, error = %e, "failed to enable plugin");
                *self.write_slot() = Slot::Failed(e.to_string());
                false
            }
        }
    }

    /// Drop the instance, if any. Holders of a clone keep it until they finish.
    pub fn disable(&self) {
        let _lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *self.write_slot(), Slot::Disabled);
        if matches!(previous, Slot::Enabled(_)) {
            info!(plugin = %self.manifest.name, "plugin disabled");
        }
    }

    pub fn enabled(&self) -> bool {
        matches!(*self.read_slot(), Slot::Enabled(_))
    }

    /// The live instance, if enabled.
    pub fn instance(&self) -> Option<Arc<P>> {
        match &*self.read_slot() {
            Slot::Enabled(instance) => Some(Arc::clone(instance)),
            _ => None,
        }
    }

    pub fn status(&self) -> PluginStatus {
        match &*self.read_slot() {
            Slot::Disabled => PluginStatus::Disabled,
            Slot::Enabled(_) => PluginStatus::Enabled,
            Slot::Failed(_) => PluginStatus::Failed,
        }
    }

    /// Snapshot of identity and lifecycle state for display.
    pub fn describe(&self) -> PluginInfo {
        let (status, last_error) = match &*self.read_slot() {
            Slot::Disabled => (PluginStatus::Disabled, None),
            Slot::Enabled(_) => (PluginStatus::Enabled, None),
            Slot::Failed(reason) => (PluginStatus::Failed, Some(reason.clone())),
        };
        PluginInfo {
            name: self.manifest.name.clone(),
            title: self.manifest.title.clone(),
            description: self.manifest.description.clone(),
            version: self.manifest.version.clone(),
            enabled: status == PluginStatus::Enabled,
            status,
            last_error,
        }
    }

    fn read_slot(&self) -> std::sync::RwLockReadGuard<'_, Slot<P>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Slot<P>> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: ?Sized + 'static> fmt::Debug for PluginEntry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginEntry")
            .field("manifest", &self.manifest)
            .field("origin", &self.origin)
            .field("status", &self.status())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("factory panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("factory panicked: {s}")
    } else {
        "factory panicked".to_string()
    }
}
