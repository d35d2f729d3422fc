// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Factories and manifests for wiring mock providers into a category.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bindery_core::{BinderyError, MetadataProvider};
use bindery_plugin::{PluginFactory, PluginManifest};

use crate::mock_provider::MockProvider;

/// Hands out clones of one shared [`MockProvider`] so tests can inspect it.
#[derive(Debug)]
pub struct SharedFactory {
    provider: Arc<MockProvider>,
    created: AtomicUsize,
}

impl SharedFactory {
    pub fn new(provider: Arc<MockProvider>) -> Self {
        Self {
            provider,
            created: AtomicUsize::new(0),
        }
    }

    /// How many times `create` was called.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl PluginFactory<dyn MetadataProvider> for SharedFactory {
    fn create(&self, _manifest: &PluginManifest) -> Result<Arc<dyn MetadataProvider>, BinderyError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.provider.clone())
    }
}

/// A factory that always fails to build.
#[derive(Debug, Clone)]
pub struct FailingFactory {
    message: String,
}

impl FailingFactory {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl PluginFactory<dyn MetadataProvider> for FailingFactory {
    fn create(&self, manifest: &PluginManifest) -> Result<Arc<dyn MetadataProvider>, BinderyError> {
        Err(BinderyError::Enable {
            name: manifest.name.clone(),
            message: self.message.clone(),
        })
    }
}

/// Factory for a shared mock provider.
pub fn mock_factory(provider: Arc<MockProvider>) -> Arc<dyn PluginFactory<dyn MetadataProvider>> {
    Arc::new(SharedFactory::new(provider))
}

/// Manifest for a mock provider whose factory key equals its name.
pub fn mock_manifest(name: &str) -> PluginManifest {
    PluginManifest::new(name, "0.0.1")
        .with_title(format!("Mock {name}"))
        .with_description(format!("Mock provider {name}"))
}
