// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Providers compiled into this build.
//!
//! Each enabled cargo feature contributes a factory, keyed by the provider
//! name, and a built-in manifest. Dropped-in packages reuse the same
//! factories through their manifest's `factory` key.

use bindery_config::BinderyConfig;
use bindery_core::MetadataProvider;
use bindery_plugin::{FactoryTable, PluginManifest};

/// Built-in manifests, in discovery order.
pub fn builtin_manifests() -> Vec<PluginManifest> {
    #[allow(unused_mut)]
    let mut manifests = Vec::new();
    #[cfg(feature = "douban")]
    manifests.push(bindery_douban::manifest());
    #[cfg(feature = "google")]
    manifests.push(bindery_google::manifest());
    manifests
}

/// Factories for every compiled-in provider, configured from `config`.
#[allow(unused_variables)]
pub fn factory_table(config: &BinderyConfig) -> FactoryTable<dyn MetadataProvider> {
    #[allow(unused_mut)]
    let mut table = FactoryTable::new();
    #[cfg(feature = "douban")]
    table.register(bindery_douban::PROVIDER_NAME, bindery_douban::factory(config));
    #[cfg(feature = "google")]
    table.register(bindery_google::PROVIDER_NAME, bindery_google::factory(config));
    table
}
