// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic plugin categories for Bindery.
//!
//! A category manages the plugins of one kind (see [`PluginKind`]). Plugin
//! types come from two places: manifests compiled into the binary, and
//! `plugin.toml` packages found under the configured search roots. Either way
//! a manifest names a factory registered in a [`FactoryTable`], which builds
//! the single live instance when the plugin is enabled.

pub mod category;
pub mod discovery;
pub mod kind;
pub mod manifest;
pub mod registry;

pub use category::{parse_enabled_list, PluginCategory, PluginCategoryBuilder};
pub use discovery::{scan_root, DiscoveredPackage, MANIFEST_FILE};
pub use kind::PluginKind;
pub use manifest::{load_manifest, parse_plugin_manifest, PluginManifest};
pub use registry::{FactoryTable, PluginEntry, PluginFactory, PluginOrigin};
