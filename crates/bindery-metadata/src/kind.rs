// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use bindery_config::METADATA_PROVIDERS_KEY;
use bindery_core::MetadataProvider;
use bindery_plugin::{PluginCategory, PluginKind};

/// The metadata-provider plugin kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataProviders;

impl PluginKind for MetadataProviders {
    type Instance = dyn MetadataProvider;

    const NAME: &'static str = "metadata_provider";
    const SUBDIRECTORY: &'static str = "metadata_providers";
    const CONFIG_KEY: &'static str = METADATA_PROVIDERS_KEY;
}

/// Registry of metadata providers.
pub type MetadataProviderCategory = PluginCategory<MetadataProviders>;
