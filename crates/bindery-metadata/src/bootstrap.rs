// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup sequence for the metadata-provider category.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bindery_config::BinderyConfig;
use bindery_core::{BinderyError, EnabledListStore};
use tracing::info;

use crate::catalog::{builtin_manifests, factory_table};
use crate::kind::MetadataProviderCategory;

/// Resolves `plugins.directories`. Relative entries are taken relative to
/// `base_dir` (the config file's directory) when given, else left as-is so
/// they resolve against the working directory.
pub fn resolve_search_roots(config: &BinderyConfig, base_dir: Option<&Path>) -> Vec<PathBuf> {
    config
        .plugins
        .directories
        .iter()
        .map(PathBuf::from)
        .map(|dir| match base_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        })
        .collect()
}

/// Builds the category with the compiled-in catalog without discovering
/// or enabling anything.
pub fn build_category(
    config: &BinderyConfig,
    store: Arc<dyn EnabledListStore>,
    base_dir: Option<&Path>,
) -> MetadataProviderCategory {
    builtin_manifests()
        .into_iter()
        .fold(MetadataProviderCategory::builder(store), |builder, manifest| {
            builder.builtin(manifest)
        })
        .search_roots(resolve_search_roots(config, base_dir))
        .factories(factory_table(config))
        .build()
}

/// Builds the category, discovers every available provider and enables
/// the ones named in the persisted enabled list.
///
/// Broken packages and providers that fail to construct are logged and
/// skipped. Only a failure to read the enabled list is returned.
pub fn initialize(
    config: &BinderyConfig,
    store: Arc<dyn EnabledListStore>,
    base_dir: Option<&Path>,
) -> Result<MetadataProviderCategory, BinderyError> {
    let category = build_category(config, store, base_dir);
    let available = category.load_available();
    let enabled = category.enable_all(true)?;
    info!(
        available = available.len(),
        enabled,
        providers = %category.enabled_names().join(","),
        "metadata providers initialized"
    );
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_roots_follow_base_dir() {
        let mut config = BinderyConfig::default();
        config.plugins.directories = vec!["plugins".into(), "/opt/bindery/plugins".into()];

        let roots = resolve_search_roots(&config, Some(Path::new("/etc/bindery")));
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/etc/bindery/plugins"),
                PathBuf::from("/opt/bindery/plugins"),
            ]
        );

        let roots = resolve_search_roots(&config, None);
        assert_eq!(roots[0], PathBuf::from("plugins"));
    }
}
