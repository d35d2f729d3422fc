// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem discovery of plugin packages.
//!
//! A package is a directory `<root>/<subdirectory>/<package>/` containing a
//! `plugin.toml`. Discovery only reads manifests; turning them into plugin
//! types is the category's job.

use std::path::{Path, PathBuf};

use bindery_core::BinderyError;
use tracing::{debug, trace};

use crate::manifest::{load_manifest, PluginManifest};

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// A package directory and its parsed manifest.
#[derive(Debug, Clone)]
pub struct DiscoveredPackage {
    pub path: PathBuf,
    pub manifest: PluginManifest,
}

/// Scan `<root>/<subdirectory>` for packages, in sorted directory order.
///
/// A missing directory yields nothing. Each package produces its own result
/// so one broken manifest never hides the others.
pub fn scan_root(root: &Path, subdirectory: &str) -> Vec<Result<DiscoveredPackage, BinderyError>> {
    let dir = root.join(subdirectory);
    if !dir.is_dir() {
        debug!(path = %dir.display(), "plugin directory does not exist, skipping");
        return Vec::new();
    }

    let read_dir = match std::fs::read_dir(&dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            return vec![Err(BinderyError::Discovery {
                path: dir.display().to_string(),
                message: format!("cannot read plugin directory: {e}"),
            })];
        }
    };

    let mut packages: Vec<PathBuf> = read_dir
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    packages.sort();

    packages
        .into_iter()
        .filter_map(|package| {
            let manifest_path = package.join(MANIFEST_FILE);
            if !manifest_path.is_file() {
                trace!(path = %package.display(), "no plugin.toml, not a plugin package");
                return None;
            }
            Some(load_manifest(&manifest_path).map(|manifest| DiscoveredPackage {
                path: package,
                manifest,
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_package(root: &Path, name: &str, manifest: &str) {
        let dir = root.join("gadgets").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let root = tempfile::tempdir().unwrap();
        assert!(scan_root(root.path(), "gadgets").is_empty());
    }

    #[test]
    fn packages_are_sorted_and_isolated() {
        let root = tempfile::tempdir().unwrap();
        write_package(root.path(), "zeta", "[plugin]\nname = \"zeta\"\nversion = \"1\"\n");
        write_package(root.path(), "broken", "[plugin]\nname = \n");
        write_package(root.path(), "alpha", "[plugin]\nname = \"alpha\"\nversion = \"1\"\n");
        // Not a package: no manifest.
        std::fs::create_dir_all(root.path().join("gadgets").join("assets")).unwrap();
        // Not a package: plain file.
        std::fs::write(root.path().join("gadgets").join("README"), "hi").unwrap();

        let results = scan_root(root.path(), "gadgets");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().manifest.name, "alpha");
        assert!(matches!(results[1], Err(BinderyError::Discovery { .. })));
        assert_eq!(results[2].as_ref().unwrap().manifest.name, "zeta");
        assert!(results[2].as_ref().unwrap().path.ends_with("zeta"));
    }
}
