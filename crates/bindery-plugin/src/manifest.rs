// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `plugin.toml` files.
//!
//! A manifest carries a plugin type's identity (name, title, description,
//! version) and names the registered factory that builds its instances.
//! Built-in plugins construct their manifests in code; dropped-in packages
//! ship a `plugin.toml`.

use std::path::Path;

use bindery_core::types::is_plugin_name;
use bindery_core::BinderyError;
use serde::Deserialize;

/// Parsed plugin manifest describing one plugin type.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginManifest {
    /// Unique, stable identifier; the lookup key and the persisted name.
    pub name: String,
    /// Display name.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Version display string. Not interpreted.
    pub version: String,
    /// Optional author identifier.
    pub author: Option<String>,
    /// Key of the registered factory that builds instances.
    pub factory: String,
    /// Free-form settings handed to the factory.
    pub settings: toml::Table,
}

impl PluginManifest {
    /// Creates a manifest whose title and factory key default to `name`.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            factory: name.clone(),
            name,
            description: String::new(),
            version: version.into(),
            author: None,
            settings: toml::Table::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = factory.into();
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Returns a string setting, if present.
    ///
    /// A value of any other type fails with [`BinderyError::Enable`].
    pub fn setting_str(&self, key: &str) -> Result<Option<&str>, BinderyError> {
        match self.settings.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.setting_type_error(key, "a string", value)),
        }
    }

    /// Returns an integer setting, if present.
    ///
    /// A value of any other type fails with [`BinderyError::Enable`].
    pub fn setting_int(&self, key: &str) -> Result<Option<i64>, BinderyError> {
        match self.settings.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_integer()
                .map(Some)
                .ok_or_else(|| self.setting_type_error(key, "an integer", value)),
        }
    }

    fn setting_type_error(&self, key: &str, expected: &str, value: &toml::Value) -> BinderyError {
        BinderyError::Enable {
            name: self.name.clone(),
            message: format!(
                "setting `{key}` must be {expected}, got {} `{value}`",
                value.type_str()
            ),
        }
    }
}

/// Intermediate TOML deserialization struct for `plugin.toml`.
#[derive(Debug, Deserialize)]
struct PluginManifestFile {
    plugin: PluginSection,
    #[serde(default)]
    settings: toml::Table,
}

/// The `[plugin]` section of a `plugin.toml` file.
#[derive(Debug, Deserialize)]
struct PluginSection {
    name: String,
    title: Option<String>,
    #[serde(default)]
    description: String,
    version: String,
    author: Option<String>,
    factory: Option<String>,
}

/// Parse a plugin manifest from TOML content.
///
/// Validates that the name is a plugin identifier and the version is non-empty.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<PluginManifest, BinderyError> {
    let file: PluginManifestFile = toml::from_str(toml_content)
        .map_err(|e| BinderyError::Config(format!("invalid plugin manifest: {e}")))?;

    let section = file.plugin;

    if !is_plugin_name(&section.name) {
        return Err(BinderyError::Config(format!(
            "plugin manifest: name `{}` must be non-empty and contain only alphanumerics, hyphens, underscores",
            section.name
        )));
    }

    if section.version.trim().is_empty() {
        return Err(BinderyError::Config(
            "plugin manifest: version must not be empty".to_string(),
        ));
    }

    let title = section
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| section.name.clone());
    let factory = section
        .factory
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| section.name.clone());

    Ok(PluginManifest {
        name: section.name,
        title,
        description: section.description,
        version: section.version,
        author: section.author,
        factory,
        settings: file.settings,
    })
}

/// Read and parse the manifest at `path`.
///
/// Any failure is reported as a [`BinderyError::Discovery`] naming the file.
pub fn load_manifest(path: &Path) -> Result<PluginManifest, BinderyError> {
    let content = std::fs::read_to_string(path).map_err(|e| BinderyError::Discovery {
        path: path.display().to_string(),
        message: format!("unreadable manifest: {e}"),
    })?;
    parse_plugin_manifest(&content).map_err(|e| BinderyError::Discovery {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_manifest() {
        let toml = r#"
[plugin]
name = "openlibrary"
title = "Open Library"
version = "0.3.0"
description = "Open Library search"
author = "Bindery Contributors"
factory = "google"

[settings]
base_url = "http://localhost:8080/volumes"
"#;
        let manifest = parse_plugin_manifest(toml).unwrap();
        assert_eq!(manifest.name, "openlibrary");
        assert_eq!(manifest.title, "Open Library");
        assert_eq!(manifest.version, "0.3.0");
        assert_eq!(manifest.factory, "google");
        assert_eq!(manifest.author.as_deref(), Some("Bindery Contributors"));
        assert_eq!(
            manifest.setting_str("base_url").unwrap(),
            Some("http://localhost:8080/volumes")
        );
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[plugin]
name = "minimal"
version = "1.0"
"#;
        let manifest = parse_plugin_manifest(toml).unwrap();
        assert_eq!(manifest, PluginManifest::new("minimal", "1.0"));
        assert!(manifest.description.is_empty());
        assert!(manifest.settings.is_empty());
    }

    #[test]
    fn parse_invalid_name() {
        let toml = r#"
[plugin]
name = "two words"
version = "0.1.0"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("two words"));
    }

    #[test]
    fn parse_missing_version() {
        let toml = r#"
[plugin]
name = "test"
version = " "
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("version must not be empty"));
    }

    #[test]
    fn parse_missing_plugin_section() {
        assert!(parse_plugin_manifest("[settings]\nx = 1\n").is_err());
    }

    #[test]
    fn load_manifest_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.toml");
        std::fs::write(&path, "not toml [").unwrap();

        match load_manifest(&path).unwrap_err() {
            BinderyError::Discovery { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected discovery error, got {other:?}"),
        }
    }

    #[test]
    fn builder_settings() {
        let manifest = PluginManifest::new("google", "1.0")
            .with_title("Google")
            .with_setting("count", 5_i64);
        assert_eq!(manifest.title, "Google");
        assert_eq!(manifest.factory, "google");
        assert_eq!(manifest.setting_int("count").unwrap(), Some(5));
        assert_eq!(manifest.setting_str("missing").unwrap(), None);
    }

    #[test]
    fn mistyped_setting_is_an_enable_error() {
        let manifest = PluginManifest::new("google", "1.0")
            .with_setting("count", "ten")
            .with_setting("base_url", 5_i64);

        let err = manifest.setting_int("count").unwrap_err();
        assert!(matches!(err, BinderyError::Enable { ref name, .. } if name == "google"));
        assert!(err.to_string().contains("setting `count` must be an integer"));

        let err = manifest.setting_str("base_url").unwrap_err();
        assert!(err.to_string().contains("setting `base_url` must be a string"));
    }
}
