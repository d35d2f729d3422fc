// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Bindery.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Config key under `[plugins.enabled]` holding the metadata-provider list.
pub const METADATA_PROVIDERS_KEY: &str = "metadata_providers";

/// Top-level Bindery configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BinderyConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Plugin discovery and enabled-set persistence.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Settings shared by all metadata providers.
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Google Books provider settings.
    #[serde(default)]
    pub google: GoogleConfig,

    /// Douban provider settings.
    #[serde(default)]
    pub douban: DoubanConfig,
}

impl BinderyConfig {
    /// Returns the stored enabled list for a category config key.
    pub fn enabled_list(&self, key: &str) -> Option<&str> {
        self.plugins.enabled.get(key).map(String::as_str)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Plugin discovery and persistence configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Root directories searched for plugin packages. Each category looks in
    /// its own subdirectory of every root. Relative roots resolve against the
    /// directory of the config file.
    #[serde(default = "default_plugin_directories")]
    pub directories: Vec<String>,

    /// Comma-separated enabled plugin names, keyed by category config key.
    #[serde(default = "default_enabled")]
    pub enabled: BTreeMap<String, String>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            directories: default_plugin_directories(),
            enabled: default_enabled(),
        }
    }
}

fn default_plugin_directories() -> Vec<String> {
    vec!["plugins".to_string()]
}

fn default_enabled() -> BTreeMap<String, String> {
    BTreeMap::from([(METADATA_PROVIDERS_KEY.to_string(), "douban,google".to_string())])
}

/// Settings shared by all metadata providers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataConfig {
    /// Per-provider request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent to upstream catalogs.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Cover used when a provider has no image for a candidate.
    #[serde(default = "default_cover")]
    pub default_cover: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            default_cover: default_cover(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:68.0) Gecko/20100101 Firefox/68.0".to_string()
}

fn default_cover() -> String {
    "/static/generic_cover.jpg".to_string()
}

/// Google Books provider configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// Volumes search endpoint.
    #[serde(default = "default_google_base_url")]
    pub base_url: String,

    /// Optional API key, sent as the `key` parameter.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
            api_key: None,
        }
    }
}

fn default_google_base_url() -> String {
    "https://www.googleapis.com/books/v1/volumes".to_string()
}

/// Douban provider configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DoubanConfig {
    /// Book search endpoint.
    #[serde(default = "default_douban_base_url")]
    pub base_url: String,

    /// Optional API key, sent as the `apikey` parameter.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Maximum number of results requested per search.
    #[serde(default = "default_douban_count")]
    pub count: u32,
}

impl Default for DoubanConfig {
    fn default() -> Self {
        Self {
            base_url: default_douban_base_url(),
            api_key: None,
            count: default_douban_count(),
        }
    }
}

fn default_douban_base_url() -> String {
    "https://api.douban.com/v2/book/search".to_string()
}

fn default_douban_count() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_both_builtin_providers() {
        let config = BinderyConfig::default();
        assert_eq!(config.enabled_list(METADATA_PROVIDERS_KEY), Some("douban,google"));
        assert_eq!(config.plugins.directories, vec!["plugins"]);
        assert_eq!(config.metadata.timeout_secs, 10);
    }

    #[test]
    fn missing_category_key_is_none() {
        let config = BinderyConfig::default();
        assert_eq!(config.enabled_list("cover_sources"), None);
    }
}
