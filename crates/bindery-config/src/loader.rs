// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./bindery.toml` > `~/.config/bindery/bindery.toml` > `/etc/bindery/bindery.toml`
//! with environment variable overrides via `BINDERY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BinderyConfig;

/// File name looked up in each directory of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "bindery.toml";

const SYSTEM_CONFIG_PATH: &str = "/etc/bindery/bindery.toml";

/// Returns the per-user config path (`~/.config/bindery/bindery.toml`), if a
/// config directory exists on this platform.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bindery").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/bindery/bindery.toml` (system-wide)
/// 3. `~/.config/bindery/bindery.toml` (user XDG config)
/// 4. `./bindery.toml` (local directory)
/// 5. `BINDERY_*` environment variables
pub fn load_config() -> Result<BinderyConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BinderyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BinderyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BinderyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BinderyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BinderyConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `BINDERY_METADATA_TIMEOUT_SECS` must map to
/// `metadata.timeout_secs`, not `metadata.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("BINDERY_").map(|key| env_key_path(key.as_str()).into())
}

/// Sections whose fields may be set from the environment.
const ENV_SECTIONS: [&str; 4] = ["logging", "metadata", "google", "douban"];

/// Map a prefix-stripped variable name such as `METADATA_TIMEOUT_SECS` to
/// its dotted key path. Figment hands the key over before lowercasing it.
fn env_key_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(field) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{field}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_section_fields() {
        assert_eq!(env_key_path("METADATA_TIMEOUT_SECS"), "metadata.timeout_secs");
        assert_eq!(env_key_path("LOGGING_LEVEL"), "logging.level");
        assert_eq!(env_key_path("google_base_url"), "google.base_url");
        assert_eq!(env_key_path("DOUBAN_API_KEY"), "douban.api_key");
    }

    #[test]
    fn unknown_env_keys_are_only_lowercased() {
        assert_eq!(env_key_path("METADATAX"), "metadatax");
        assert_eq!(env_key_path("PLUGINS"), "plugins");
    }
}
