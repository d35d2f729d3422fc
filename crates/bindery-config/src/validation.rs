// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express, such
//! as URL schemes and bounded timeouts. Enabled-plugin lists are only
//! checked for names that can never match a plugin; those are logged and
//! left for the category to ignore.

use bindery_core::types::is_plugin_name;
use tracing::warn;

use crate::diagnostic::ConfigError;
use crate::model::BinderyConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for `metadata.timeout_secs` (one hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &BinderyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` must be one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for dir in &config.plugins.directories {
        if dir.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "plugins.directories entries must not be empty".to_string(),
            });
        }
    }

    for (key, list) in &config.plugins.enabled {
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !is_plugin_name(name) {
                warn!(
                    key = %key,
                    name = %name,
                    "plugins.enabled list names an invalid plugin, it will be ignored"
                );
            }
        }
    }

    if config.metadata.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "metadata.timeout_secs must be greater than 0".to_string(),
        });
    } else if config.metadata.timeout_secs > MAX_TIMEOUT_SECS {
        errors.push(ConfigError::Validation {
            message: format!(
                "metadata.timeout_secs must be at most {MAX_TIMEOUT_SECS}, got {}",
                config.metadata.timeout_secs
            ),
        });
    }

    if config.metadata.user_agent.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "metadata.user_agent must not be empty".to_string(),
        });
    }

    check_http_url("google.base_url", &config.google.base_url, &mut errors);
    check_http_url("douban.base_url", &config.douban.base_url, &mut errors);

    if !(1..=100).contains(&config.douban.count) {
        errors.push(ConfigError::Validation {
            message: format!(
                "douban.count must be between 1 and 100, got {}",
                config.douban.count
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(field: &str, value: &str, errors: &mut Vec<ConfigError>) {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    if rest.is_none_or(str::is_empty) {
        errors.push(ConfigError::Validation {
            message: format!("{field} `{value}` must be an http:// or https:// URL"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&BinderyConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = BinderyConfig::default();
        config.metadata.timeout_secs = 0;
        config.google.base_url = "ftp://books".to_string();
        config.douban.count = 0;
        config.logging.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    #[traced_test]
    fn invalid_enabled_names_only_warn() {
        let mut config = BinderyConfig::default();
        config.plugins.enabled.insert(
            "metadata_providers".to_string(),
            "google, Google Books".to_string(),
        );

        assert!(validate_config(&config).is_ok());
        assert!(logs_contain("invalid plugin"));
        assert!(logs_contain("Google Books"));
    }

    #[test]
    fn rejects_oversized_timeout() {
        let mut config = BinderyConfig::default();
        config.metadata.timeout_secs = MAX_TIMEOUT_SECS;
        assert!(validate_config(&config).is_ok());

        config.metadata.timeout_secs = u64::MAX;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("at most 3600"));
    }

    #[test]
    fn empty_enabled_list_is_valid() {
        let mut config = BinderyConfig::default();
        config
            .plugins
            .enabled
            .insert("metadata_providers".to_string(), String::new());
        assert!(validate_config(&config).is_ok());
    }
}
