// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the providers, and the host application.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What the application knows about a book when it asks for metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    /// Title as currently stored in the local catalog.
    pub title: String,
    /// Known authors, in catalog order.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Local catalog identifier, if the book already exists.
    #[serde(default)]
    pub book_id: Option<String>,
}

impl BookQuery {
    /// Creates a query from a title only.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Resolves the search term: the override title when given, otherwise the
    /// stored title. Returns `None` when the result is blank.
    pub fn effective_title<'a>(&'a self, overrides: &'a SearchOverrides) -> Option<&'a str> {
        let title = overrides.title.as_deref().unwrap_or(&self.title).trim();
        if title.is_empty() { None } else { Some(title) }
    }
}

/// Caller-supplied replacements for fields of a [`BookQuery`].
///
/// Only the title can be overridden today; unknown keys coming from an
/// open-ended source (query string, form) are dropped by [`SearchOverrides::from_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOverrides {
    /// Replaces the query title as the search term.
    #[serde(default)]
    pub title: Option<String>,
}

impl SearchOverrides {
    /// Overrides nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Overrides the title search term.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Builds overrides from string pairs, ignoring keys that are not recognised.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "title" => overrides.title = Some(value.into()),
                other => tracing::trace!(key = other, "ignoring unknown search override"),
            }
        }
        overrides
    }
}

/// Lifecycle state of a plugin type, as shown to administrators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginStatus {
    /// An instance exists and is in use.
    Enabled,
    /// No instance exists.
    Disabled,
    /// The last enable attempt failed; no instance exists.
    Failed,
}

/// Snapshot of a plugin type's identity and lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub enabled: bool,
    pub status: PluginStatus,
    /// Reason for the most recent failed enable, cleared on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Plugin names are identifiers: ASCII alphanumerics, `-` and `_`.
///
/// Names are persisted in comma-separated lists, so anything else would not
/// survive a save.
pub fn is_plugin_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn effective_title_prefers_override() {
        let query = BookQuery::titled("Dune");
        let overrides = SearchOverrides::with_title("Dune Messiah");
        assert_eq!(query.effective_title(&overrides), Some("Dune Messiah"));
        assert_eq!(query.effective_title(&SearchOverrides::none()), Some("Dune"));
    }

    #[test]
    fn blank_effective_title_is_none() {
        assert_eq!(BookQuery::titled("   ").effective_title(&SearchOverrides::none()), None);
        // An explicit empty override wins over the stored title.
        let query = BookQuery::titled("Dune");
        assert_eq!(query.effective_title(&SearchOverrides::with_title("")), None);
    }

    #[test]
    fn from_pairs_ignores_unknown_keys() {
        let overrides = SearchOverrides::from_pairs([("isbn", "123"), ("title", "Emma")]);
        assert_eq!(overrides, SearchOverrides::with_title("Emma"));

        let overrides = SearchOverrides::from_pairs([("publisher", "Ace")]);
        assert_eq!(overrides, SearchOverrides::none());
    }

    #[test]
    fn plugin_name_rules() {
        assert!(is_plugin_name("google"));
        assert!(is_plugin_name("open_library-2"));
        assert!(!is_plugin_name("two words"));
        assert!(!is_plugin_name("a,b"));
        assert!(!is_plugin_name(""));
    }

    #[test]
    fn plugin_status_display_round_trip() {
        for status in [PluginStatus::Enabled, PluginStatus::Disabled, PluginStatus::Failed] {
            let parsed = PluginStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(PluginStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn plugin_info_omits_missing_error() {
        let info = PluginInfo {
            name: "google".into(),
            title: "Google".into(),
            description: "A Google metadata provider".into(),
            version: "0.1".into(),
            enabled: true,
            status: PluginStatus::Enabled,
            last_error: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["status"], "enabled");
        assert!(json.get("last_error").is_none());
    }
}
