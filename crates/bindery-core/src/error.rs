// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Bindery plugin framework.

use thiserror::Error;

/// The primary error type shared by the plugin registry, providers, and configuration.
#[derive(Debug, Error)]
pub enum BinderyError {
    /// Configuration errors (invalid TOML, bad values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// A candidate plugin package could not be loaded during discovery.
    #[error("failed to load plugin package at {path}: {message}")]
    Discovery { path: String, message: String },

    /// No available plugin with this name exists in the category.
    #[error("plugin not found: {category}/{name}")]
    PluginNotFound { category: String, name: String },

    /// Constructing a plugin instance failed.
    #[error("failed to enable plugin {name}: {message}")]
    Enable { name: String, message: String },

    /// The plugin declares a capability but does not implement the operation.
    #[error("plugin {plugin} does not implement {operation}")]
    NotImplemented {
        plugin: String,
        operation: &'static str,
    },

    /// The upstream catalog service failed (transport error, bad status, bad body).
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Persisting configuration failed.
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BinderyError {
    /// Returns true for errors that indicate a packaging or programming defect
    /// rather than a routine "nothing found" or degraded upstream.
    pub fn is_defect(&self) -> bool {
        matches!(self, BinderyError::NotImplemented { .. })
    }
}
