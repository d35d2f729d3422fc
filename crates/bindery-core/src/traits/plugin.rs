// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all plugin instances implement.

/// The base trait for live plugin instances.
///
/// Identity metadata (title, description, version) belongs to the plugin
/// *type* and lives in its manifest; an instance only needs to know the
/// name it was enabled under so callers can attribute results and logs.
pub trait Plugin: Send + Sync + 'static {
    /// Returns the unique plugin name this instance was created for.
    fn name(&self) -> &str;
}
