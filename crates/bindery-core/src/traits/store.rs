// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence seam for the per-category enabled-plugin lists.

use crate::error::BinderyError;

/// Reads and writes the comma-separated list of enabled plugin names that
/// each category keeps under its own configuration key.
pub trait EnabledListStore: Send + Sync {
    /// Returns the stored list for `key`, or `None` when nothing is stored.
    fn load_enabled(&self, key: &str) -> Result<Option<String>, BinderyError>;

    /// Stores `value` under `key` and persists it.
    fn save_enabled(&self, key: &str, value: &str) -> Result<(), BinderyError>;
}
