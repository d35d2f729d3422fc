// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use bindery_core::Plugin;

/// Binds a [`PluginCategory`](crate::PluginCategory) to one capability.
///
/// Implemented by a zero-sized marker per plugin kind. Everything that
/// differs between categories lives here; the registry itself is generic.
pub trait PluginKind: Send + Sync + 'static {
    /// The capability trait object instances are handed out as,
    /// e.g. `dyn MetadataProvider`.
    type Instance: ?Sized + Plugin;

    /// Category name used in logs and errors.
    const NAME: &'static str;

    /// Subdirectory of each search root holding this kind's packages.
    const SUBDIRECTORY: &'static str;

    /// Configuration key the enabled list is persisted under.
    const CONFIG_KEY: &'static str;
}
