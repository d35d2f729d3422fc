// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits for the Bindery plugin architecture.
//!
//! Every plugin instance implements [`Plugin`]; each plugin kind adds its own
//! capability trait on top (today only [`MetadataProvider`]).

pub mod metadata;
pub mod plugin;
pub mod store;

pub use metadata::MetadataProvider;
pub use plugin::Plugin;
pub use store::EnabledListStore;
