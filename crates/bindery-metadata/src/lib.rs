// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata providers for Bindery.
//!
//! Binds the generic plugin registry to the [`MetadataProvider`] capability,
//! ships the compiled-in provider catalog and dispatches book searches to
//! every enabled provider concurrently.
//!
//! [`MetadataProvider`]: bindery_core::MetadataProvider

pub mod bootstrap;
pub mod catalog;
pub mod dispatch;
pub mod kind;

pub use bootstrap::{build_category, initialize, resolve_search_roots};
pub use catalog::{builtin_manifests, factory_table};
pub use dispatch::{MetadataSearch, ProviderResults, SearchOutcome, SearchReport};
pub use kind::{MetadataProviderCategory, MetadataProviders};
