// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Bindery metadata plugin framework.
//!
//! This crate provides the error taxonomy, the book query and candidate
//! types, and the capability traits that every plugin kind and every
//! provider implementation build on.

pub mod candidate;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use candidate::{BookCandidate, CandidateSource};
pub use error::BinderyError;
pub use types::{BookQuery, PluginInfo, PluginStatus, SearchOverrides};

pub use traits::{EnabledListStore, MetadataProvider, Plugin};

#[cfg(test)]
mod tests {
    use super::*;

    struct Unfinished;

    impl Plugin for Unfinished {
        fn name(&self) -> &str {
            "unfinished"
        }
    }

    #[async_trait::async_trait]
    impl MetadataProvider for Unfinished {}

    #[tokio::test]
    async fn default_search_fails_loudly() {
        let provider = Unfinished;
        let err = provider
            .search_results(&BookQuery::titled("Dune"), &SearchOverrides::none())
            .await
            .unwrap_err();
        assert!(err.is_defect());
        assert_eq!(
            err.to_string(),
            "plugin unfinished does not implement search_results"
        );
    }

    #[test]
    fn metadata_provider_is_object_safe() {
        fn _assert_object(_: &dyn MetadataProvider) {}
        fn _assert_store(_: &dyn EnabledListStore) {}
    }
}
