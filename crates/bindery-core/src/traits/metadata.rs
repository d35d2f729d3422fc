// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metadata-search capability implemented by provider plugins (Google Books, Douban, etc.).

use async_trait::async_trait;

use crate::candidate::BookCandidate;
use crate::error::BinderyError;
use crate::traits::plugin::Plugin;
use crate::types::{BookQuery, SearchOverrides};

/// Capability of looking up book candidates in an external catalog.
///
/// Implementations follow a degrade-silently contract:
/// - a blank effective title returns `Ok(vec![])` without any network call;
/// - an unreachable upstream, a non-success status, or an unparsable body
///   returns `Ok(vec![])`, logging the failure;
/// - `query` is never mutated.
///
/// The default body fails with [`BinderyError::NotImplemented`], so a provider
/// that forgets to implement the search is distinguishable from one that
/// simply found nothing.
#[async_trait]
pub trait MetadataProvider: Plugin {
    /// Searches the upstream catalog for candidates matching the query.
    async fn search_results(
        &self,
        query: &BookQuery,
        overrides: &SearchOverrides,
    ) -> Result<Vec<BookCandidate>, BinderyError> {
        let _ = (query, overrides);
        Err(BinderyError::NotImplemented {
            plugin: self.name().to_string(),
            operation: "search_results",
        })
    }
}
