// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out of one book query to every enabled metadata provider.
//!
//! The category is only consulted for a snapshot of enabled instances; the
//! searches themselves run without any registry lock held. Every provider
//! call runs in its own task under its own timeout, so a hung or failing
//! provider costs the aggregate nothing but its own results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bindery_config::BinderyConfig;
use bindery_core::{
    BinderyError, BookCandidate, BookQuery, MetadataProvider, Plugin, SearchOverrides,
};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::kind::MetadataProviderCategory;

/// Added to the configured HTTP timeout so that a provider's own timeout
/// normally fires first and the provider degrades on its own terms.
pub const DISPATCH_GRACE: Duration = Duration::from_secs(2);

/// How one provider's part of a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Completed,
    Failed,
    TimedOut,
    NotImplemented,
}

/// One provider's contribution to a [`SearchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResults {
    pub provider: String,
    pub outcome: SearchOutcome,
    pub candidates: Vec<BookCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl ProviderResults {
    fn failed(provider: String, outcome: SearchOutcome, error: String, elapsed: Duration) -> Self {
        Self {
            provider,
            outcome,
            candidates: Vec::new(),
            error: Some(error),
            elapsed_ms: elapsed_ms(elapsed),
        }
    }
}

/// Per-provider results of one search, in enabled order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    pub results: Vec<ProviderResults>,
}

impl SearchReport {
    /// All candidates, grouped by provider in enabled order.
    pub fn candidates(&self) -> Vec<&BookCandidate> {
        self.results.iter().flat_map(|r| r.candidates.iter()).collect()
    }

    pub fn into_candidates(self) -> Vec<BookCandidate> {
        self.results.into_iter().flat_map(|r| r.candidates).collect()
    }

    /// True when no provider found anything.
    pub fn is_empty(&self) -> bool {
        self.results.iter().all(|r| r.candidates.is_empty())
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderResults> {
        self.results.iter().find(|r| r.provider == name)
    }
}

/// Dispatches searches to the enabled providers of a category.
#[derive(Debug, Clone)]
pub struct MetadataSearch {
    category: Arc<MetadataProviderCategory>,
    timeout: Duration,
}

impl MetadataSearch {
    pub fn new(category: Arc<MetadataProviderCategory>, timeout: Duration) -> Self {
        Self { category, timeout }
    }

    /// Per-call timeout of `metadata.timeout_secs` plus [`DISPATCH_GRACE`],
    /// saturating at [`Duration::MAX`].
    pub fn from_config(category: Arc<MetadataProviderCategory>, config: &BinderyConfig) -> Self {
        Self::new(
            category,
            Duration::from_secs(config.metadata.timeout_secs).saturating_add(DISPATCH_GRACE),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn category(&self) -> &Arc<MetadataProviderCategory> {
        &self.category
    }

    /// Query every enabled provider concurrently.
    pub async fn search(&self, query: &BookQuery, overrides: &SearchOverrides) -> SearchReport {
        let providers = self.category.list_enabled();
        if providers.is_empty() {
            debug!("no metadata providers enabled");
            return SearchReport::default();
        }

        let mut results: Vec<ProviderResults> = providers
            .iter()
            .map(|p| {
                ProviderResults::failed(
                    p.name().to_string(),
                    SearchOutcome::Failed,
                    "search task did not finish".to_string(),
                    Duration::ZERO,
                )
            })
            .collect();

        let query = Arc::new(query.clone());
        let overrides = Arc::new(overrides.clone());
        let mut tasks = JoinSet::new();
        for (index, provider) in providers.into_iter().enumerate() {
            let query = Arc::clone(&query);
            let overrides = Arc::clone(&overrides);
            let timeout = self.timeout;
            tasks.spawn(async move {
                (index, run_provider(provider, &query, &overrides, timeout).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = result,
                Err(e) => error!(error = %e, "metadata search task panicked"),
            }
        }

        SearchReport { results }
    }

    /// Query one enabled provider. `None` when `name` is not enabled.
    pub async fn search_provider(
        &self,
        name: &str,
        query: &BookQuery,
        overrides: &SearchOverrides,
    ) -> Option<ProviderResults> {
        let provider = self.category.get(name)?;
        Some(run_provider(provider, query, overrides, self.timeout).await)
    }
}

async fn run_provider(
    provider: Arc<dyn MetadataProvider>,
    query: &BookQuery,
    overrides: &SearchOverrides,
    timeout: Duration,
) -> ProviderResults {
    let name = provider.name().to_string();
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, provider.search_results(query, overrides)).await;
    let elapsed = started.elapsed();

    match outcome {
        Ok(Ok(candidates)) => {
            debug!(
                provider = %name,
                count = candidates.len(),
                elapsed_ms = elapsed_ms(elapsed),
                "provider search completed"
            );
            ProviderResults {
                provider: name,
                outcome: SearchOutcome::Completed,
                candidates,
                error: None,
                elapsed_ms: elapsed_ms(elapsed),
            }
        }
        Ok(Err(e)) if e.is_defect() => {
            error!(provider = %name, error = %e, "provider has no search implementation");
            ProviderResults::failed(name, SearchOutcome::NotImplemented, e.to_string(), elapsed)
        }
        Ok(Err(e)) => {
            warn!(provider = %name, error = %e, "provider search failed");
            ProviderResults::failed(name, SearchOutcome::Failed, e.to_string(), elapsed)
        }
        Err(_elapsed) => {
            let e = BinderyError::Timeout { duration: timeout };
            warn!(provider = %name, timeout_ms = elapsed_ms(timeout), "provider search timed out");
            ProviderResults::failed(name, SearchOutcome::TimedOut, e.to_string(), elapsed)
        }
    }
}

fn elapsed_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_plugin::FactoryTable;
    use bindery_test_utils::{mock_factory, mock_manifest, MemoryStore, MockProvider};

    use crate::kind::MetadataProviders;

    fn category_with(providers: Vec<Arc<MockProvider>>) -> Arc<MetadataProviderCategory> {
        let mut factories = FactoryTable::new();
        let mut builder = MetadataProviderCategory::builder(Arc::new(MemoryStore::new()));
        for provider in providers {
            let name = provider.name().to_string();
            factories.register(name.clone(), mock_factory(provider));
            builder = builder.builtin(mock_manifest(&name));
        }
        let category = builder.factories(factories).build();
        category.load_available();
        category.enable_all(false).unwrap();
        Arc::new(category)
    }

    #[test]
    fn kind_constants() {
        use bindery_plugin::PluginKind;
        assert_eq!(MetadataProviders::SUBDIRECTORY, "metadata_providers");
        assert_eq!(MetadataProviders::CONFIG_KEY, "metadata_providers");
    }

    #[test]
    fn config_timeout_adds_grace() {
        let mut config = BinderyConfig::default();
        config.metadata.timeout_secs = 10;
        let search = MetadataSearch::from_config(category_with(vec![]), &config);
        assert_eq!(search.timeout(), Duration::from_secs(12));

        config.metadata.timeout_secs = u64::MAX;
        let search = MetadataSearch::from_config(category_with(vec![]), &config);
        assert_eq!(search.timeout(), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out_without_blocking_others() {
        let slow = Arc::new(MockProvider::new("slow").with_delay(Duration::from_secs(60)));
        let fast = Arc::new(MockProvider::new("fast").with_candidate_count(2));
        let search = MetadataSearch::new(category_with(vec![slow, fast]), Duration::from_secs(5));

        let report = search
            .search(&BookQuery::titled("Dune"), &SearchOverrides::none())
            .await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].provider, "slow");
        assert_eq!(report.results[0].outcome, SearchOutcome::TimedOut);
        assert_eq!(report.results[1].outcome, SearchOutcome::Completed);
        assert_eq!(report.candidates().len(), 2);
        assert!(!report.is_empty());
    }

    #[tokio::test]
    async fn failures_are_isolated_and_labelled() {
        let failing = Arc::new(MockProvider::new("failing").failing("boom"));
        let unfinished = Arc::new(MockProvider::new("unfinished").not_implemented());
        let working = Arc::new(MockProvider::new("working").with_candidate_count(1));
        let search = MetadataSearch::new(
            category_with(vec![failing, unfinished, working]),
            Duration::from_secs(5),
        );

        let report = search
            .search(&BookQuery::titled("Dune"), &SearchOverrides::none())
            .await;

        assert_eq!(report.provider("failing").unwrap().outcome, SearchOutcome::Failed);
        assert_eq!(
            report.provider("unfinished").unwrap().outcome,
            SearchOutcome::NotImplemented
        );
        assert_eq!(report.provider("working").unwrap().candidates.len(), 1);
        assert_eq!(report.into_candidates().len(), 1);
    }

    #[tokio::test]
    async fn no_enabled_providers_is_empty_report() {
        let search = MetadataSearch::new(category_with(vec![]), Duration::from_secs(1));
        let report = search
            .search(&BookQuery::titled("Dune"), &SearchOverrides::none())
            .await;
        assert!(report.results.is_empty());
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn search_provider_only_reaches_enabled() {
        let a = Arc::new(MockProvider::new("a").with_candidate_count(1));
        let b = Arc::new(MockProvider::new("b").with_candidate_count(1));
        let category = category_with(vec![a.clone(), b.clone()]);
        category.disable("b").unwrap();
        let search = MetadataSearch::new(category, Duration::from_secs(1));

        let query = BookQuery::titled("Dune");
        let found = search
            .search_provider("a", &query, &SearchOverrides::with_title("Emma"))
            .await
            .unwrap();
        assert_eq!(found.candidates.len(), 1);
        assert_eq!(a.last_title().as_deref(), Some("Emma"));

        assert!(search.search_provider("b", &query, &SearchOverrides::none()).await.is_none());
        assert!(search.search_provider("zzz", &query, &SearchOverrides::none()).await.is_none());
        assert_eq!(b.calls(), 0);
    }

    #[test]
    fn report_serializes_outcomes_in_snake_case() {
        let report = SearchReport {
            results: vec![ProviderResults::failed(
                "douban".into(),
                SearchOutcome::TimedOut,
                "operation timed out after 5s".into(),
                Duration::from_millis(5000),
            )],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["outcome"], "timed_out");
        assert_eq!(json["results"][0]["elapsed_ms"], 5000);
    }
}
