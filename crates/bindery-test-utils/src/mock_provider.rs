// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock metadata provider for deterministic testing.
//!
//! `MockProvider` implements `MetadataProvider` with pre-configured
//! candidates, an optional artificial delay, and failure modes, enabling
//! fast, CI-runnable tests without external catalog services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use bindery_core::{
    BinderyError, BookCandidate, BookQuery, CandidateSource, MetadataProvider, Plugin,
    SearchOverrides,
};

#[derive(Debug, Clone)]
enum Mode {
    Respond(Vec<BookCandidate>),
    Fail(String),
    NotImplemented,
}

/// A mock provider that returns pre-configured candidates.
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    mode: Mode,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_title: Mutex<Option<String>>,
}

impl MockProvider {
    /// A provider named `name` that finds nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: Mode::Respond(Vec::new()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_title: Mutex::new(None),
        }
    }

    /// Return `candidates` for every non-blank search.
    pub fn with_candidates(mut self, candidates: Vec<BookCandidate>) -> Self {
        self.mode = Mode::Respond(candidates);
        self
    }

    /// Return `count` generated candidates for every non-blank search.
    pub fn with_candidate_count(self, count: usize) -> Self {
        let name = self.name.clone();
        self.with_candidates(
            (1..=count)
                .map(|i| candidate(&name, &format!("{name}-{i}"), &format!("Result {i}")))
                .collect(),
        )
    }

    /// Sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Break the degrade-silently contract and return an upstream error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.mode = Mode::Fail(message.into());
        self
    }

    /// Behave like a provider that never implemented the search.
    pub fn not_implemented(mut self) -> Self {
        self.mode = Mode::NotImplemented;
        self
    }

    /// Number of searches received, including blank ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The effective title of the most recent non-blank search.
    pub fn last_title(&self) -> Option<String> {
        self.last_title
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Plugin for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl MetadataProvider for MockProvider {
    async fn search_results(
        &self,
        query: &BookQuery,
        overrides: &SearchOverrides,
    ) -> Result<Vec<BookCandidate>, BinderyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.mode {
            Mode::NotImplemented => Err(BinderyError::NotImplemented {
                plugin: self.name.clone(),
                operation: "search_results",
            }),
            Mode::Fail(message) => Err(BinderyError::Upstream {
                message: message.clone(),
                source: None,
            }),
            Mode::Respond(candidates) => {
                let Some(title) = query.effective_title(overrides) else {
                    return Ok(Vec::new());
                };
                *self
                    .last_title
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(title.to_string());
                Ok(candidates.clone())
            }
        }
    }
}

/// A minimal candidate attributed to `provider`.
pub fn candidate(provider: &str, id: &str, title: &str) -> BookCandidate {
    BookCandidate {
        id: id.to_string(),
        title: title.to_string(),
        authors: vec!["Test Author".to_string()],
        description: String::new(),
        publisher: String::new(),
        published_date: String::new(),
        tags: Vec::new(),
        rating: 0.0,
        series: String::new(),
        cover: "/static/generic_cover.jpg".to_string(),
        url: format!("https://example.test/{provider}/{id}"),
        source: CandidateSource {
            id: provider.to_string(),
            description: format!("{provider} (mock)"),
            url: format!("https://example.test/{provider}/"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_candidates() {
        let provider = MockProvider::new("mock").with_candidate_count(2);
        let results = provider
            .search_results(&BookQuery::titled("Dune"), &SearchOverrides::none())
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source.id, "mock");
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.last_title().as_deref(), Some("Dune"));
    }

    #[tokio::test]
    async fn blank_title_returns_empty() {
        let provider = MockProvider::new("mock").with_candidate_count(2);
        let results = provider
            .search_results(&BookQuery::titled(" "), &SearchOverrides::none())
            .await
            .unwrap();
        assert!(results.is_empty());
        assert!(provider.last_title().is_none());
    }

    #[tokio::test]
    async fn failure_modes() {
        let failing = MockProvider::new("f").failing("down");
        let err = failing
            .search_results(&BookQuery::titled("x"), &SearchOverrides::none())
            .await
            .unwrap_err();
        assert!(!err.is_defect());

        let unfinished = MockProvider::new("u").not_implemented();
        let err = unfinished
            .search_results(&BookQuery::titled("x"), &SearchOverrides::none())
            .await
            .unwrap_err();
        assert!(err.is_defect());
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied() {
        let provider = MockProvider::new("slow").with_delay(Duration::from_secs(30));
        let started = tokio::time::Instant::now();
        provider
            .search_results(&BookQuery::titled("x"), &SearchOverrides::none())
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(30));
    }
}
