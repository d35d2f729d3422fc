// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Douban metadata provider for Bindery.
//!
//! Implements [`MetadataProvider`] against Douban's book search API. Ratings
//! are rescaled from Douban's 0-10 scale to the candidate 0-5 scale.

pub mod client;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bindery_config::BinderyConfig;
use bindery_core::candidate::{clamp_rating, normalize_published_date, normalize_tags};
use bindery_core::{
    BinderyError, BookCandidate, BookQuery, CandidateSource, MetadataProvider, Plugin,
    SearchOverrides,
};
use bindery_plugin::{PluginFactory, PluginManifest};
use tracing::{debug, info, warn};

use crate::client::DoubanClient;
use crate::types::DoubanBook;

/// Name, and factory key, of the built-in Douban provider.
pub const PROVIDER_NAME: &str = "douban";

pub fn manifest() -> PluginManifest {
    PluginManifest::new(PROVIDER_NAME, env!("CARGO_PKG_VERSION"))
        .with_title("Douban")
        .with_description("A Douban metadata provider")
        .with_author("Bindery Contributors")
}

/// Settings for a Douban provider instance. Manifest `[settings]` may
/// override `base_url`, `api_key` and `count`.
#[derive(Debug, Clone)]
pub struct DoubanSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub count: u32,
    pub user_agent: String,
    pub timeout: Duration,
    pub default_cover: String,
}

impl DoubanSettings {
    pub fn from_config(config: &BinderyConfig) -> Self {
        Self {
            base_url: config.douban.base_url.clone(),
            api_key: config.douban.api_key.clone(),
            count: config.douban.count,
            user_agent: config.metadata.user_agent.clone(),
            timeout: Duration::from_secs(config.metadata.timeout_secs),
            default_cover: config.metadata.default_cover.clone(),
        }
    }

    /// Applies the manifest's `[settings]` overrides.
    ///
    /// A mistyped setting, or a `count` outside 1..=100, fails with
    /// [`BinderyError::Enable`].
    pub fn for_manifest(&self, manifest: &PluginManifest) -> Result<Self, BinderyError> {
        let mut settings = self.clone();
        if let Some(base_url) = manifest.setting_str("base_url")? {
            settings.base_url = base_url.to_string();
        }
        if let Some(api_key) = manifest.setting_str("api_key")? {
            settings.api_key = Some(api_key.to_string());
        }
        if let Some(count) = manifest.setting_int("count")? {
            settings.count = u32::try_from(count)
                .ok()
                .filter(|c| (1..=100).contains(c))
                .ok_or_else(|| BinderyError::Enable {
                    name: manifest.name.clone(),
                    message: format!("count must be between 1 and 100, got {count}"),
                })?;
        }
        Ok(settings)
    }
}

/// Builds [`DoubanProvider`] instances.
#[derive(Debug, Clone)]
pub struct DoubanFactory {
    settings: DoubanSettings,
}

impl DoubanFactory {
    pub fn new(settings: DoubanSettings) -> Self {
        Self { settings }
    }
}

impl PluginFactory<dyn MetadataProvider> for DoubanFactory {
    fn create(&self, manifest: &PluginManifest) -> Result<Arc<dyn MetadataProvider>, BinderyError> {
        let settings = self.settings.for_manifest(manifest)?;
        let provider = DoubanProvider::new(&manifest.name, settings).map_err(|e| {
            BinderyError::Enable {
                name: manifest.name.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Arc::new(provider))
    }
}

/// The factory registered under [`PROVIDER_NAME`].
pub fn factory(config: &BinderyConfig) -> Arc<dyn PluginFactory<dyn MetadataProvider>> {
    Arc::new(DoubanFactory::new(DoubanSettings::from_config(config)))
}

/// Douban provider implementing [`MetadataProvider`].
pub struct DoubanProvider {
    name: String,
    client: DoubanClient,
    default_cover: String,
}

impl DoubanProvider {
    pub fn new(name: &str, settings: DoubanSettings) -> Result<Self, BinderyError> {
        let client = DoubanClient::new(&settings.user_agent, settings.timeout)?
            .with_base_url(settings.base_url)
            .with_api_key(settings.api_key)
            .with_count(settings.count);
        client.search_url("probe")?;

        info!(plugin = name, base_url = client.base_url(), "Douban provider initialized");
        Ok(Self {
            name: name.to_string(),
            client,
            default_cover: settings.default_cover,
        })
    }

    fn to_candidate(&self, book: DoubanBook) -> BookCandidate {
        let tags = normalize_tags(book.tags.iter().filter_map(|t| t.title.as_deref()));
        let rating = book.rating.map_or(0.0, |r| r.average / 2.0);
        let cover = book
            .image
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.default_cover.clone());

        BookCandidate {
            url: format!("https://book.douban.com/subject/{}", book.id),
            id: book.id,
            title: book.title,
            authors: book.author,
            description: book.summary,
            publisher: book.publisher,
            published_date: normalize_published_date(&book.pubdate),
            tags,
            rating: clamp_rating(rating),
            series: book.series.map(|s| s.title).unwrap_or_default(),
            cover,
            source: CandidateSource {
                id: PROVIDER_NAME.to_string(),
                description: "Douban Books".to_string(),
                url: "https://book.douban.com/".to_string(),
            },
        }
    }
}

impl Plugin for DoubanProvider {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl MetadataProvider for DoubanProvider {
    async fn search_results(
        &self,
        query: &BookQuery,
        overrides: &SearchOverrides,
    ) -> Result<Vec<BookCandidate>, BinderyError> {
        let Some(title) = query.effective_title(overrides) else {
            debug!(plugin = %self.name, "blank title, skipping search");
            return Ok(Vec::new());
        };

        match self.client.search_books(title).await {
            Ok(response) => {
                let candidates: Vec<BookCandidate> = response
                    .books
                    .into_iter()
                    .map(|book| self.to_candidate(book))
                    .collect();
                debug!(plugin = %self.name, title, count = candidates.len(), "search finished");
                Ok(candidates)
            }
            Err(e) => {
                warn!(plugin = %self.name, title, error = %e, "Douban search failed");
                Ok(Vec::new())
            }
        }
    }
}
