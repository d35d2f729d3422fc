// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Books metadata provider for Bindery.
//!
//! This crate implements [`MetadataProvider`] against the Google Books
//! volumes API and exposes the built-in [`manifest`] and the [`factory`]
//! that the metadata category registers under the key `google`.

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

use crate::client::GoogleBooksClient;
use crate::types::Volume;

/// Name, and factory key, of the built-in Google provider.
pub const PROVIDER_NAME: &str = "google";

/// Manifest of the built-in Google provider.
pub fn manifest() -> PluginManifest {
    PluginManifest::new(PROVIDER_NAME, env!("CARGO_PKG_VERSION"))
        .with_title("Google")
        .with_description("A Google metadata provider")
        .with_author("Bindery Contributors")
}

/// Everything a Google provider instance needs.
///
/// Built from [`BinderyConfig`]; a manifest's `[settings]` may override
/// `base_url` and `api_key`, so one compiled implementation can back several
/// dropped-in packages.
#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
    pub default_cover: String,
}

impl GoogleSettings {
    pub fn from_config(config: &BinderyConfig) -> Self {
        Self {
            base_url: config.google.base_url.clone(),
            api_key: config.google.api_key.clone(),
            user_agent: config.metadata.user_agent.clone(),
            timeout: Duration::from_secs(config.metadata.timeout_secs),
            default_cover: config.metadata.default_cover.clone(),
        }
    }

    /// Applies the manifest's `[settings]` overrides. A mistyped setting
    /// fails with [`BinderyError::Enable`].
    pub fn for_manifest(&self, manifest: &PluginManifest) -> Result<Self, BinderyError> {
        let mut settings = self.clone();
        if let Some(base_url) = manifest.setting_str("base_url")? {
            settings.base_url = base_url.to_string();
        }
        if let Some(api_key) = manifest.setting_str("api_key")? {
            settings.api_key = Some(api_key.to_string());
        }
        Ok(settings)
    }
}

/// Builds [`GoogleProvider`] instances.
#[derive(Debug, Clone)]
pub struct GoogleFactory {
    settings: GoogleSettings,
}

impl GoogleFactory {
    pub fn new(settings: GoogleSettings) -> Self {
        Self { settings }
    }
}

impl PluginFactory<dyn MetadataProvider> for GoogleFactory {
    fn create(&self, manifest: &PluginManifest) -> Result<Arc<dyn MetadataProvider>, BinderyError> {
        let settings = self.settings.for_manifest(manifest)?;
        let provider = GoogleProvider::new(&manifest.name, settings).map_err(|e| {
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
    Arc::new(GoogleFactory::new(GoogleSettings::from_config(config)))
}

/// Google Books provider implementing [`MetadataProvider`].
pub struct GoogleProvider {
    name: String,
    client: GoogleBooksClient,
    default_cover: String,
}

impl GoogleProvider {
    /// Creates a provider answering under `name`.
    pub fn new(name: &str, settings: GoogleSettings) -> Result<Self, BinderyError> {
        let client = GoogleBooksClient::new(&settings.user_agent, settings.timeout)?
            .with_base_url(settings.base_url)
            .with_api_key(settings.api_key);
        // Fail at enable time rather than on every search.
        client.search_url("probe")?;

        info!(plugin = name, base_url = client.base_url(), "Google Books provider initialized");
        Ok(Self {
            name: name.to_string(),
            client,
            default_cover: settings.default_cover,
        })
    }

    fn to_candidate(&self, volume: Volume) -> BookCandidate {
        let info = volume.volume_info;
        let cover = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.default_cover.clone());

        BookCandidate {
            url: format!("https://books.google.com/books?id={}", volume.id),
            id: volume.id,
            title: info.title,
            authors: info.authors,
            description: info.description,
            publisher: info.publisher,
            published_date: normalize_published_date(&info.published_date),
            tags: normalize_tags(&info.categories),
            rating: clamp_rating(info.average_rating.unwrap_or(0.0)),
            series: String::new(),
            cover,
            source: source(),
        }
    }
}

fn source() -> CandidateSource {
    CandidateSource {
        id: PROVIDER_NAME.to_string(),
        description: "Google Books".to_string(),
        url: "https://books.google.com/".to_string(),
    }
}

impl Plugin for GoogleProvider {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl MetadataProvider for GoogleProvider {
    async fn search_results(
        &self,
        query: &BookQuery,
        overrides: &SearchOverrides,
    ) -> Result<Vec<BookCandidate>, BinderyError> {
        let Some(title) = query.effective_title(overrides) else {
            debug!(plugin = %self.name, "blank title, skipping search");
            return Ok(Vec::new());
        };

        match self.client.search_volumes(title).await {
            Ok(response) => {
                let candidates: Vec<BookCandidate> = response
                    .items
                    .into_iter()
                    .map(|volume| self.to_candidate(volume))
                    .collect();
                debug!(plugin = %self.name, title, count = candidates.len(), "search finished");
                Ok(candidates)
            }
            Err(e) => {
                warn!(plugin = %self.name, title, error = %e, "Google Books search failed");
                Ok(Vec::new())
            }
        }
    }
}
