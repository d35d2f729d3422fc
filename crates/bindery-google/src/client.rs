// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Google Books volumes API.
//!
//! Provides [`GoogleBooksClient`], which builds the search URL, sends the
//! configured User-Agent, and bounds every request with a timeout. It reports
//! failures as errors; deciding to degrade silently is the provider's job.

use std::time::Duration;

use bindery_core::BinderyError;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use tracing::debug;

use crate::types::VolumesResponse;

/// Default volumes search endpoint.
pub const API_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// HTTP client for Google Books communication.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `user_agent` - Value of the `User-Agent` header
    /// * `timeout` - Upper bound for one whole request
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, BinderyError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| {
                BinderyError::Config(format!("invalid User-Agent header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| BinderyError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            api_key: None,
        })
    }

    /// Overrides the search endpoint (tests point this at wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the API key sent as the `key` query parameter.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the search URL for `title`.
    pub fn search_url(&self, title: &str) -> Result<Url, BinderyError> {
        let mut params = vec![("q", title)];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }
        Url::parse_with_params(&self.base_url, &params).map_err(|e| {
            BinderyError::Config(format!("invalid Google Books URL `{}`: {e}", self.base_url))
        })
    }

    /// Searches volumes by title.
    ///
    /// Transport failures, timeouts, non-200 statuses and unparsable bodies
    /// are all returned as [`BinderyError::Upstream`].
    pub async fn search_volumes(&self, title: &str) -> Result<VolumesResponse, BinderyError> {
        let url = self.search_url(title)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BinderyError::Upstream {
                message: if e.is_timeout() {
                    format!("Google Books request timed out: {e}")
                } else {
                    format!("Google Books request failed: {e}")
                },
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "Google Books response received");

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(BinderyError::Upstream {
                message: format!("Google Books returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| BinderyError::Upstream {
            message: format!("failed to read Google Books response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| BinderyError::Upstream {
            message: format!("failed to parse Google Books response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
