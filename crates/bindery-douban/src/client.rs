// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Douban book search API.

use std::time::Duration;

use bindery_core::BinderyError;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use tracing::debug;

use crate::types::SearchResponse;

/// Default book search endpoint.
pub const API_BASE_URL: &str = "https://api.douban.com/v2/book/search";

/// Default number of results requested per search.
pub const DEFAULT_COUNT: u32 = 10;

/// HTTP client for Douban communication.
///
/// Every request carries the configured User-Agent and is bounded by the
/// client timeout. Failures come back as [`BinderyError::Upstream`].
#[derive(Debug, Clone)]
pub struct DoubanClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    count: u32,
}

impl DoubanClient {
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
            count: DEFAULT_COUNT,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the key sent as the `apikey` query parameter.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}?[apikey=..&]q=<title>&fields=all&count=<n>`.
    pub fn search_url(&self, title: &str) -> Result<Url, BinderyError> {
        let count = self.count.to_string();
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(4);
        if let Some(key) = &self.api_key {
            params.push(("apikey", key.as_str()));
        }
        params.extend([("q", title), ("fields", "all"), ("count", count.as_str())]);
        Url::parse_with_params(&self.base_url, &params).map_err(|e| {
            BinderyError::Config(format!("invalid Douban URL `{}`: {e}", self.base_url))
        })
    }

    /// Searches books by title.
    pub async fn search_books(&self, title: &str) -> Result<SearchResponse, BinderyError> {
        let url = self.search_url(title)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BinderyError::Upstream {
                message: format!("Douban request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "Douban response received");

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(BinderyError::Upstream {
                message: format!("Douban returned {status}: {body}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| BinderyError::Upstream {
            message: format!("failed to read Douban response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| BinderyError::Upstream {
            message: format!("failed to parse Douban response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn search_url_has_all_parameters() {
        let client = DoubanClient::new("ua", Duration::from_secs(1))
            .unwrap()
            .with_api_key(Some("k".into()))
            .with_count(5);
        let url = client.search_url("三体").unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("apikey".to_string(), "k".to_string()),
                ("q".to_string(), "三体".to_string()),
                ("fields".to_string(), "all".to_string()),
                ("count".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn api_key_is_optional() {
        let client = DoubanClient::new("ua", Duration::from_secs(1)).unwrap();
        let url = client.search_url("Dune").unwrap();
        assert!(url.query_pairs().all(|(k, _)| k != "apikey"));
        assert!(url.as_str().starts_with(API_BASE_URL));
    }

    #[tokio::test]
    async fn search_books_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/book/search"))
            .and(query_param("q", "Dune"))
            .and(query_param("fields", "all"))
            .and(header("user-agent", "bindery-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "books": [{"id": "1", "title": "Dune"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DoubanClient::new("bindery-test", Duration::from_secs(5))
            .unwrap()
            .with_base_url(format!("{}/v2/book/search", server.uri()));
        let response = client.search_books("Dune").await.unwrap();
        assert_eq!(response.books[0].title, "Dune");
    }

    #[tokio::test]
    async fn non_200_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"code\": 104}"))
            .mount(&server)
            .await;

        let client = DoubanClient::new("ua", Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.uri());
        let err = client.search_books("Dune").await.unwrap_err();
        assert!(matches!(err, BinderyError::Upstream { .. }));
        assert!(err.to_string().contains("400"), "got: {err}");
    }
}
