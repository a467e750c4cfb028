//! HTTP client for the dictionary API.
//!
//! Implements both store contracts against the web application's REST
//! endpoints. Every response is a `{success, data}` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiEnvelope, PresetStore, SearchRequest, WordStore};
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{Error, Result};
use crate::models::{NewSearchPreset, SearchPreset, Suggestion, WordEntry};
use crate::util::compact_text;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Word Store and Preset Store backed by the dictionary REST API.
#[derive(Debug, Clone)]
pub struct DictionaryApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl DictionaryApiClient {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Builds a client from the configured base URL and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(config.api_base_url()?, config.http_timeout())
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn presets_url(&self, user_id: &str) -> String {
        format!(
            "{}/users/{}/search-presets",
            self.base_url,
            urlencoding::encode(user_id)
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiEnvelope<T>> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(response.json::<ApiEnvelope<T>>().await?)
    }
}

#[async_trait]
impl WordStore for DictionaryApiClient {
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>> {
        tracing::debug!(query, limit, "Requesting autocomplete suggestions");
        let limit = limit.to_string();
        let request = self
            .client
            .get(format!("{}/autocomplete", self.base_url))
            .query(&[("q", query), ("limit", limit.as_str())]);
        self.send(request).await?.into_data()
    }

    async fn list_words(&self, limit: usize) -> Result<Vec<WordEntry>> {
        tracing::debug!(limit, "Listing dictionary words");
        let request = self
            .client
            .get(format!("{}/words", self.base_url))
            .query(&[("limit", limit.to_string())]);
        self.send(request).await?.into_data()
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<WordEntry>> {
        tracing::debug!(query = %request.query, fuzzy = request.fuzzy, "Searching words");
        let pairs = search_query_pairs(request);
        let http_request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&pairs);
        self.send(http_request).await?.into_data()
    }
}

#[async_trait]
impl PresetStore for DictionaryApiClient {
    async fn list_presets(&self, user_id: &str) -> Result<Vec<SearchPreset>> {
        let request = self.client.get(self.presets_url(user_id));
        self.send(request).await?.into_data()
    }

    async fn create_preset(&self, user_id: &str, preset: &NewSearchPreset) -> Result<()> {
        let request = self.client.post(self.presets_url(user_id)).json(preset);
        self.send::<serde_json::Value>(request).await?.into_result()?;
        Ok(())
    }

    async fn delete_preset(&self, user_id: &str, preset_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.presets_url(user_id))
            .query(&[("presetId", preset_id)]);
        self.send::<serde_json::Value>(request).await?.into_result()?;
        Ok(())
    }
}

fn search_query_pairs(request: &SearchRequest) -> Vec<(&str, &str)> {
    let mut pairs = vec![
        ("q", request.query.as_str()),
        ("fuzzy", if request.fuzzy { "true" } else { "false" }),
    ];
    pairs.extend(request.filters.query_pairs());
    pairs
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.error.or(payload.message) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
