//! Word Store and Preset Store contracts.
//!
//! The dictionary database lives behind an HTTP API; the controllers only see
//! these traits so they can run against the real API, a local word list, or
//! test doubles.

mod http;
mod memory;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{FilterSelection, NewSearchPreset, SearchPreset, Suggestion, WordEntry};

pub use http::DictionaryApiClient;
pub use memory::{MemoryPresetStore, MemoryWordStore};

/// Parameters of a full dictionary search, passed through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: FilterSelection,
    pub fuzzy: bool,
}

/// Read-only access to dictionary words.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Suggestions for a partial query, at most `limit` of them
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>>;

    /// First `limit` dictionary entries
    async fn list_words(&self, limit: usize) -> Result<Vec<WordEntry>>;

    /// Full search with filters and the fuzzy flag
    async fn search(&self, request: &SearchRequest) -> Result<Vec<WordEntry>>;
}

/// Per-user saved search storage.
#[async_trait]
pub trait PresetStore: Send + Sync {
    async fn list_presets(&self, user_id: &str) -> Result<Vec<SearchPreset>>;

    async fn create_preset(&self, user_id: &str, preset: &NewSearchPreset) -> Result<()>;

    async fn delete_preset(&self, user_id: &str, preset_id: &str) -> Result<()>;
}

/// `{success, data}` envelope every API response carries.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Fail unless `success` is true; the payload may be absent.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Api(self.failure_message()))
        }
    }

    /// Fail unless `success` is true and a payload is present.
    pub fn into_data(self) -> Result<T> {
        self.into_result()?
            .ok_or_else(|| Error::Api("response did not include data".to_string()))
    }

    fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or("request was not successful")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_yields_data() {
        let envelope: ApiEnvelope<Vec<Suggestion>> = serde_json::from_str(
            r#"{"success":true,"data":[{"id":"w1","balti":"julley","english":"hello"}]}"#,
        )
        .unwrap();
        let data = envelope.into_data().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].balti, "julley");
    }

    #[test]
    fn envelope_failure_prefers_server_message() {
        let envelope: ApiEnvelope<Vec<Suggestion>> =
            serde_json::from_str(r#"{"success":false,"error":"Preset name already exists"}"#)
                .unwrap();
        let error = envelope.into_data().unwrap_err();
        assert_eq!(error.to_string(), "API error: Preset name already exists");
    }

    #[test]
    fn envelope_failure_without_message_is_generic() {
        let envelope: ApiEnvelope<()> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        let error = envelope.into_result().unwrap_err();
        assert!(error.to_string().contains("not successful"));
    }

    #[test]
    fn envelope_success_without_data_is_ok_for_commands() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.into_result().unwrap().is_none());
    }
}
