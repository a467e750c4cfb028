//! Client configuration.
//!
//! Provides a `ClientConfig` shared by every front end to locate the Word
//! Store / Preset Store API and to tune the search and translation
//! controllers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{FilterDimension, PlaceholderSuggestion};
use crate::util::{is_http_url, normalize_text_option};

const CONFIG_FILE_NAME: &str = "config.json";
const API_BASE_URL_ENV: &str = "BALTI_API_BASE_URL";
const USER_ID_ENV: &str = "BALTI_USER_ID";

/// Runtime configuration for the dictionary client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the dictionary API, e.g. `https://balti.example.com/api`
    pub api_base_url: Option<String>,
    /// Signed-in user, required for saved searches
    pub user_id: Option<String>,
    pub autocomplete_limit: usize,
    pub debounce_ms: u64,
    pub dictionary_page_size: usize,
    pub translate_delay_ms: u64,
    pub placeholder_count: usize,
    pub http_timeout_secs: u64,
    pub placeholders: Vec<PlaceholderSuggestion>,
    pub filter_options: FilterOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            user_id: None,
            autocomplete_limit: 8,
            debounce_ms: 300,
            dictionary_page_size: 1000,
            translate_delay_ms: 500,
            placeholder_count: 4,
            http_timeout_secs: 10,
            placeholders: default_placeholders(),
            filter_options: FilterOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Load the config from the default location, then apply env overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let mut config = serde_json::from_str::<Self>(&raw)?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Override file values with `BALTI_API_BASE_URL` / `BALTI_USER_ID`.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = normalize_text_option(std::env::var(API_BASE_URL_ENV).ok()) {
            self.api_base_url = Some(url);
        }
        if let Some(user_id) = normalize_text_option(std::env::var(USER_ID_ENV).ok()) {
            self.user_id = Some(user_id);
        }
        self.normalize();
    }

    /// Validated API base URL without a trailing slash.
    pub fn api_base_url(&self) -> Result<String> {
        let url = normalize_text_option(self.api_base_url.clone()).ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "API base URL is not set (config file or {API_BASE_URL_ENV})"
            ))
        })?;
        normalize_base_url(&url)
    }

    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub const fn translate_delay(&self) -> Duration {
        Duration::from_millis(self.translate_delay_ms)
    }

    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.take())
            .map(|url| url.trim_end_matches('/').to_string());
        self.user_id = normalize_text_option(self.user_id.take());
    }
}

/// Values offered for each filter dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub dialects: Vec<String>,
    pub difficulties: Vec<String>,
    pub feedback: Vec<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Category => &self.categories,
            FilterDimension::Dialect => &self.dialects,
            FilterDimension::Difficulty => &self.difficulties,
            FilterDimension::Feedback => &self.feedback,
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        fn owned(values: &[&str]) -> Vec<String> {
            values.iter().map(|value| (*value).to_string()).collect()
        }

        Self {
            categories: owned(&[
                "greetings",
                "family",
                "food",
                "nature",
                "animals",
                "numbers",
                "colors",
                "body",
                "verbs",
            ]),
            dialects: owned(&["skardu", "khaplu", "shigar", "kharmang", "roundu"]),
            difficulties: owned(&["beginner", "intermediate", "advanced"]),
            feedback: owned(&["verified", "pending", "needs-review"]),
        }
    }
}

/// Default config file location: `<config_dir>/balti/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("balti").join(CONFIG_FILE_NAME))
}

/// Curated suggestions shown for empty or unmatched queries.
pub fn default_placeholders() -> Vec<PlaceholderSuggestion> {
    vec![
        PlaceholderSuggestion::new("julley")
            .with_category("greetings")
            .with_hint("hello, goodbye")
            .with_icon("👋"),
        PlaceholderSuggestion::new("ama")
            .with_category("family")
            .with_hint("mother")
            .with_icon("👪"),
        PlaceholderSuggestion::new("ata")
            .with_category("family")
            .with_hint("father")
            .with_icon("👪"),
        PlaceholderSuggestion::new("chhu")
            .with_category("nature")
            .with_hint("water")
            .with_icon("💧"),
        PlaceholderSuggestion::new("nyima")
            .with_category("nature")
            .with_hint("sun")
            .with_icon("☀️"),
        PlaceholderSuggestion::new("khang")
            .with_category("home")
            .with_hint("house")
            .with_icon("🏠"),
        PlaceholderSuggestion::new("ri")
            .with_category("nature")
            .with_hint("mountain")
            .with_icon("🏔️"),
        PlaceholderSuggestion::new("kurba")
            .with_category("food")
            .with_hint("bread")
            .with_icon("🍞"),
        PlaceholderSuggestion::new("family")
            .with_category("search tip")
            .with_hint("search in English too"),
        PlaceholderSuggestion::new("greetings")
            .with_category("search tip")
            .with_hint("browse a topic"),
    ]
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfiguration(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidConfiguration(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
