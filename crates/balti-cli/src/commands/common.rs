use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use balti_core::config::default_config_path;
use balti_core::search::{SuggestionPhase, VisibleSuggestions};
use balti_core::store::{
    DictionaryApiClient, MemoryPresetStore, MemoryWordStore, PresetStore, WordStore,
};
use balti_core::util::normalize_text_option;
use balti_core::{
    ClientConfig, PresetFilters, SearchController, SearchPreset, TranslationController, WordEntry,
};
use serde::Serialize;

use crate::cli::FilterArgs;
use crate::error::CliError;

const SUGGESTION_POLL_MS: u64 = 25;
const PRESETS_FILE_NAME: &str = "presets.json";
/// User id for saved searches made with `--words-file`
pub const LOCAL_USER: &str = "local";

/// Global flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs<'a> {
    pub config_path: Option<&'a Path>,
    pub api_url: Option<String>,
    pub user: Option<String>,
    pub words_file: Option<&'a Path>,
}

/// Stores resolved from configuration and flags.
pub struct Backend {
    pub config: ClientConfig,
    pub words: Arc<dyn WordStore>,
    pub presets: Arc<dyn PresetStore>,
    pub offline: bool,
}

impl Backend {
    pub fn search_controller(&self) -> SearchController {
        SearchController::new(self.words.clone(), self.presets.clone(), &self.config)
    }

    pub fn translation_controller(&self) -> TranslationController {
        TranslationController::new(self.words.clone(), &self.config)
    }

    /// Search controller signed in as the configured user.
    ///
    /// Offline runs fall back to a local user whose presets live in the
    /// preset file.
    pub async fn preset_controller(&self) -> Result<SearchController, CliError> {
        let user = match self.config.user_id.clone() {
            Some(user) => user,
            None if self.offline => LOCAL_USER.to_string(),
            None => return Err(CliError::UserRequired),
        };
        let controller = self.search_controller();
        controller.set_user(Some(user)).await?;
        Ok(controller)
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestionItem {
    pub kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Config file, then environment, then command-line flags.
pub fn resolve_config(args: &GlobalArgs<'_>) -> Result<ClientConfig, CliError> {
    let mut config = match args.config_path {
        Some(path) => {
            let mut config = ClientConfig::load_from_path(path)?;
            config.apply_env_overrides();
            config
        }
        None => ClientConfig::load()?,
    };

    if let Some(url) = normalize_text_option(args.api_url.clone()) {
        config.api_base_url = Some(url);
    }
    if let Some(user) = normalize_text_option(args.user.clone()) {
        config.user_id = Some(user);
    }
    Ok(config)
}

pub fn open_backend(args: &GlobalArgs<'_>) -> Result<Backend, CliError> {
    let config = resolve_config(args)?;

    if let Some(path) = args.words_file {
        tracing::info!("Using local word list {}", path.display());
        let presets = match offline_presets_path(args) {
            Some(presets_path) => MemoryPresetStore::open(&presets_path)?,
            None => MemoryPresetStore::new(),
        };
        return Ok(Backend {
            words: Arc::new(MemoryWordStore::from_json_file(path)?),
            presets: Arc::new(presets),
            config,
            offline: true,
        });
    }

    let client = Arc::new(DictionaryApiClient::from_config(&config)?);
    Ok(Backend {
        words: client.clone(),
        presets: client,
        config,
        offline: false,
    })
}

/// Offline saved searches sit next to the config file.
pub fn offline_presets_path(args: &GlobalArgs<'_>) -> Option<PathBuf> {
    args.config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .map(|path| path.with_file_name(PRESETS_FILE_NAME))
}

/// Wait for the debounce window and any fetch it started to settle.
pub async fn wait_for_suggestions(controller: &SearchController, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;
    while controller.snapshot().phase == SuggestionPhase::Debouncing {
        if tokio::time::Instant::now() >= deadline {
            tracing::warn!("Timed out waiting for suggestions");
            break;
        }
        tokio::time::sleep(Duration::from_millis(SUGGESTION_POLL_MS)).await;
    }
}

pub fn apply_filter_args(controller: &SearchController, filters: &FilterArgs) {
    for (dimension, value) in filters.selections() {
        if !controller.filters().contains(dimension, value) {
            controller.toggle_filter(dimension, value);
        }
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptySearchQuery);
    }
    Ok(trimmed.to_string())
}

pub fn find_preset_by_name<'a>(presets: &'a [SearchPreset], name: &str) -> Option<&'a SearchPreset> {
    let name = name.trim();
    presets
        .iter()
        .find(|preset| preset.name == name)
        .or_else(|| {
            presets
                .iter()
                .find(|preset| preset.name.eq_ignore_ascii_case(name))
        })
}

pub fn suggestion_items(visible: &VisibleSuggestions) -> Vec<SuggestionItem> {
    match visible {
        VisibleSuggestions::Hidden => Vec::new(),
        VisibleSuggestions::Database(suggestions) => suggestions
            .iter()
            .map(|suggestion| SuggestionItem {
                kind: "word",
                text: suggestion.balti.clone(),
                detail: Some(suggestion.english.clone()),
                category: None,
            })
            .collect(),
        VisibleSuggestions::Placeholders(placeholders) => placeholders
            .iter()
            .map(|placeholder| SuggestionItem {
                kind: "placeholder",
                text: placeholder.text.clone(),
                detail: placeholder.hint.clone(),
                category: placeholder.category.clone(),
            })
            .collect(),
    }
}

pub fn format_suggestion_lines(items: &[SuggestionItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let detail = item.detail.as_deref().unwrap_or("");
            match &item.category {
                Some(category) => format!("{:<20}  {:<30}  ({category})", item.text, detail),
                None => format!("{:<20}  {detail}", item.text),
            }
        })
        .collect()
}

pub fn format_word_lines(words: &[WordEntry]) -> Vec<String> {
    words
        .iter()
        .map(|word| {
            let mut line = format!("{:<20}  {}", word.balti, word.english);
            if let Some(phonetic) = &word.phonetic {
                line.push_str(&format!("  /{phonetic}/"));
            }
            let tags = [&word.category, &word.dialect, &word.difficulty]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>();
            if !tags.is_empty() {
                line.push_str(&format!("  [{}]", tags.join(", ")));
            }
            line
        })
        .collect()
}

pub fn render_preset_filters(filters: &PresetFilters) -> String {
    [
        ("category", &filters.category),
        ("dialect", &filters.dialect),
        ("difficulty", &filters.difficulty),
        ("feedback", &filters.feedback),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.as_ref().map(|value| format!("{key}={value}")))
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn format_preset_lines(presets: &[SearchPreset]) -> Vec<String> {
    presets
        .iter()
        .map(|preset| {
            let id = preset.id.as_deref().unwrap_or("-");
            let query = if preset.query.is_empty() {
                "(any)".to_string()
            } else {
                format!("\"{}\"", preset.query)
            };
            let filters = render_preset_filters(&preset.filters);
            if filters.is_empty() {
                format!("{id:<14}  {:<24}  {query}", preset.name)
            } else {
                format!("{id:<14}  {:<24}  {query}  {filters}", preset.name)
            }
        })
        .collect()
}

pub fn print_words(words: &[WordEntry], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(words)?);
    } else if words.is_empty() {
        println!("No words found");
    } else {
        for line in format_word_lines(words) {
            println!("{line}");
        }
    }
    Ok(())
}
