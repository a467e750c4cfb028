//! Dictionary search box: autocomplete, filters, fuzzy flag and saved searches.
//!
//! Result ranking and matching happen in the Word Store; this module only
//! drives the client-side state around it.

mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

pub use state::{sample_placeholders, SearchState, SuggestionPhase, VisibleSuggestions};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{
    FilterDimension, FilterSelection, NewSearchPreset, PlaceholderSuggestion, SearchPreset,
    Suggestion, WordEntry,
};
use crate::store::{PresetStore, SearchRequest, WordStore};
use crate::timer::DebounceTimer;
use crate::util::normalize_text_option;

/// Queries shorter than this never reach the autocomplete endpoint.
const MIN_AUTOCOMPLETE_CHARS: usize = 2;

/// Search box controller.
///
/// Cheap to clone; clones share state. Query changes schedule work on the
/// tokio runtime, so `set_query` must be called from within one.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    words: Arc<dyn WordStore>,
    presets: Arc<dyn PresetStore>,
    debounce: Duration,
    autocomplete_limit: usize,
    placeholder_count: usize,
    placeholder_pool: Vec<PlaceholderSuggestion>,
    timer: DebounceTimer,
    state: Mutex<SearchState>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch_suggestions(&self, query: String, seq: u64) {
        match self.words.autocomplete(&query, self.autocomplete_limit).await {
            Ok(suggestions) => {
                let mut state = self.state();
                if state.query_seq != seq {
                    tracing::debug!("Discarding stale suggestions for {:?}", query);
                    return;
                }
                tracing::debug!("{} suggestions for {:?}", suggestions.len(), query);
                state.suggestions = suggestions;
                state.panel_open = true;
                state.phase = SuggestionPhase::Ready;
            }
            Err(error) => {
                tracing::warn!("Autocomplete failed for {:?}: {}", query, error);
                let mut state = self.state();
                if state.query_seq == seq {
                    state.phase = SuggestionPhase::Ready;
                }
            }
        }
    }
}

/// Clears `searching` however the search ends, including cancellation.
struct SearchingGuard<'a>(&'a Inner);

impl Drop for SearchingGuard<'_> {
    fn drop(&mut self) {
        self.0.state().searching = false;
    }
}

impl SearchController {
    pub fn new(
        words: Arc<dyn WordStore>,
        presets: Arc<dyn PresetStore>,
        config: &ClientConfig,
    ) -> Self {
        let placeholders = sample_placeholders(&config.placeholders, config.placeholder_count);
        Self {
            inner: Arc::new(Inner {
                words,
                presets,
                debounce: config.debounce(),
                autocomplete_limit: config.autocomplete_limit,
                placeholder_count: config.placeholder_count,
                placeholder_pool: config.placeholders.clone(),
                timer: DebounceTimer::new(),
                state: Mutex::new(SearchState {
                    placeholders,
                    panel_open: true,
                    ..SearchState::default()
                }),
            }),
        }
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> SearchState {
        self.inner.state().clone()
    }

    pub fn query(&self) -> String {
        self.inner.state().query.clone()
    }

    pub fn filters(&self) -> FilterSelection {
        self.inner.state().filters.clone()
    }

    pub fn presets(&self) -> Vec<SearchPreset> {
        self.inner.state().presets.clone()
    }

    pub fn results(&self) -> Vec<WordEntry> {
        self.inner.state().results.clone()
    }

    pub fn visible_suggestions(&self) -> VisibleSuggestions {
        self.inner.state().visible_suggestions()
    }

    /// Whether an autocomplete fetch is waiting for typing to pause.
    pub fn is_debouncing(&self) -> bool {
        self.inner.timer.is_pending()
    }

    /// Update the query text and advance the suggestion pipeline.
    pub fn set_query(&self, text: impl Into<String>) {
        let query = text.into();
        let length = query.chars().count();

        let mut state = self.inner.state();
        state.query.clone_from(&query);
        state.query_seq += 1;
        let seq = state.query_seq;

        if length >= MIN_AUTOCOMPLETE_CHARS {
            state.phase = SuggestionPhase::Debouncing;
            drop(state);

            let inner: Weak<Inner> = Arc::downgrade(&self.inner);
            self.inner.timer.schedule(self.inner.debounce, async move {
                if let Some(inner) = inner.upgrade() {
                    inner.fetch_suggestions(query, seq).await;
                }
            });
            return;
        }

        self.inner.timer.cancel();
        state.suggestions.clear();
        if length == 0 {
            state.placeholders =
                sample_placeholders(&self.inner.placeholder_pool, self.inner.placeholder_count);
            state.panel_open = true;
            state.phase = SuggestionPhase::Empty;
        } else {
            state.panel_open = false;
            state.phase = SuggestionPhase::TooShort;
        }
    }

    /// Put a suggestion's Balti text in the box without searching.
    pub fn select_suggestion(&self, suggestion: &Suggestion) {
        self.replace_query(suggestion.balti.clone());
    }

    /// Put a placeholder's text in the box without searching.
    pub fn select_placeholder(&self, placeholder: &PlaceholderSuggestion) {
        self.replace_query(placeholder.text.clone());
    }

    /// Set the query text without fetching suggestions; the panel closes.
    pub fn replace_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.inner.timer.cancel();
        let mut state = self.inner.state();
        state.query = query;
        state.query_seq += 1;
        state.panel_open = false;
        state.phase = SuggestionPhase::Ready;
    }

    pub fn close_suggestions(&self) {
        self.inner.state().panel_open = false;
    }

    /// Add or remove a filter value. Returns whether it is now selected.
    pub fn toggle_filter(&self, dimension: FilterDimension, value: impl Into<String>) -> bool {
        self.inner.state().filters.toggle(dimension, value)
    }

    pub fn clear_filters(&self) {
        self.inner.state().filters.clear();
    }

    pub fn set_fuzzy(&self, enabled: bool) {
        self.inner.state().fuzzy = enabled;
    }

    pub fn toggle_fuzzy(&self) -> bool {
        let mut state = self.inner.state();
        state.fuzzy = !state.fuzzy;
        state.fuzzy
    }

    /// Run the full search with the raw query, filters and fuzzy flag.
    ///
    /// Closes the suggestion panel. Results are replaced only on success.
    pub async fn search(&self) -> Result<Vec<WordEntry>> {
        self.inner.timer.cancel();
        let request = {
            let mut state = self.inner.state();
            state.panel_open = false;
            state.query_seq += 1;
            state.searching = true;
            SearchRequest {
                query: state.query.clone(),
                filters: state.filters.clone(),
                fuzzy: state.fuzzy,
            }
        };

        let searching = SearchingGuard(&self.inner);
        let outcome = self.inner.words.search(&request).await;
        drop(searching);

        let mut state = self.inner.state();
        match outcome {
            Ok(results) => {
                tracing::debug!("Search for {:?} returned {} words", request.query, results.len());
                state.results.clone_from(&results);
                Ok(results)
            }
            Err(error) => {
                tracing::error!("Search failed: {}", error);
                Err(error)
            }
        }
    }

    /// Set or clear the signed-in user.
    ///
    /// A newly available user triggers a preset fetch; signing out empties
    /// the cached list.
    pub async fn set_user(&self, user_id: Option<String>) -> Result<()> {
        let user_id = normalize_text_option(user_id);
        {
            let mut state = self.inner.state();
            if state.user_id == user_id {
                return Ok(());
            }
            state.user_id.clone_from(&user_id);
            state.presets.clear();
        }

        if user_id.is_some() {
            self.refresh_presets().await?;
        }
        Ok(())
    }

    /// Replace the cached preset list with the store's current list.
    pub async fn refresh_presets(&self) -> Result<Vec<SearchPreset>> {
        let user_id = self.require_user()?;
        match self.inner.presets.list_presets(&user_id).await {
            Ok(presets) => {
                let mut state = self.inner.state();
                if state.user_id.as_deref() == Some(user_id.as_str()) {
                    state.presets.clone_from(&presets);
                }
                Ok(presets)
            }
            Err(error) => {
                tracing::error!("Failed to load saved searches: {}", error);
                Err(error)
            }
        }
    }

    pub fn open_save_dialog(&self) {
        self.inner.state().save_dialog_open = true;
    }

    pub fn close_save_dialog(&self) {
        let mut state = self.inner.state();
        state.save_dialog_open = false;
        state.preset_name.clear();
    }

    pub fn set_preset_name(&self, name: impl Into<String>) {
        self.inner.state().preset_name = name.into();
    }

    /// Save the current query and filters under the entered preset name.
    ///
    /// Only the first selected value of each filter dimension is stored.
    pub async fn save_preset(&self) -> Result<()> {
        let (user_id, preset) = {
            let state = self.inner.state();
            let name = state.preset_name.trim();
            if name.is_empty() {
                return Err(Error::Validation(
                    "Please enter a name for this search".to_string(),
                ));
            }
            let user_id = state.user_id.clone().ok_or(Error::NotAuthenticated)?;
            let preset = NewSearchPreset {
                name: name.to_string(),
                query: state.query.clone(),
                filters: state.filters.to_preset_filters(),
            };
            (user_id, preset)
        };

        if let Err(error) = self.inner.presets.create_preset(&user_id, &preset).await {
            tracing::error!("Failed to save search {:?}: {}", preset.name, error);
            return Err(error);
        }
        tracing::info!("Saved search {:?}", preset.name);

        {
            let mut state = self.inner.state();
            state.preset_name.clear();
            state.save_dialog_open = false;
        }
        self.refresh_presets().await?;
        Ok(())
    }

    /// `set_preset_name` followed by `save_preset`.
    pub async fn save_preset_as(&self, name: impl Into<String>) -> Result<()> {
        self.set_preset_name(name);
        self.save_preset().await
    }

    /// Restore a preset's query and filters. Does not search.
    pub fn load_preset(&self, preset: &SearchPreset) {
        self.inner.timer.cancel();
        let mut state = self.inner.state();
        state.query.clone_from(&preset.query);
        state.query_seq += 1;
        state.filters = FilterSelection::from(&preset.filters);
        state.panel_open = false;
        state.phase = SuggestionPhase::Ready;
    }

    /// Delete a preset and refetch the whole list.
    pub async fn delete_preset(&self, preset: &SearchPreset) -> Result<()> {
        let preset_id = preset.id.as_deref().ok_or(Error::MissingPresetId)?;
        self.delete_preset_by_id(preset_id).await
    }

    pub async fn delete_preset_by_id(&self, preset_id: &str) -> Result<()> {
        if preset_id.trim().is_empty() {
            return Err(Error::MissingPresetId);
        }
        let user_id = self.require_user()?;

        if let Err(error) = self.inner.presets.delete_preset(&user_id, preset_id).await {
            tracing::error!("Failed to delete saved search {}: {}", preset_id, error);
            return Err(error);
        }
        self.refresh_presets().await?;
        Ok(())
    }

    fn require_user(&self) -> Result<String> {
        self.inner
            .state()
            .user_id
            .clone()
            .ok_or(Error::NotAuthenticated)
    }
}
