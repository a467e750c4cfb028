use rand::seq::SliceRandom;

use crate::models::{FilterSelection, PlaceholderSuggestion, SearchPreset, Suggestion, WordEntry};

/// Where the suggestion pipeline is for the current query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionPhase {
    /// Query is empty; placeholders are offered
    #[default]
    Empty,
    /// One character typed; nothing is offered
    TooShort,
    /// Waiting for typing to pause before fetching
    Debouncing,
    /// Last fetch for this query has settled
    Ready,
}

/// What the suggestion panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleSuggestions {
    Hidden,
    Database(Vec<Suggestion>),
    Placeholders(Vec<PlaceholderSuggestion>),
}

/// Observable state of the search box, filters and saved searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub phase: SuggestionPhase,
    pub suggestions: Vec<Suggestion>,
    pub placeholders: Vec<PlaceholderSuggestion>,
    pub panel_open: bool,
    pub filters: FilterSelection,
    pub fuzzy: bool,
    pub results: Vec<WordEntry>,
    pub searching: bool,
    pub user_id: Option<String>,
    pub presets: Vec<SearchPreset>,
    pub preset_name: String,
    pub save_dialog_open: bool,
    /// Bumped on every query change; tags autocomplete requests
    pub(crate) query_seq: u64,
}

impl SearchState {
    /// Database suggestions win whenever there are any.
    #[must_use]
    pub fn visible_suggestions(&self) -> VisibleSuggestions {
        if !self.panel_open {
            VisibleSuggestions::Hidden
        } else if self.suggestions.is_empty() {
            VisibleSuggestions::Placeholders(self.placeholders.clone())
        } else {
            VisibleSuggestions::Database(self.suggestions.clone())
        }
    }
}

/// Draw up to `count` distinct placeholders from the pool.
pub fn sample_placeholders(
    pool: &[PlaceholderSuggestion],
    count: usize,
) -> Vec<PlaceholderSuggestion> {
    pool.choose_multiple(&mut rand::thread_rng(), count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_placeholders;
    use crate::models::WordId;

    #[test]
    fn sampling_draws_distinct_pool_members() {
        let pool = default_placeholders();
        let sample = sample_placeholders(&pool, 4);

        assert_eq!(sample.len(), 4);
        for placeholder in &sample {
            assert!(pool.contains(placeholder));
        }
        for (index, placeholder) in sample.iter().enumerate() {
            assert!(!sample[index + 1..].contains(placeholder));
        }
    }

    #[test]
    fn sampling_small_pool_returns_everything() {
        let pool = vec![PlaceholderSuggestion::new("julley")];
        assert_eq!(sample_placeholders(&pool, 4), pool);
    }

    #[test]
    fn database_suggestions_take_priority() {
        let mut state = SearchState {
            panel_open: true,
            placeholders: vec![PlaceholderSuggestion::new("ama")],
            ..SearchState::default()
        };
        assert!(matches!(
            state.visible_suggestions(),
            VisibleSuggestions::Placeholders(_)
        ));

        state.suggestions = vec![Suggestion {
            id: WordId::new("w1"),
            balti: "julley".to_string(),
            english: "hello".to_string(),
        }];
        assert!(matches!(
            state.visible_suggestions(),
            VisibleSuggestions::Database(_)
        ));

        state.panel_open = false;
        assert_eq!(state.visible_suggestions(), VisibleSuggestions::Hidden);
    }
}
