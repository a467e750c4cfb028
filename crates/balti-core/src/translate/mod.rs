//! Word-by-word translation helper.
//!
//! `TranslationController` keeps an in-memory snapshot of the dictionary and
//! translates against it locally. Results are only as fresh as the last
//! snapshot fetch.

mod direction;
mod matching;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub use direction::TranslationDirection;
pub use matching::{find_matching_words, translate_text, MatchPolicy};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::WordEntry;
use crate::store::WordStore;

/// Observable state of the translation helper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    pub direction: TranslationDirection,
    pub input: String,
    pub output: String,
    /// Advisory substring matches for the current input
    pub matches: Vec<WordEntry>,
    pub snapshot: Vec<WordEntry>,
    /// A dictionary fetch is in flight
    pub loading: bool,
    /// The processing indicator is showing
    pub translating: bool,
    /// Bumped whenever input/output are reset, so late results are dropped
    generation: u64,
}

impl TranslationState {
    fn recompute_matches(&mut self) {
        self.matches = find_matching_words(&self.input, &self.snapshot, self.direction);
    }

    fn reset_text(&mut self) {
        self.input.clear();
        self.output.clear();
        self.matches.clear();
        self.generation += 1;
    }
}

/// Translation helper over a dictionary snapshot.
#[derive(Clone)]
pub struct TranslationController {
    inner: Arc<Inner>,
}

struct Inner {
    words: Arc<dyn WordStore>,
    page_size: usize,
    delay: Duration,
    state: Mutex<TranslationState>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, TranslationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `loading` however the fetch ends, including cancellation.
struct LoadingGuard<'a>(&'a Inner);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.state().loading = false;
    }
}

/// Clears `translating` however the delay ends, including cancellation.
struct TranslatingGuard<'a>(&'a Inner);

impl Drop for TranslatingGuard<'_> {
    fn drop(&mut self) {
        self.0.state().translating = false;
    }
}

impl TranslationController {
    pub fn new(words: Arc<dyn WordStore>, config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                words,
                page_size: config.dictionary_page_size,
                delay: config.translate_delay(),
                state: Mutex::new(TranslationState::default()),
            }),
        }
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> TranslationState {
        self.inner.state().clone()
    }

    pub fn direction(&self) -> TranslationDirection {
        self.inner.state().direction
    }

    pub fn output(&self) -> String {
        self.inner.state().output.clone()
    }

    pub fn matches(&self) -> Vec<WordEntry> {
        self.inner.state().matches.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state().loading
    }

    /// Fetch the dictionary snapshot. Returns the number of entries loaded.
    ///
    /// Refused with [`Error::Busy`] while another fetch is in flight. On
    /// failure the previous snapshot is kept.
    pub async fn load_dictionary(&self) -> Result<usize> {
        {
            let mut state = self.inner.state();
            if state.loading {
                return Err(Error::Busy);
            }
            state.loading = true;
        }
        let _loading = LoadingGuard(&self.inner);

        let fetched = self.inner.words.list_words(self.inner.page_size).await;
        let mut words = match fetched {
            Ok(words) => words,
            Err(error) => {
                tracing::error!("Failed to load dictionary: {}", error);
                return Err(error);
            }
        };
        words.truncate(self.inner.page_size);

        let mut state = self.inner.state();
        state.snapshot = words;
        state.recompute_matches();
        tracing::debug!("Dictionary snapshot holds {} words", state.snapshot.len());
        Ok(state.snapshot.len())
    }

    /// Manual refresh; same fetch as the initial load.
    pub async fn refresh_dictionary(&self) -> Result<usize> {
        self.load_dictionary().await
    }

    /// Replace the input text and recompute matches.
    pub fn set_input(&self, text: impl Into<String>) {
        let mut state = self.inner.state();
        state.input = text.into();
        state.recompute_matches();
    }

    /// Flip the direction, discarding input, output and matches.
    pub fn toggle_direction(&self) -> TranslationDirection {
        let mut state = self.inner.state();
        state.direction = state.direction.flipped();
        state.reset_text();
        tracing::debug!("Translation direction is now {}", state.direction);
        state.direction
    }

    /// Discard input, output and matches without changing direction.
    pub fn clear(&self) {
        self.inner.state().reset_text();
    }

    /// Translate the current input after the processing delay.
    ///
    /// Refused with [`Error::Busy`] while another translation is waiting.
    /// If the text is reset while waiting, the output is not stored; the
    /// returned string is still the translation of the original input in the
    /// original direction.
    pub async fn translate(&self) -> Result<String> {
        let (input, direction, generation) = {
            let mut state = self.inner.state();
            if state.translating {
                return Err(Error::Busy);
            }
            state.translating = true;
            (state.input.clone(), state.direction, state.generation)
        };
        self.finish_translation(input, direction, generation).await
    }

    async fn finish_translation(
        &self,
        input: String,
        direction: TranslationDirection,
        generation: u64,
    ) -> Result<String> {
        let _translating = TranslatingGuard(&self.inner);
        tokio::time::sleep(self.inner.delay).await;

        let mut state = self.inner.state();
        let output = translate_text(&input, &state.snapshot, direction);
        if state.generation == generation {
            state.output.clone_from(&output);
        } else {
            tracing::debug!("Discarding translation of reset input");
        }
        Ok(output)
    }

    /// Use a matched word as the input and translate it.
    ///
    /// Refused with [`Error::Busy`], leaving the input untouched, while
    /// another translation is waiting.
    pub async fn select_word(&self, entry: &WordEntry) -> Result<String> {
        let (input, direction, generation) = {
            let mut state = self.inner.state();
            if state.translating {
                return Err(Error::Busy);
            }
            state.input = state.direction.source_text(entry).to_string();
            state.recompute_matches();
            state.translating = true;
            (state.input.clone(), state.direction, state.generation)
        };
        self.finish_translation(input, direction, generation).await
    }
}
