//! Recording store doubles for controller tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::{PresetStore, SearchRequest, WordStore};
use crate::error::{Error, Result};
use crate::models::{NewSearchPreset, SearchPreset, Suggestion, WordEntry};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct FakeWordStore {
    pub suggestions: Mutex<Vec<Suggestion>>,
    pub words: Mutex<Vec<WordEntry>>,
    pub search_results: Mutex<Vec<WordEntry>>,
    pub autocomplete_delays: Mutex<HashMap<String, Duration>>,
    pub autocomplete_calls: Mutex<Vec<(String, usize)>>,
    pub search_requests: Mutex<Vec<SearchRequest>>,
    pub search_delay: Mutex<Option<Duration>>,
    pub list_calls: AtomicUsize,
    pub list_delay: Mutex<Option<Duration>>,
    pub fail_autocomplete: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_search: AtomicBool,
}

impl FakeWordStore {
    pub fn with_suggestions(suggestions: Vec<Suggestion>) -> Self {
        let store = Self::default();
        *lock(&store.suggestions) = suggestions;
        store
    }

    pub fn with_words(words: Vec<WordEntry>) -> Self {
        let store = Self::default();
        *lock(&store.words) = words;
        store
    }

    pub fn set_words(&self, words: Vec<WordEntry>) {
        *lock(&self.words) = words;
    }

    pub fn delay_autocomplete(&self, query: &str, delay: Duration) {
        lock(&self.autocomplete_delays).insert(query.to_string(), delay);
    }

    pub fn autocomplete_queries(&self) -> Vec<String> {
        lock(&self.autocomplete_calls)
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    pub fn autocomplete_limits(&self) -> Vec<usize> {
        lock(&self.autocomplete_calls)
            .iter()
            .map(|(_, limit)| *limit)
            .collect()
    }

    pub fn search_requests(&self) -> Vec<SearchRequest> {
        lock(&self.search_requests).clone()
    }
}

#[async_trait]
impl WordStore for FakeWordStore {
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>> {
        lock(&self.autocomplete_calls).push((query.to_string(), limit));
        let delay = lock(&self.autocomplete_delays).get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_autocomplete.load(Ordering::SeqCst) {
            return Err(Error::Api("autocomplete unavailable".to_string()));
        }
        Ok(lock(&self.suggestions)
            .iter()
            .filter(|suggestion| suggestion.balti.contains(query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_words(&self, limit: usize) -> Result<Vec<WordEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *lock(&self.list_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Api("dictionary unavailable".to_string()));
        }
        Ok(lock(&self.words).iter().take(limit).cloned().collect())
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<WordEntry>> {
        lock(&self.search_requests).push(request.clone());
        let delay = *lock(&self.search_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(Error::Api("search unavailable".to_string()));
        }
        Ok(lock(&self.search_results).clone())
    }
}

/// Preset store whose list response is set independently of writes.
#[derive(Debug, Default)]
pub struct FakePresetStore {
    pub listed: Mutex<Vec<SearchPreset>>,
    pub created: Mutex<Vec<(String, NewSearchPreset)>>,
    pub deleted: Mutex<Vec<(String, String)>>,
    pub list_calls: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FakePresetStore {
    pub fn set_listed(&self, presets: Vec<SearchPreset>) {
        *lock(&self.listed) = presets;
    }

    pub fn created(&self) -> Vec<(String, NewSearchPreset)> {
        lock(&self.created).clone()
    }

    pub fn deleted(&self) -> Vec<(String, String)> {
        lock(&self.deleted).clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PresetStore for FakePresetStore {
    async fn list_presets(&self, _user_id: &str) -> Result<Vec<SearchPreset>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Api("presets unavailable".to_string()));
        }
        Ok(lock(&self.listed).clone())
    }

    async fn create_preset(&self, user_id: &str, preset: &NewSearchPreset) -> Result<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Error::Api("Preset name already exists".to_string()));
        }
        lock(&self.created).push((user_id.to_string(), preset.clone()));
        Ok(())
    }

    async fn delete_preset(&self, user_id: &str, preset_id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::Api("Preset not found".to_string()));
        }
        lock(&self.deleted).push((user_id.to_string(), preset_id.to_string()));
        Ok(())
    }
}
