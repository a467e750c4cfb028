//! In-process stores for offline use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{PresetStore, SearchRequest, WordStore};
use crate::error::{Error, Result};
use crate::models::{FilterDimension, NewSearchPreset, SearchPreset, Suggestion, WordEntry};

/// Word Store over a fixed list of entries, e.g. an exported word list.
///
/// Filters are applied to the fields an entry carries; feedback status and
/// fuzzy matching are server-side concerns and are ignored here.
#[derive(Debug, Clone, Default)]
pub struct MemoryWordStore {
    words: Vec<WordEntry>,
}

impl MemoryWordStore {
    #[must_use]
    pub const fn new(words: Vec<WordEntry>) -> Self {
        Self { words }
    }

    /// Load a JSON array of word entries.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let words = serde_json::from_str::<Vec<WordEntry>>(&raw)?;
        tracing::debug!("Loaded {} words from {}", words.len(), path.display());
        Ok(Self::new(words))
    }
}

fn text_matches(entry: &WordEntry, needle: &str) -> bool {
    needle.is_empty()
        || entry.balti.to_lowercase().contains(needle)
        || entry.english.to_lowercase().contains(needle)
}

fn field_matches(request: &SearchRequest, dimension: FilterDimension, field: Option<&str>) -> bool {
    let selected = request.filters.values(dimension);
    selected.is_empty() || field.is_some_and(|value| selected.contains(value))
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn autocomplete(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .words
            .iter()
            .filter(|entry| text_matches(entry, &needle))
            .take(limit)
            .map(Suggestion::from)
            .collect())
    }

    async fn list_words(&self, limit: usize) -> Result<Vec<WordEntry>> {
        Ok(self.words.iter().take(limit).cloned().collect())
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<WordEntry>> {
        let needle = request.query.trim().to_lowercase();
        Ok(self
            .words
            .iter()
            .filter(|entry| text_matches(entry, &needle))
            .filter(|entry| {
                field_matches(request, FilterDimension::Category, entry.category.as_deref())
                    && field_matches(request, FilterDimension::Dialect, entry.dialect.as_deref())
                    && field_matches(
                        request,
                        FilterDimension::Difficulty,
                        entry.difficulty.as_deref(),
                    )
            })
            .cloned()
            .collect())
    }
}

/// Preset Store kept in memory, keyed by user id.
///
/// When opened on a file, every write is mirrored to it as JSON so saved
/// searches survive between runs.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    inner: Mutex<PresetTable>,
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PresetTable {
    next_id: u64,
    by_user: HashMap<String, Vec<SearchPreset>>,
}

impl MemoryPresetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load presets from `path` if it exists; later writes are saved there.
    pub fn open(path: &Path) -> Result<Self> {
        let table = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<PresetTable>(&raw)?
        } else {
            PresetTable::default()
        };
        tracing::debug!("Opened preset file {}", path.display());
        Ok(Self {
            inner: Mutex::new(table),
            path: Some(path.to_path_buf()),
        })
    }

    fn table(&self) -> MutexGuard<'_, PresetTable> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, table: &PresetTable) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(table)?)?;
        Ok(())
    }
}

#[async_trait]
impl PresetStore for MemoryPresetStore {
    async fn list_presets(&self, user_id: &str) -> Result<Vec<SearchPreset>> {
        Ok(self
            .table()
            .by_user
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_preset(&self, user_id: &str, preset: &NewSearchPreset) -> Result<()> {
        let mut table = self.table();
        let duplicate = table
            .by_user
            .get(user_id)
            .is_some_and(|presets| presets.iter().any(|existing| existing.name == preset.name));
        if duplicate {
            return Err(Error::Api(format!(
                "A preset named '{}' already exists",
                preset.name
            )));
        }

        table.next_id += 1;
        let id = format!("preset-{}", table.next_id);
        table
            .by_user
            .entry(user_id.to_string())
            .or_default()
            .push(SearchPreset {
                id: Some(id),
                name: preset.name.clone(),
                query: preset.query.clone(),
                filters: preset.filters.clone(),
            });
        self.persist(&table)
    }

    async fn delete_preset(&self, user_id: &str, preset_id: &str) -> Result<()> {
        let mut table = self.table();
        let removed = table.by_user.get_mut(user_id).is_some_and(|presets| {
            let before = presets.len();
            presets.retain(|preset| preset.id.as_deref() != Some(preset_id));
            presets.len() < before
        });
        if !removed {
            return Err(Error::Api(format!("Preset not found: {preset_id}")));
        }
        self.persist(&table)
    }
}
