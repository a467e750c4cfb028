//! Data models for the Balti dictionary client

mod filters;
mod preset;
mod word;

pub use filters::{FilterDimension, FilterSelection};
pub use preset::{NewSearchPreset, PresetFilters, SearchPreset};
pub use word::{PlaceholderSuggestion, Suggestion, WordEntry, WordId};
