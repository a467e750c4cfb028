//! balti-core - Core library for the Balti dictionary
//!
//! This crate contains the shared models, the Word Store and Preset Store
//! contracts, and the search and translation controllers used by every Balti
//! dictionary front end.

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;
pub mod timer;
pub mod translate;
pub mod util;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{
    FilterDimension, FilterSelection, PlaceholderSuggestion, PresetFilters, SearchPreset,
    Suggestion, WordEntry, WordId,
};
pub use search::SearchController;
pub use translate::{TranslationController, TranslationDirection};
