//! Word model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a word in the Word Store.
///
/// The store owns identifiers; the client treats them as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    /// Wrap a store-issued identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A dictionary entry as served by the Word Store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Store identifier
    #[serde(alias = "_id")]
    pub id: WordId,
    /// Balti headword
    pub balti: String,
    /// English gloss
    pub english: String,
    /// Pronunciation guide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_notes: Option<String>,
}

impl WordEntry {
    /// Create an entry with only the required fields set
    #[must_use]
    pub fn new(id: impl Into<String>, balti: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            id: WordId::new(id),
            balti: balti.into(),
            english: english.into(),
            phonetic: None,
            category: None,
            dialect: None,
            difficulty: None,
            usage_notes: None,
        }
    }
}

/// Autocomplete suggestion returned by the Word Store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(alias = "_id")]
    pub id: WordId,
    pub balti: String,
    pub english: String,
}

impl From<&WordEntry> for Suggestion {
    fn from(entry: &WordEntry) -> Self {
        Self {
            id: entry.id.clone(),
            balti: entry.balti.clone(),
            english: entry.english.clone(),
        }
    }
}

/// Curated suggestion shown when the store has nothing to offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSuggestion {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl PlaceholderSuggestion {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            hint: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
