//! Saved search preset model

use serde::{Deserialize, Serialize};

/// Single-value filters persisted with a preset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// A saved search owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreset {
    /// Store identifier, absent until persisted
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: PresetFilters,
}

/// Request body for creating a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSearchPreset {
    pub name: String,
    pub query: String,
    pub filters: PresetFilters,
}
