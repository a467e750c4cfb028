//! Multi-select search filters

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PresetFilters;

/// One of the four independent filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Category,
    Dialect,
    Difficulty,
    Feedback,
}

impl FilterDimension {
    pub const ALL: [Self; 4] = [
        Self::Category,
        Self::Dialect,
        Self::Difficulty,
        Self::Feedback,
    ];

    /// Query-string key used by the search endpoint
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Dialect => "dialect",
            Self::Difficulty => "difficulty",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" | "categories" => Ok(Self::Category),
            "dialect" | "dialects" => Ok(Self::Dialect),
            "difficulty" | "difficulties" => Ok(Self::Difficulty),
            "feedback" => Ok(Self::Feedback),
            other => Err(format!("unknown filter dimension '{other}'")),
        }
    }
}

/// Selected filter values, one set per dimension.
///
/// Sets are ordered so that "the first selected value" is well defined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub dialects: BTreeSet<String>,
    #[serde(default)]
    pub difficulties: BTreeSet<String>,
    #[serde(default)]
    pub feedback: BTreeSet<String>,
}

impl FilterSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values selected for a dimension
    #[must_use]
    pub const fn values(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &self.categories,
            FilterDimension::Dialect => &self.dialects,
            FilterDimension::Difficulty => &self.difficulties,
            FilterDimension::Feedback => &self.feedback,
        }
    }

    fn values_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &mut self.categories,
            FilterDimension::Dialect => &mut self.dialects,
            FilterDimension::Difficulty => &mut self.difficulties,
            FilterDimension::Feedback => &mut self.feedback,
        }
    }

    /// Add the value when absent, remove it when present.
    ///
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, dimension: FilterDimension, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.values_mut(dimension);
        if values.remove(&value) {
            false
        } else {
            values.insert(value);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, dimension: FilterDimension, value: &str) -> bool {
        self.values(dimension).contains(value)
    }

    /// First selected value of a dimension in sorted order
    #[must_use]
    pub fn first(&self, dimension: FilterDimension) -> Option<&str> {
        self.values(dimension).iter().next().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|dimension| self.values(*dimension).is_empty())
    }

    pub fn clear(&mut self) {
        for dimension in FilterDimension::ALL {
            self.values_mut(dimension).clear();
        }
    }

    /// Collapse to the single-value shape persisted with presets
    #[must_use]
    pub fn to_preset_filters(&self) -> PresetFilters {
        PresetFilters {
            category: self.first(FilterDimension::Category).map(str::to_string),
            dialect: self.first(FilterDimension::Dialect).map(str::to_string),
            difficulty: self.first(FilterDimension::Difficulty).map(str::to_string),
            feedback: self.first(FilterDimension::Feedback).map(str::to_string),
        }
    }

    /// `(key, value)` pairs for every selected value, in dimension order
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        FilterDimension::ALL
            .iter()
            .flat_map(|dimension| {
                self.values(*dimension)
                    .iter()
                    .map(move |value| (dimension.as_str(), value.as_str()))
            })
            .collect()
    }
}

impl From<&PresetFilters> for FilterSelection {
    fn from(filters: &PresetFilters) -> Self {
        fn singleton(value: Option<&String>) -> BTreeSet<String> {
            value.cloned().into_iter().collect()
        }

        Self {
            categories: singleton(filters.category.as_ref()),
            dialects: singleton(filters.dialect.as_ref()),
            difficulties: singleton(filters.difficulty.as_ref()),
            feedback: singleton(filters.feedback.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggling_twice_restores_selection() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Dialect, "skardu");
        let before = selection.clone();

        assert!(selection.toggle(FilterDimension::Category, "greetings"));
        assert!(!selection.toggle(FilterDimension::Category, "greetings"));
        assert_eq!(selection, before);
    }

    #[test]
    fn dimensions_are_independent() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Category, "food");
        selection.toggle(FilterDimension::Category, "family");
        selection.toggle(FilterDimension::Difficulty, "beginner");

        assert!(selection.contains(FilterDimension::Category, "food"));
        assert!(selection.contains(FilterDimension::Category, "family"));
        assert!(selection.contains(FilterDimension::Difficulty, "beginner"));
        assert!(selection.values(FilterDimension::Dialect).is_empty());
    }

    #[test]
    fn preset_filters_keep_first_value_only() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Category, "nature");
        selection.toggle(FilterDimension::Category, "food");

        let filters = selection.to_preset_filters();
        assert_eq!(filters.category.as_deref(), Some("food"));
        assert_eq!(filters.dialect, None);
    }

    #[test]
    fn preset_filters_expand_to_singletons() {
        let filters = PresetFilters {
            category: Some("food".to_string()),
            dialect: None,
            difficulty: Some("advanced".to_string()),
            feedback: None,
        };
        let selection = FilterSelection::from(&filters);

        assert_eq!(selection.categories.len(), 1);
        assert!(selection.contains(FilterDimension::Difficulty, "advanced"));
        assert!(selection.dialects.is_empty());
        assert_eq!(selection.to_preset_filters(), filters);
    }

    #[test]
    fn query_pairs_list_every_value() {
        let mut selection = FilterSelection::new();
        selection.toggle(FilterDimension::Feedback, "verified");
        selection.toggle(FilterDimension::Category, "food");
        selection.toggle(FilterDimension::Category, "animals");

        assert_eq!(
            selection.query_pairs(),
            vec![
                ("category", "animals"),
                ("category", "food"),
                ("feedback", "verified"),
            ]
        );
    }

    #[test]
    fn parses_dimension_names() {
        assert_eq!(
            "Dialects".parse::<FilterDimension>(),
            Ok(FilterDimension::Dialect)
        );
        assert!("colour".parse::<FilterDimension>().is_err());
    }
}
