//! Word matching and word-by-word substitution against a dictionary snapshot.

use std::collections::HashSet;

use super::TranslationDirection;
use crate::models::WordEntry;
use crate::util::tokenize;

/// How an input token is compared with a dictionary field.
///
/// Match discovery uses `Contains`; translation uses `ExactCaseInsensitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Field contains the token, ignoring case
    Contains,
    /// Field equals the token, ignoring case
    ExactCaseInsensitive,
}

impl MatchPolicy {
    #[must_use]
    pub fn matches(self, field: &str, token: &str) -> bool {
        let field = field.to_lowercase();
        let token = token.to_lowercase();
        match self {
            Self::Contains => field.contains(&token),
            Self::ExactCaseInsensitive => field == token,
        }
    }
}

/// Entries whose source field contains any input token.
///
/// Results keep first-match order across tokens and never repeat an entry.
#[must_use]
pub fn find_matching_words(
    input: &str,
    snapshot: &[WordEntry],
    direction: TranslationDirection,
) -> Vec<WordEntry> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for token in tokenize(input) {
        for entry in snapshot {
            if MatchPolicy::Contains.matches(direction.source_text(entry), token)
                && seen.insert(&entry.id)
            {
                matches.push(entry.clone());
            }
        }
    }

    matches
}

/// Translate token by token; unknown tokens come back as `[token]`.
#[must_use]
pub fn translate_text(input: &str, snapshot: &[WordEntry], direction: TranslationDirection) -> String {
    tokenize(input)
        .map(|token| {
            snapshot
                .iter()
                .find(|entry| {
                    MatchPolicy::ExactCaseInsensitive.matches(direction.source_text(entry), token)
                })
                .map_or_else(
                    || format!("[{token}]"),
                    |entry| direction.target_text(entry).to_string(),
                )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
