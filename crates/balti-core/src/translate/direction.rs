use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::WordEntry;

/// Which dictionary field is the source and which the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationDirection {
    #[default]
    BaltiToEnglish,
    EnglishToBalti,
}

impl TranslationDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::BaltiToEnglish => Self::EnglishToBalti,
            Self::EnglishToBalti => Self::BaltiToEnglish,
        }
    }

    /// Field matched against the input
    #[must_use]
    pub fn source_text(self, entry: &WordEntry) -> &str {
        match self {
            Self::BaltiToEnglish => &entry.balti,
            Self::EnglishToBalti => &entry.english,
        }
    }

    /// Field emitted as the translation
    #[must_use]
    pub fn target_text(self, entry: &WordEntry) -> &str {
        match self {
            Self::BaltiToEnglish => &entry.english,
            Self::EnglishToBalti => &entry.balti,
        }
    }

    #[must_use]
    pub const fn source_language(self) -> &'static str {
        match self {
            Self::BaltiToEnglish => "Balti",
            Self::EnglishToBalti => "English",
        }
    }

    #[must_use]
    pub const fn target_language(self) -> &'static str {
        self.flipped().source_language()
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source_language(), self.target_language())
    }
}

impl FromStr for TranslationDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balti-to-english" | "balti-english" | "bal-en" => Ok(Self::BaltiToEnglish),
            "english-to-balti" | "english-balti" | "en-bal" => Ok(Self::EnglishToBalti),
            other => Err(format!("unknown translation direction '{other}'")),
        }
    }
}
