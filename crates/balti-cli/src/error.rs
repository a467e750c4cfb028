use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] balti_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Nothing to translate")]
    EmptyTranslationInput,
    #[error("No saved search named '{0}'")]
    PresetNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Saved searches need a user. Pass --user, set BALTI_USER_ID, or run `balti config init --user <ID>`."
    )]
    UserRequired,
}
