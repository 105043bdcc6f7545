//! Error types for the spell-check subsystem.
//!
//! None of these escape the checker's public checking API: every failure path
//! there degrades to "treat the text as correctly spelled".

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SpellCheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No dictionary files for the language were found in any search directory
    #[error("Dictionary not found for language: {0}")]
    DictionaryNotFound(String),

    #[error("Dictionary file contains no words: {}", .0.display())]
    EmptyDictionary(PathBuf),

    #[error("Invalid language tag: {0}")]
    InvalidLanguage(String),

    /// Failed to write the personal dictionary
    #[error("Failed to persist personal dictionary: {0}")]
    Persist(String),

    #[error("Could not determine application data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, SpellCheckError>;
