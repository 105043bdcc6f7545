//! Spell backend capability and platform backend selection.
//!
//! The checker only ever talks to `dyn SpellBackend`. Which implementation it
//! gets is decided by a `BackendProvider`, once at startup and again whenever
//! the language changes. Platform differences live entirely in
//! `PlatformProvider::default_search_dirs`.

use std::path::{Path, PathBuf};

use crate::error::{Result, SpellCheckError};
use crate::spellcheck::wordlist::WordListBackend;
use crate::validation::{file_stem_to_language, language_to_file_stem};

/// Something that can answer "is this word in a known dictionary".
pub trait SpellBackend: Send + Sync {
    fn check_word(&self, word: &str) -> bool;

    /// Correction candidates, best first. May return more than the UI shows.
    fn suggest(&self, word: &str) -> Vec<String>;
}

/// Factory for language-specific backends.
pub trait BackendProvider: Send + Sync {
    fn create(&self, language: &str) -> Result<Box<dyn SpellBackend>>;

    /// Language tags this provider can build a backend for.
    fn available_languages(&self) -> Vec<String>;
}

/// Loads hunspell-format dictionaries from the platform's usual locations.
#[derive(Debug, Clone)]
pub struct PlatformProvider {
    search_dirs: Vec<PathBuf>,
}

impl PlatformProvider {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Provider over the default dictionary directories for this host,
    /// plus `<app-data-dir>/dictionaries` for user-installed files.
    pub fn for_host() -> Self {
        let mut dirs = Vec::new();
        if let Some(data) = crate::config::data_dir() {
            dirs.push(data.join("dictionaries"));
        }
        dirs.extend(Self::default_search_dirs());
        Self::new(dirs)
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    #[cfg(target_os = "linux")]
    fn default_search_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(base) = directories::BaseDirs::new() {
            dirs.push(base.data_dir().join("hunspell"));
        }
        dirs.extend(
            [
                "/usr/share/hunspell",
                "/usr/share/myspell",
                "/usr/share/myspell/dicts",
                "/usr/local/share/hunspell",
            ]
            .iter()
            .map(PathBuf::from),
        );
        dirs
    }

    #[cfg(target_os = "macos")]
    fn default_search_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(base) = directories::BaseDirs::new() {
            dirs.push(base.home_dir().join("Library/Spelling"));
        }
        dirs.push(PathBuf::from("/Library/Spelling"));
        dirs.push(PathBuf::from("/opt/homebrew/share/hunspell"));
        dirs
    }

    #[cfg(target_os = "windows")]
    fn default_search_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(base) = directories::BaseDirs::new() {
            dirs.push(base.data_local_dir().join("hunspell"));
        }
        dirs
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    fn default_search_dirs() -> Vec<PathBuf> {
        vec![PathBuf::from("/usr/local/share/hunspell")]
    }

    /// First `<stem>.dic` found across the search directories
    fn find_dictionary(&self, language: &str) -> Option<PathBuf> {
        let file_name = format!("{}.dic", language_to_file_stem(language));
        self.search_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file())
    }
}

impl BackendProvider for PlatformProvider {
    fn create(&self, language: &str) -> Result<Box<dyn SpellBackend>> {
        let path = self
            .find_dictionary(language)
            .ok_or_else(|| SpellCheckError::DictionaryNotFound(language.to_string()))?;
        tracing::debug!("Loading {} dictionary from {:?}", language, path);
        let backend = WordListBackend::from_dic_file(&path)?;
        tracing::info!("Loaded {} words for {}", backend.len(), language);
        Ok(Box::new(backend))
    }

    fn available_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .search_dirs
            .iter()
            .flat_map(|dir| dictionary_stems(dir))
            .map(|stem| file_stem_to_language(&stem))
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }
}

/// File stems of every `.dic` in `dir`. Missing directories yield nothing.
fn dictionary_stems(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "dic"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect()
}
