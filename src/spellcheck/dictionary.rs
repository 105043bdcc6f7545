//! Personal dictionary - user-approved words that are always spelled correctly.
//!
//! Stored as plain UTF-8 text, one word per line, no header. The whole file is
//! rewritten on every addition (temp file + rename).

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpellCheckError};
use crate::spellcheck::writer::DictionaryWriter;

/// How additions reach the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistMode {
    /// Write on the calling thread before `insert` returns
    #[default]
    Synchronous,
    /// Hand the write to a background thread
    Background,
}

pub struct PersonalDictionary {
    /// Words in insertion order, casing as entered
    words: Vec<String>,
    /// Lowercased copies for case-insensitive membership
    folded: HashSet<String>,
    /// None for an in-memory dictionary
    path: Option<PathBuf>,
    writer: Option<DictionaryWriter>,
}

impl PersonalDictionary {
    /// Dictionary that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            words: Vec::new(),
            folded: HashSet::new(),
            path: None,
            writer: None,
        }
    }

    pub fn new(path: PathBuf, mode: PersistMode) -> Self {
        let writer = match mode {
            PersistMode::Synchronous => None,
            PersistMode::Background => Some(DictionaryWriter::spawn(path.clone())),
        };
        Self {
            words: Vec::new(),
            folded: HashSet::new(),
            path: Some(path),
            writer,
        }
    }

    /// Read the dictionary file. A missing file is an empty dictionary.
    pub fn load(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        tracing::debug!("Loading personal dictionary from {:?}", path);

        if !path.exists() {
            tracing::debug!("No personal dictionary found, starting empty");
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        self.words.clear();
        self.folded.clear();
        for line in content.lines() {
            let word = line.trim();
            if !word.is_empty() && self.folded.insert(word.to_lowercase()) {
                self.words.push(word.to_string());
            }
        }

        tracing::info!("Loaded {} personal dictionary words", self.words.len());
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.folded.contains(&word.to_lowercase())
    }

    /// Add a word and persist the full list.
    ///
    /// Returns `Ok(false)` if the word was already present in any casing.
    /// The in-memory insert stands even when persisting fails.
    pub fn insert(&mut self, word: &str) -> Result<bool> {
        if !self.folded.insert(word.to_lowercase()) {
            return Ok(false);
        }
        self.words.push(word.to_string());
        self.save()?;
        Ok(true)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Wait for queued background writes; no-op in synchronous mode
    pub fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush();
        }
    }

    /// Background write failures not yet collected. Synchronous mode returns
    /// its failures from `insert` instead, so this is always empty there.
    pub fn take_write_errors(&self) -> Vec<SpellCheckError> {
        self.writer
            .as_ref()
            .map(DictionaryWriter::take_errors)
            .unwrap_or_default()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match &self.writer {
            Some(writer) => {
                writer.save(self.words.clone());
                Ok(())
            }
            None => write_word_file(path, &self.words),
        }
    }
}

/// Write `words` one per line, replacing `path` atomically
pub(crate) fn write_word_file(path: &Path, words: &[String]) -> Result<()> {
    tracing::debug!("Persisting {} personal dictionary words to {:?}", words.len(), path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SpellCheckError::Persist(e.to_string()))?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)
            .map_err(|e| SpellCheckError::Persist(format!("Failed to create temp file: {}", e)))?;
        for word in words {
            writeln!(file, "{}", word)
                .map_err(|e| SpellCheckError::Persist(format!("Failed to write: {}", e)))?;
        }
        file.sync_all()
            .map_err(|e| SpellCheckError::Persist(format!("Failed to sync: {}", e)))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SpellCheckError::Persist(format!("Failed to rename: {}", e))
    })?;
    Ok(())
}
