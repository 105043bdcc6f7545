use crossbeam_channel::{unbounded, Receiver, Sender};
use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{Result, SpellCheckError};

// Default configuration
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
pub const PERSONAL_DICTIONARY_FILE: &str = "personal_dictionary.txt";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub enable_spell_check: bool,
    #[serde(default = "default_language")]
    pub spell_check_language: String,
    /// Maximum number of cached word verdicts
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Write the personal dictionary from a background thread instead of the UI thread
    #[serde(default)]
    pub background_persistence: bool,
    #[serde(default)]
    pub theme: String,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_spell_check: true,
            spell_check_language: default_language(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            background_persistence: false,
            theme: "dark".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sid3xyz", "slirc-spellcheck")
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

/// Application data directory (`<app-data-dir>`), not created here
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.data_dir().to_path_buf())
}

/// Location of the personal dictionary file
pub fn personal_dictionary_path() -> Result<PathBuf> {
    data_dir()
        .map(|dir| dir.join(PERSONAL_DICTIONARY_FILE))
        .ok_or(SpellCheckError::NoDataDir)
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let data = serde_json::to_string_pretty(settings)?;
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}

/// A runtime setting value that notifies subscribers when it changes.
///
/// Consumers receive a `Receiver` at construction time instead of reaching
/// into a process-wide settings object.
pub struct ObservableSetting<T: Clone> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<Sender<T>>>,
}

impl<T: Clone + PartialEq> ObservableSetting<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self) -> T {
        self.value.lock().clone()
    }

    /// Store a new value. Subscribers are only notified on an actual change.
    pub fn set(&self, value: T) {
        {
            let mut current = self.value.lock();
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        // Drop subscribers whose receiver has gone away
        self.subscribers
            .lock()
            .retain(|tx| tx.send(value.clone()).is_ok());
    }

    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_for_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "light"}"#).unwrap();
        assert!(settings.enable_spell_check);
        assert_eq!(settings.spell_check_language, "en-US");
        assert_eq!(settings.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(!settings.background_persistence);
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_settings_roundtrip_disabled() {
        let settings = Settings {
            enable_spell_check: false,
            spell_check_language: "de-DE".to_string(),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_personal_dictionary_path_file_name() {
        match personal_dictionary_path() {
            Ok(path) => {
                assert!(path.ends_with(PERSONAL_DICTIONARY_FILE));
                assert!(path.to_string_lossy().contains("slirc-spellcheck"));
            }
            // Headless environments without a home directory
            Err(e) => assert!(matches!(e, SpellCheckError::NoDataDir)),
        }
    }

    #[test]
    fn test_observable_setting_notifies_on_change_only() {
        let setting = ObservableSetting::new(true);
        let rx = setting.subscribe();

        setting.set(true);
        assert!(rx.try_recv().is_err());

        setting.set(false);
        assert_eq!(rx.try_recv(), Ok(false));
        assert!(!setting.get());
    }

    #[test]
    fn test_observable_setting_drops_closed_subscribers() {
        let setting = ObservableSetting::new(0u32);
        let rx = setting.subscribe();
        drop(setting.subscribe());

        setting.set(1);
        assert_eq!(setting.subscribers.lock().len(), 1);
        assert_eq!(rx.try_recv(), Ok(1));
    }
}
