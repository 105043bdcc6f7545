//! The spell checker: single authority for "is this word spelled correctly".
//!
//! Lookup order is cache, then personal dictionary, then backend. Every
//! failure path degrades to "correct" so a broken dictionary or missing
//! backend never gets in the way of typing.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{Settings, DEFAULT_LANGUAGE};
use crate::error::{Result, SpellCheckError};
use crate::protocol::SpellEvent;
use crate::spellcheck::backend::{BackendProvider, SpellBackend};
use crate::spellcheck::cache::ResultCache;
use crate::spellcheck::dictionary::PersonalDictionary;
use crate::validation::{validate_dictionary_word, validate_language_tag};

pub const MAX_SUGGESTIONS: usize = 5;
/// Words shorter than this are always treated as correct
pub const MIN_WORD_LENGTH: usize = 2;

/// Construction options, usually derived from `Settings`
#[derive(Debug, Clone)]
pub struct SpellCheckOptions {
    pub enabled: bool,
    pub language: String,
    pub cache_capacity: usize,
}

impl Default for SpellCheckOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            language: DEFAULT_LANGUAGE.to_string(),
            cache_capacity: crate::config::DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl From<&Settings> for SpellCheckOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            enabled: settings.enable_spell_check,
            language: settings.spell_check_language.clone(),
            cache_capacity: settings.cache_capacity,
        }
    }
}

pub struct SpellChecker {
    enabled: AtomicBool,
    language: RwLock<String>,
    provider: Box<dyn BackendProvider>,
    /// None when the backend could not be built; every word is then correct
    backend: RwLock<Option<Box<dyn SpellBackend>>>,
    cache: ResultCache,
    dictionary: Mutex<PersonalDictionary>,
    /// Changes to the `enable_spell_check` setting
    enabled_source: Receiver<bool>,
    subscribers: Mutex<Vec<Sender<SpellEvent>>>,
    /// Set once the first dictionary I/O error has been reported
    dictionary_error_reported: AtomicBool,
}

impl SpellChecker {
    /// Build a checker. The backend for `options.language` is created here;
    /// a failure leaves the checker in pass-through mode.
    ///
    /// `enabled_source` delivers changes of the enable setting; pass
    /// `crossbeam_channel::never()` when there is none.
    pub fn new(
        provider: Box<dyn BackendProvider>,
        dictionary: PersonalDictionary,
        options: SpellCheckOptions,
        enabled_source: Receiver<bool>,
    ) -> Self {
        let language = if validate_language_tag(&options.language).is_ok() {
            options.language
        } else {
            tracing::warn!(
                "Invalid spell check language '{}', using {}",
                options.language,
                DEFAULT_LANGUAGE
            );
            DEFAULT_LANGUAGE.to_string()
        };
        let backend = create_backend(provider.as_ref(), &language);

        Self {
            enabled: AtomicBool::new(options.enabled),
            language: RwLock::new(language),
            provider,
            backend: RwLock::new(backend),
            cache: ResultCache::new(options.cache_capacity),
            dictionary: Mutex::new(dictionary),
            enabled_source,
            subscribers: Mutex::new(Vec::new()),
            dictionary_error_reported: AtomicBool::new(false),
        }
    }

    /// Load the personal dictionary from disk. Errors are logged and reported
    /// once through `SpellEvent::DictionaryError`; the dictionary stays usable.
    pub fn load_personal_dictionary(&self) {
        let result = self.dictionary.lock().load();
        if let Err(e) = result {
            self.report_dictionary_error(&e);
        }
    }

    /// Receive checker notifications. Closed receivers are pruned on the next emit.
    pub fn subscribe(&self) -> Receiver<SpellEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Apply pending changes from the enable setting and report background
    /// dictionary write failures. Returns true if any setting change arrived.
    pub fn sync_settings(&self) -> bool {
        let mut changed = false;
        while let Ok(enabled) = self.enabled_source.try_recv() {
            self.set_enabled(enabled);
            changed = true;
        }
        self.report_write_errors();
        changed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Toggle checking. Emits `EnabledChanged` on an actual change; the cache is kept.
    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::AcqRel) != enabled {
            tracing::debug!("Spell check {}", if enabled { "enabled" } else { "disabled" });
            self.emit(SpellEvent::EnabledChanged(enabled));
        }
    }

    pub fn current_language(&self) -> String {
        self.language.read().clone()
    }

    /// Switch language: clears the cache and rebuilds the backend.
    pub fn set_language(&self, language: &str) -> Result<()> {
        validate_language_tag(language)
            .map_err(|_| SpellCheckError::InvalidLanguage(language.to_string()))?;

        {
            let mut current = self.language.write();
            if *current == language {
                return Ok(());
            }
            *current = language.to_string();
        }

        let backend = create_backend(self.provider.as_ref(), language);
        *self.backend.write() = backend;
        // Also invalidates verdicts still being computed against the old backend
        self.cache.clear();

        tracing::info!("Spell check language changed to {}", language);
        self.emit(SpellEvent::LanguageChanged(language.to_string()));
        Ok(())
    }

    pub fn available_languages(&self) -> Vec<String> {
        self.provider.available_languages()
    }

    pub fn is_backend_available(&self) -> bool {
        self.backend.read().is_some()
    }

    pub fn is_word_correct(&self, word: &str) -> bool {
        if !self.is_enabled() || word.chars().count() < MIN_WORD_LENGTH {
            return true;
        }

        if let Some(verdict) = self.cache.get(word) {
            return verdict;
        }

        // Read before consulting dictionary and backend; a language switch or
        // dictionary addition after this point discards the verdict below
        let generation = self.cache.generation();

        if self.dictionary.lock().contains(word) {
            self.cache.insert_if_current(word, true, generation);
            return true;
        }

        let verdict = match self.backend.read().as_ref() {
            Some(backend) => backend.check_word(word),
            // Pass-through; not cached so a later backend takes effect immediately
            None => return true,
        };

        self.cache.insert_if_current(word, verdict, generation);
        verdict
    }

    /// Up to `MAX_SUGGESTIONS` corrections. Never touches the cache.
    pub fn suggestions(&self, word: &str) -> Vec<String> {
        if !self.is_enabled() {
            return Vec::new();
        }
        match self.backend.read().as_ref() {
            Some(backend) => {
                let mut suggestions = backend.suggest(word);
                suggestions.truncate(MAX_SUGGESTIONS);
                suggestions
            }
            None => Vec::new(),
        }
    }

    /// Add `word` to the personal dictionary and mark it correct.
    ///
    /// Returns false if the word was already known (any casing) or is not a
    /// storable word. Save failures are logged, not returned.
    pub fn add_to_personal_dictionary(&self, word: &str) -> bool {
        if let Err(e) = validate_dictionary_word(word) {
            tracing::debug!("Not adding '{}' to personal dictionary: {}", word, e);
            return false;
        }

        let result = self.dictionary.lock().insert(word);
        let added = match result {
            Ok(added) => added,
            Err(e) => {
                self.report_dictionary_error(&e);
                true
            }
        };

        self.report_write_errors();

        if added {
            tracing::info!("Added '{}' to personal dictionary", word);
            // Cached verdicts for other casings would otherwise shadow the entry
            self.cache.remove_case_insensitive(word);
            self.cache.insert(word, true);
        }
        added
    }

    pub fn personal_dictionary_words(&self) -> Vec<String> {
        self.dictionary.lock().words().to_vec()
    }

    /// Wait for background dictionary writes to land
    pub fn flush(&self) {
        self.dictionary.lock().flush();
        self.report_write_errors();
    }

    pub fn cached_verdicts(&self) -> usize {
        self.cache.len()
    }

    fn report_write_errors(&self) {
        let errors = self.dictionary.lock().take_write_errors();
        for error in errors {
            self.report_dictionary_error(&error);
        }
    }

    fn report_dictionary_error(&self, error: &SpellCheckError) {
        tracing::warn!("Personal dictionary I/O failed: {}", error);
        if !self.dictionary_error_reported.swap(true, Ordering::AcqRel) {
            self.emit(SpellEvent::DictionaryError(error.to_string()));
        }
    }

    fn emit(&self, event: SpellEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

fn create_backend(provider: &dyn BackendProvider, language: &str) -> Option<Box<dyn SpellBackend>> {
    match provider.create(language) {
        Ok(backend) => Some(backend),
        Err(e) => {
            tracing::warn!("Spell checker unavailable for {}: {}", language, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spellcheck::dictionary::PersistMode;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Backend stub that knows a fixed word set and counts calls
    struct StubBackend {
        known: HashSet<String>,
        suggestions: Vec<String>,
        checks: Arc<AtomicUsize>,
    }

    impl SpellBackend for StubBackend {
        fn check_word(&self, word: &str) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.known.contains(word)
        }

        fn suggest(&self, _word: &str) -> Vec<String> {
            self.suggestions.clone()
        }
    }

    struct StubProvider {
        checks: Arc<AtomicUsize>,
        /// Languages the provider can build; others fail
        languages: Vec<&'static str>,
    }

    impl BackendProvider for StubProvider {
        fn create(&self, language: &str) -> Result<Box<dyn SpellBackend>> {
            if !self.languages.iter().any(|l| *l == language) {
                return Err(SpellCheckError::DictionaryNotFound(language.to_string()));
            }
            Ok(Box::new(StubBackend {
                known: ["hello", "world", "chat"].iter().map(|s| s.to_string()).collect(),
                suggestions: ["world", "would", "wold", "word", "worlds", "wordl", "wild"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                checks: self.checks.clone(),
            }))
        }

        fn available_languages(&self) -> Vec<String> {
            self.languages.iter().map(|s| s.to_string()).collect()
        }
    }

    fn checker_with(dictionary: PersonalDictionary) -> (SpellChecker, Arc<AtomicUsize>) {
        let checks = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            checks: checks.clone(),
            languages: vec!["en-US", "en-GB"],
        };
        let checker = SpellChecker::new(
            Box::new(provider),
            dictionary,
            SpellCheckOptions::default(),
            crossbeam_channel::never(),
        );
        (checker, checks)
    }

    fn create_test_checker() -> (SpellChecker, Arc<AtomicUsize>) {
        checker_with(PersonalDictionary::in_memory())
    }

    #[test]
    fn test_short_words_always_correct() {
        let (checker, checks) = create_test_checker();
        assert!(checker.is_word_correct(""));
        assert!(checker.is_word_correct("x"));
        assert!(checker.is_word_correct("é"));
        assert_eq!(checks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_helo_scenario() {
        let (checker, _) = create_test_checker();
        assert!(!checker.is_word_correct("helo"));
        assert!(checker.is_word_correct("hello"));

        assert!(checker.add_to_personal_dictionary("helo"));
        assert!(checker.is_word_correct("helo"));
    }

    #[test]
    fn test_personal_dictionary_overrides_any_casing() {
        let (checker, _) = create_test_checker();
        checker.add_to_personal_dictionary("pepega");
        assert!(checker.is_word_correct("pepega"));
        assert!(checker.is_word_correct("Pepega"));
        assert!(checker.is_word_correct("PEPEGA"));
    }

    #[test]
    fn test_add_overrides_cached_verdict_of_other_casing() {
        let (checker, _) = create_test_checker();
        assert!(!checker.is_word_correct("HELO"));
        assert!(!checker.is_word_correct("Helo"));

        assert!(checker.add_to_personal_dictionary("helo"));
        assert!(checker.is_word_correct("helo"));
        assert!(checker.is_word_correct("HELO"));
        assert!(checker.is_word_correct("Helo"));
    }

    #[test]
    fn test_add_twice_stores_one_entry() {
        let (checker, _) = create_test_checker();
        assert!(checker.add_to_personal_dictionary("kappa"));
        assert!(!checker.add_to_personal_dictionary("kappa"));
        assert!(!checker.add_to_personal_dictionary("KAPPA"));
        assert_eq!(checker.personal_dictionary_words(), vec!["kappa"]);
    }

    #[test]
    fn test_add_rejects_blank_word() {
        let (checker, _) = create_test_checker();
        assert!(!checker.add_to_personal_dictionary("  "));
        assert!(checker.personal_dictionary_words().is_empty());
    }

    #[test]
    fn test_repeated_check_hits_cache() {
        let (checker, checks) = create_test_checker();
        let first = checker.is_word_correct("wrold");
        let second = checker.is_word_correct("wrold");
        assert_eq!(first, second);
        assert_eq!(checks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disable_overrides_cached_false() {
        let (checker, _) = create_test_checker();
        assert!(!checker.is_word_correct("helo"));

        checker.set_enabled(false);
        assert!(checker.is_word_correct("helo"));
        // Cache survives the toggle
        assert_eq!(checker.cached_verdicts(), 1);

        checker.set_enabled(true);
        assert!(!checker.is_word_correct("helo"));
    }

    #[test]
    fn test_suggestions_capped_at_five() {
        let (checker, checks) = create_test_checker();
        let suggestions = checker.suggestions("wrold");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "world");
        assert_eq!(checker.cached_verdicts(), 0);
        assert_eq!(checks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_suggestions_empty_when_disabled() {
        let (checker, _) = create_test_checker();
        checker.set_enabled(false);
        assert!(checker.suggestions("wrold").is_empty());
    }

    #[test]
    fn test_dictionary_file_loaded_at_startup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("personal_dictionary.txt");
        std::fs::write(&path, "chatterino\n").unwrap();

        let (checker, _) = checker_with(PersonalDictionary::new(path, PersistMode::Synchronous));
        checker.load_personal_dictionary();
        assert!(checker.is_word_correct("CHATTERINO"));
    }

    #[test]
    fn test_add_persists_to_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("personal_dictionary.txt");

        let (checker, _) =
            checker_with(PersonalDictionary::new(path.clone(), PersistMode::Synchronous));
        checker.add_to_personal_dictionary("chatterino");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "chatterino\n");
    }

    #[test]
    fn test_unavailable_backend_accepts_everything() {
        let checks = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            checks: checks.clone(),
            languages: vec![],
        };
        let checker = SpellChecker::new(
            Box::new(provider),
            PersonalDictionary::in_memory(),
            SpellCheckOptions::default(),
            crossbeam_channel::never(),
        );
        assert!(!checker.is_backend_available());
        assert!(checker.is_word_correct("helo"));
        assert!(checker.suggestions("helo").is_empty());
        assert_eq!(checker.cached_verdicts(), 0);
    }

    #[test]
    fn test_enabled_changed_emitted_on_change_only() {
        let (checker, _) = create_test_checker();
        let events = checker.subscribe();

        checker.set_enabled(true);
        assert!(events.try_recv().is_err());

        checker.set_enabled(false);
        assert_eq!(events.try_recv(), Ok(SpellEvent::EnabledChanged(false)));
    }

    #[test]
    fn test_sync_settings_applies_injected_source() {
        let (tx, rx) = unbounded();
        let checker = SpellChecker::new(
            Box::new(StubProvider {
                checks: Arc::new(AtomicUsize::new(0)),
                languages: vec!["en-US"],
            }),
            PersonalDictionary::in_memory(),
            SpellCheckOptions::default(),
            rx,
        );

        assert!(!checker.sync_settings());
        tx.send(false).unwrap();
        assert!(checker.sync_settings());
        assert!(!checker.is_enabled());
    }

    #[test]
    fn test_language_change_clears_cache_and_notifies() {
        let (checker, checks) = create_test_checker();
        let events = checker.subscribe();
        assert!(!checker.is_word_correct("helo"));
        assert_eq!(checker.cached_verdicts(), 1);

        checker.set_language("en-GB").unwrap();
        assert_eq!(checker.current_language(), "en-GB");
        assert_eq!(checker.cached_verdicts(), 0);
        assert_eq!(
            events.try_recv(),
            Ok(SpellEvent::LanguageChanged("en-GB".to_string()))
        );

        // Re-queried against the new backend
        assert!(!checker.is_word_correct("helo"));
        assert_eq!(checks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_same_language_is_noop() {
        let (checker, _) = create_test_checker();
        let events = checker.subscribe();
        checker.is_word_correct("helo");

        checker.set_language("en-US").unwrap();
        assert!(events.try_recv().is_err());
        assert_eq!(checker.cached_verdicts(), 1);
    }

    #[test]
    fn test_language_without_dictionary_degrades() {
        let (checker, _) = create_test_checker();
        checker.set_language("fr-FR").unwrap();
        assert!(!checker.is_backend_available());
        assert!(checker.is_word_correct("bonjur"));
    }

    #[test]
    fn test_invalid_language_rejected() {
        let (checker, _) = create_test_checker();
        assert!(matches!(
            checker.set_language("not a tag"),
            Err(SpellCheckError::InvalidLanguage(_))
        ));
        assert_eq!(checker.current_language(), "en-US");
    }

    #[test]
    fn test_dictionary_error_reported_once() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let (checker, _) = checker_with(PersonalDictionary::new(
            blocker.join("dict.txt"),
            PersistMode::Synchronous,
        ));
        let events = checker.subscribe();

        assert!(checker.add_to_personal_dictionary("helo"));
        assert!(checker.add_to_personal_dictionary("wrold"));
        assert!(checker.is_word_correct("helo"));

        assert!(matches!(events.try_recv(), Ok(SpellEvent::DictionaryError(_))));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_background_save_failure_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let (checker, _) = checker_with(PersonalDictionary::new(
            blocker.join("dict.txt"),
            PersistMode::Background,
        ));
        let events = checker.subscribe();

        assert!(checker.add_to_personal_dictionary("helo"));
        checker.flush();
        assert!(checker.add_to_personal_dictionary("wrold"));
        checker.flush();
        assert!(checker.is_word_correct("helo"));

        assert!(matches!(events.try_recv(), Ok(SpellEvent::DictionaryError(_))));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_language_switch_during_lookup_discards_old_verdict() {
        let (checker, _) = create_test_checker();
        // A lookup that started before the switch
        let generation = checker.cache.generation();
        let old_verdict = checker.backend.read().as_ref().map(|b| b.check_word("helo"));
        assert_eq!(old_verdict, Some(false));

        checker.set_language("en-GB").unwrap();
        assert!(!checker.cache.insert_if_current("helo", false, generation));
        assert_eq!(checker.cached_verdicts(), 0);
    }

    #[test]
    fn test_checker_is_shareable_across_threads() {
        let (checker, _) = create_test_checker();
        let checker = Arc::new(checker);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let checker = checker.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(checker.is_word_correct("hello"));
                        assert!(!checker.is_word_correct("helo"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
