//! Core SpellApp struct definition and initialization

use eframe::egui;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{
    load_settings, personal_dictionary_path, save_settings, ObservableSetting, Settings,
};
use crate::spellcheck::{
    BackendProvider, Misspelling, PersistMode, PersonalDictionary, PlatformProvider,
    SpellCheckOptions, SpellChecker, SpellHighlighter,
};
use crate::ui;

pub struct SpellApp {
    pub settings: Settings,

    /// Source of truth for the enable toggle; the checker holds a subscription
    pub enable_spell_check: ObservableSetting<bool>,

    pub checker: Arc<SpellChecker>,
    pub highlighter: SpellHighlighter,

    // Input state
    pub message_input: String,
    pub sent_messages: Vec<String>,

    /// Misspelled word under the last right click
    pub context_word: Option<Misspelling>,

    /// Language tags with an installed dictionary
    pub languages: Vec<String>,

    /// Status toast messages with creation time (auto-expire)
    pub status_messages: Vec<(String, Instant)>,
}

impl SpellApp {
    pub(super) fn get_theme(&self) -> ui::theme::SlircTheme {
        ui::theme::SlircTheme::from_name(&self.settings.theme)
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings().unwrap_or_default();
        match settings.theme.as_str() {
            "light" => cc.egui_ctx.set_visuals(egui::Visuals::light()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
        }
        ui::theme::apply_app_style(&cc.egui_ctx);

        let mode = if settings.background_persistence {
            PersistMode::Background
        } else {
            PersistMode::Synchronous
        };
        let dictionary = match personal_dictionary_path() {
            Ok(path) => PersonalDictionary::new(path, mode),
            Err(e) => {
                tracing::warn!("{}, personal dictionary will not be saved", e);
                PersonalDictionary::in_memory()
            }
        };

        Self::from_parts(settings, Box::new(PlatformProvider::for_host()), dictionary)
    }

    /// Wire up checker and highlighter without a GUI context
    pub fn from_parts(
        settings: Settings,
        provider: Box<dyn BackendProvider>,
        dictionary: PersonalDictionary,
    ) -> Self {
        let enable_spell_check = ObservableSetting::new(settings.enable_spell_check);
        let checker = Arc::new(SpellChecker::new(
            provider,
            dictionary,
            SpellCheckOptions::from(&settings),
            enable_spell_check.subscribe(),
        ));
        checker.load_personal_dictionary();

        let theme = ui::theme::SlircTheme::from_name(&settings.theme);
        let highlighter =
            SpellHighlighter::new(checker.clone()).with_underline_color(theme.misspelled);
        let languages = checker.available_languages();

        Self {
            settings,
            enable_spell_check,
            checker,
            highlighter,
            message_input: String::new(),
            sent_messages: Vec::new(),
            context_word: None,
            languages,
            status_messages: Vec::new(),
        }
    }

    /// Flip the enable setting; the checker picks it up on the next poll
    pub fn set_spell_check_enabled(&mut self, enabled: bool) {
        self.settings.enable_spell_check = enabled;
        self.enable_spell_check.set(enabled);
        self.save();
    }

    pub fn select_language(&mut self, language: &str) {
        match self.checker.set_language(language) {
            Ok(()) => {
                self.settings.spell_check_language = self.checker.current_language();
                if !self.checker.is_backend_available() {
                    self.push_status(format!("No dictionary installed for {}", language));
                }
                self.save();
            }
            Err(e) => self.push_status(e.to_string()),
        }
    }

    /// Replace the misspelled word with a suggestion if the text still holds it
    pub fn apply_suggestion(&mut self, misspelling: &Misspelling, replacement: &str) -> bool {
        if self.message_input.get(misspelling.range.clone()) != Some(misspelling.word.as_str()) {
            return false;
        }
        self.message_input.replace_range(misspelling.range.clone(), replacement);
        true
    }

    pub fn add_to_dictionary(&mut self, word: &str) {
        if self.checker.add_to_personal_dictionary(word) {
            // Verdict changed for text already on screen
            self.highlighter.rehighlight();
        }
    }

    /// Move the composed message into the sent list
    pub fn send_message(&mut self) -> bool {
        let text = self.message_input.trim();
        if text.is_empty() {
            return false;
        }
        self.sent_messages.push(text.to_string());
        self.message_input.clear();
        self.context_word = None;
        true
    }

    pub(super) fn push_status(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
    }

    fn save(&self) {
        if let Err(e) = save_settings(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}

impl Drop for SpellApp {
    fn drop(&mut self) {
        self.checker.flush();
    }
}
