/// Notifications sent from the spell checker to its subscribers (highlighters, UI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellEvent {
    /// Spell checking was switched on or off
    EnabledChanged(bool),
    /// The active language changed and the result cache was cleared
    LanguageChanged(String),
    /// Reading or writing the personal dictionary failed (sent once per session)
    DictionaryError(String),
}
