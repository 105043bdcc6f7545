//! Spell checking for the message input
//!
//! - `checker`: the `SpellChecker` coordinator (cache, personal dictionary, backend)
//! - `backend`: backend capability trait and platform dictionary lookup
//! - `wordlist`: bundled hunspell word-list engine
//! - `cache`: bounded verdict cache
//! - `dictionary` / `writer`: personal dictionary persistence
//! - `highlight` / `debounce`: underline rendering and rehighlight timing

pub mod backend;
pub mod cache;
pub mod checker;
pub mod debounce;
pub mod dictionary;
pub mod highlight;
pub mod wordlist;
pub mod writer;

pub use backend::{BackendProvider, PlatformProvider, SpellBackend};
pub use checker::{SpellCheckOptions, SpellChecker, MAX_SUGGESTIONS};
pub use dictionary::{PersistMode, PersonalDictionary};
pub use highlight::{scan_words, Misspelling, SpellHighlighter, WordToken};
