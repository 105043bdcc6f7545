//! SLIRC spell checking library.
//!
//! Spell-check coordination for the chat client's message input: a cached,
//! personal-dictionary-aware `SpellChecker` and the `SpellHighlighter` that
//! underlines misspelled words in egui text edits.

pub mod app;
pub mod config;
pub mod error;
pub mod protocol;
pub mod spellcheck;
pub mod ui;
pub mod validation;
