//! Application module structure for SpellApp
//!
//! - `core`: SpellApp struct, initialization and actions
//! - `update`: Main update loop, toolbar and sent-message list
//! - `input`: Message input panel with spell-check underlines and suggestions

pub mod core;
pub mod input;
pub mod update;

// Re-export SpellApp for public API
pub use core::SpellApp;
