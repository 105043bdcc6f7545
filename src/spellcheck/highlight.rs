//! Spell-check highlighting for the message input.
//!
//! Scans text for word tokens, asks the `SpellChecker` about each one and
//! turns misspelled ranges into underlined sections of an egui `LayoutJob`.
//! Enable/disable and language changes are debounced into a single full
//! rehighlight.

use crossbeam_channel::Receiver;
use eframe::egui::{text::LayoutJob, Color32, Stroke, TextFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::protocol::SpellEvent;
use crate::spellcheck::checker::SpellChecker;
use crate::spellcheck::debounce::Debouncer;

pub const REHIGHLIGHT_DELAY: Duration = Duration::from_millis(100);
/// Tokens shorter than this are never underlined
pub const MIN_HIGHLIGHT_LENGTH: usize = 3;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)*").expect("word regex pattern is valid"));

/// A word token found in scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// Byte range into the scanned text
    pub range: Range<usize>,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    pub range: Range<usize>,
    pub word: String,
}

/// Words worth checking: letters with inner apostrophes, at least three long,
/// standing alone (not glued to digits or `_`), and not an `@mention`.
pub fn scan_words(text: &str) -> Vec<WordToken<'_>> {
    WORD_RE
        .find_iter(text)
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(|c| is_word_char(c) || c == '@')
                && !after.is_some_and(is_word_char)
        })
        .filter(|m| m.as_str().chars().count() >= MIN_HIGHLIGHT_LENGTH)
        .map(|m| WordToken {
            range: m.range(),
            text: m.as_str(),
        })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub struct SpellHighlighter {
    checker: Arc<SpellChecker>,
    events: Receiver<SpellEvent>,
    debounce: Debouncer,
    /// Bumped on every full rehighlight
    generation: u64,
    /// Last scan: generation, text, result
    memo: Option<(u64, String, Vec<Misspelling>)>,
    notices: Vec<String>,
    underline: Color32,
}

impl SpellHighlighter {
    pub fn new(checker: Arc<SpellChecker>) -> Self {
        let events = checker.subscribe();
        Self {
            checker,
            events,
            debounce: Debouncer::new(REHIGHLIGHT_DELAY),
            generation: 0,
            memo: None,
            notices: Vec::new(),
            underline: Color32::from_rgb(230, 60, 60),
        }
    }

    pub fn with_underline_color(mut self, color: Color32) -> Self {
        self.underline = color;
        self
    }

    pub fn checker(&self) -> &Arc<SpellChecker> {
        &self.checker
    }

    /// Misspelled words in `text`. Empty while checking is disabled.
    pub fn highlight_block(&self, text: &str) -> Vec<Misspelling> {
        if !self.checker.is_enabled() {
            return Vec::new();
        }
        scan_words(text)
            .into_iter()
            .filter(|token| !self.checker.is_word_correct(token.text))
            .map(|token| Misspelling {
                range: token.range,
                word: token.text.to_string(),
            })
            .collect()
    }

    /// Misspellings for `text`, reusing the last scan when neither the text
    /// nor the generation changed.
    pub fn spans_for(&mut self, text: &str) -> &[Misspelling] {
        let fresh = matches!(&self.memo, Some((generation, memo_text, _))
            if *generation == self.generation && memo_text == text);
        if !fresh {
            let spans = self.highlight_block(text);
            self.memo = Some((self.generation, text.to_string(), spans));
        }
        self.memo.as_ref().map(|(_, _, spans)| spans.as_slice()).unwrap_or(&[])
    }

    /// The misspelled word covering `byte_offset`, if any
    pub fn misspelling_at(&mut self, text: &str, byte_offset: usize) -> Option<Misspelling> {
        self.spans_for(text)
            .iter()
            .find(|m| m.range.start <= byte_offset && byte_offset <= m.range.end)
            .cloned()
    }

    /// Process checker notifications and the debounce timer.
    ///
    /// Returns true when a full rehighlight is due; the next `spans_for`
    /// call then rescans from scratch.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.checker.sync_settings();
        while let Ok(event) = self.events.try_recv() {
            match event {
                SpellEvent::EnabledChanged(_) | SpellEvent::LanguageChanged(_) => {
                    self.debounce.trigger(now)
                }
                SpellEvent::DictionaryError(message) => self.notices.push(message),
            }
        }
        if self.debounce.poll(now) {
            self.rehighlight();
            return true;
        }
        false
    }

    /// Force a full rescan on the next layout
    pub fn rehighlight(&mut self) {
        self.generation += 1;
        tracing::debug!("Rehighlight #{}", self.generation);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How long until a pending rehighlight fires
    pub fn repaint_after(&self, now: Instant) -> Option<Duration> {
        self.debounce.remaining(now)
    }

    /// Drain messages meant for the user (dictionary failures)
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Lay out `text` with misspelled ranges underlined
    pub fn layout_job(&mut self, text: &str, base: TextFormat, wrap_width: f32) -> LayoutJob {
        let underline = Stroke::new(1.5, self.underline);
        let spans = self.spans_for(text).to_vec();

        let mut job = LayoutJob::default();
        let mut cursor = 0;
        for span in spans {
            if span.range.start > cursor {
                job.append(&text[cursor..span.range.start], 0.0, base.clone());
            }
            job.append(
                &text[span.range.clone()],
                0.0,
                TextFormat {
                    underline,
                    ..base.clone()
                },
            );
            cursor = span.range.end;
        }
        if cursor < text.len() {
            job.append(&text[cursor..], 0.0, base);
        }
        job.wrap.max_width = wrap_width;
        job
    }
}
