//! Bundled word-list engine over hunspell `.dic` files.
//!
//! Affix rules are not expanded: only the stems listed in the `.dic` file are
//! known, plus their capitalised forms and possessive `'s`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Result, SpellCheckError};
use crate::spellcheck::backend::SpellBackend;

/// Candidates further than this many edits away are never suggested
const MAX_EDIT_DISTANCE: usize = 2;
const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Default)]
pub struct WordListBackend {
    words: HashSet<String>,
}

impl WordListBackend {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a hunspell dictionary: optional word count on the first line,
    /// then one `word[/FLAGS]` entry per line.
    pub fn from_dic_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let backend = Self::from_words(parse_dic(&content));
        if backend.words.is_empty() {
            return Err(SpellCheckError::EmptyDictionary(path.to_path_buf()));
        }
        Ok(backend)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn knows(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        // "Hello" and "HELLO" are fine when "hello" is listed, not the reverse
        let lower = word.to_lowercase();
        let capitalised = is_capitalised(word) || is_all_caps(word);
        capitalised && self.words.contains(&lower)
    }
}

impl SpellBackend for WordListBackend {
    fn check_word(&self, word: &str) -> bool {
        if self.knows(word) {
            return true;
        }
        match word.strip_suffix("'s").or_else(|| word.strip_suffix("'S")) {
            Some(stem) if !stem.is_empty() => self.knows(stem),
            _ => false,
        }
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();
        let len = lower.chars().count();

        let mut scored: Vec<(usize, String)> = self
            .words
            .iter()
            .filter(|candidate| candidate.chars().count().abs_diff(len) <= MAX_EDIT_DISTANCE)
            .filter_map(|candidate| {
                let distance = strsim::damerau_levenshtein(&lower, &candidate.to_lowercase());
                (distance > 0 && distance <= MAX_EDIT_DISTANCE)
                    .then(|| (distance, candidate.clone()))
            })
            .collect();

        scored.sort_by(|(da, a), (db, b)| {
            da.cmp(db).then_with(|| {
                let ja = strsim::jaro_winkler(&lower, a);
                let jb = strsim::jaro_winkler(&lower, b);
                jb.total_cmp(&ja).then_with(|| a.cmp(b))
            })
        });

        let mut suggestions: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            let styled = match_case(word, &candidate);
            if !suggestions.contains(&styled) {
                suggestions.push(styled);
            }
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
        }
        suggestions
    }
}

fn parse_dic(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .enumerate()
        .filter(|(i, line)| !(*i == 0 && line.trim().chars().all(|c| c.is_ascii_digit())))
        .map(|(_, line)| line.split('/').next().unwrap_or_default().trim())
        .filter(|word| !word.is_empty() && !word.starts_with('#'))
        .map(str::to_string)
}

fn is_capitalised(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.all(|c| !c.is_uppercase())
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && word.chars().all(|c| !c.is_lowercase())
}

/// Carry the capitalisation of `original` over to `candidate`
fn match_case(original: &str, candidate: &str) -> String {
    if original.chars().count() > 1 && is_all_caps(original) {
        return candidate.to_uppercase();
    }
    if is_capitalised(original) {
        let mut chars = candidate.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect();
        }
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend() -> WordListBackend {
        WordListBackend::from_words(["hello", "world", "help", "held", "chat", "Twitch"])
    }

    #[test]
    fn test_parse_dic_skips_count_and_flags() {
        let words: Vec<String> = parse_dic("3\nhello/MS\nworld\n\nchat/S\n").collect();
        assert_eq!(words, vec!["hello", "world", "chat"]);
    }

    #[test]
    fn test_check_word_case_rules() {
        let b = backend();
        assert!(b.check_word("hello"));
        assert!(b.check_word("Hello"));
        assert!(b.check_word("HELLO"));
        assert!(!b.check_word("hELLo"));
        // Proper nouns must keep their capital
        assert!(b.check_word("Twitch"));
        assert!(!b.check_word("twitch"));
    }

    #[test]
    fn test_check_word_possessive() {
        let b = backend();
        assert!(b.check_word("world's"));
        assert!(b.check_word("Twitch's"));
        assert!(!b.check_word("wrold's"));
        assert!(!b.check_word("'s"));
    }

    #[test]
    fn test_suggest_ranks_by_distance() {
        let b = backend();
        let suggestions = b.suggest("helo");
        assert_eq!(suggestions.first().map(String::as_str), Some("hello"));
        assert!(suggestions.contains(&"help".to_string()));
        assert!(!suggestions.contains(&"world".to_string()));
    }

    #[test]
    fn test_suggest_preserves_capitalisation() {
        let b = backend();
        assert_eq!(b.suggest("Wrold").first().map(String::as_str), Some("World"));
        assert_eq!(b.suggest("WROLD").first().map(String::as_str), Some("WORLD"));
    }

    #[test]
    fn test_from_dic_file_empty_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xx_XX.dic");
        fs::write(&path, "0\n").unwrap();
        assert!(matches!(
            WordListBackend::from_dic_file(&path),
            Err(SpellCheckError::EmptyDictionary(_))
        ));
    }
}
