//! Input validation for language tags and personal dictionary words

/// Validates a BCP-47 style language tag such as `en-US`, `de` or `sr-Latn-RS`
pub fn validate_language_tag(tag: &str) -> Result<(), String> {
    if tag.is_empty() {
        return Err("Language tag cannot be empty".to_string());
    }

    let mut subtags = tag.split(['-', '_']);

    // Primary language subtag: 2 or 3 ASCII letters
    let primary = subtags.next().unwrap_or_default();
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("Invalid primary language subtag '{}'", primary));
    }

    for subtag in subtags {
        if subtag.is_empty() || subtag.len() > 8 {
            return Err(format!("Invalid subtag '{}' in language tag", subtag));
        }
        if !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("Invalid character in subtag '{}'", subtag));
        }
    }

    Ok(())
}

/// Validates a word before it is stored in the personal dictionary.
///
/// The dictionary file is line based, so line breaks are rejected outright.
pub fn validate_dictionary_word(word: &str) -> Result<(), String> {
    if word.trim().is_empty() {
        return Err("Word cannot be empty".to_string());
    }

    if word.chars().count() > 64 {
        return Err("Word too long (max 64 characters)".to_string());
    }

    if word.contains(|c: char| c.is_whitespace() || c.is_control()) {
        return Err("Word cannot contain whitespace or control characters".to_string());
    }

    Ok(())
}

/// Converts a language tag to the hunspell file stem (`en-US` -> `en_US`)
pub fn language_to_file_stem(tag: &str) -> String {
    tag.replace('-', "_")
}

/// Converts a hunspell file stem back to a language tag (`en_US` -> `en-US`)
pub fn file_stem_to_language(stem: &str) -> String {
    stem.replace('_', "-")
}
