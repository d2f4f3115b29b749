//! Answer normalization for vocabulary comparison.
//!
//! The same rules run when a word list is imported and when a learner's
//! answer is checked, so an answer accepted on import is accepted in a quiz.

use unicode_normalization::UnicodeNormalization;

/// Whether `c` is a precomposed Hangul syllable (`가`..=`힣`).
pub fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Whether `c` is any Hangul letter: a syllable or a conjoining/compatibility jamo.
pub fn is_hangul(c: char) -> bool {
    is_hangul_syllable(c)
        || ('\u{1100}'..='\u{11FF}').contains(&c)
        || ('\u{3130}'..='\u{318F}').contains(&c)
}

pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(is_hangul)
}

/// Whether the first non-blank character is an ASCII letter.
pub fn starts_with_latin(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

/// Normalize a string for answer comparison.
///
/// With `is_hangul` set, only Hangul syllables survive, concatenated without
/// separators: `"사과 "`, `"사과."` and `"사과"` all become `"사과"`. The input
/// is composed first so decomposed jamo sequences match precomposed text.
///
/// Otherwise the text is lowercased, ligatures are expanded, accents are
/// dropped and everything that is not a letter or digit (whitespace,
/// underscores, punctuation) is removed: `"Fire-fighter"` and
/// `"firefighter"` both become `"firefighter"`.
///
/// Total and idempotent for both scripts.
pub fn normalize(text: &str, is_hangul: bool) -> String {
    if is_hangul {
        normalize_hangul(text)
    } else {
        normalize_latin(text)
    }
}

fn normalize_hangul(text: &str) -> String {
    text.nfc().filter(|c| is_hangul_syllable(*c)).collect()
}

fn normalize_latin(text: &str) -> String {
    text.to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe")
        .nfd()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        // Recompose anything left decomposed (Hangul in a Latin field)
        .nfc()
        .collect()
}
