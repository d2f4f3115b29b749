//! Multi-answer expansion.
//!
//! An answer field such as `"사과, 애플"` or `"provide [제공하다] (동사)"` holds
//! several acceptable answers. [`expand_answers`] turns it into the set of
//! normalized forms a learner may type.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::normalization::normalize;

/// Separators between alternative answers, including the full-width comma.
const SEPARATORS: [char; 4] = [',', ';', '/', '，'];

/// A `[...]` or `(...)` group without nesting.
static GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]|\(([^()]*)\)").expect("group pattern is valid"));

/// Expand a raw answer field into every acceptable normalized answer.
///
/// Each separator-delimited segment contributes:
/// * the content of every bracket/parenthesis group, whole and word by word
/// * the segment with its groups removed, whole and word by word
///
/// Empty forms are dropped. Unmatched brackets are not groups; they are
/// stripped by normalization like any other punctuation.
pub fn expand_answers(raw: &str, is_hangul: bool) -> BTreeSet<String> {
    let mut answers = BTreeSet::new();

    for segment in raw.split(SEPARATORS) {
        for caps in GROUP.captures_iter(segment) {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            add_phrase(&mut answers, inner, is_hangul);
        }

        let outside = GROUP.replace_all(segment, " ");
        add_phrase(&mut answers, &outside, is_hangul);
    }

    answers
}

/// Whether `input` matches any answer listed in `raw`.
pub fn matches_any(input: &str, raw: &str, is_hangul: bool) -> bool {
    let input = normalize(input, is_hangul);
    !input.is_empty() && expand_answers(raw, is_hangul).contains(&input)
}

// Multi-word phrases are accepted whole and word by word
fn add_phrase(answers: &mut BTreeSet<String>, phrase: &str, is_hangul: bool) {
    add_candidate(answers, phrase, is_hangul);
    for word in phrase.split_whitespace() {
        add_candidate(answers, word, is_hangul);
    }
}

fn add_candidate(answers: &mut BTreeSet<String>, candidate: &str, is_hangul: bool) {
    let normalized = normalize(candidate, is_hangul);
    if !normalized.is_empty() {
        answers.insert(normalized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_comma_separated_synonyms() {
        assert_eq!(expand_answers("소방관, 소방원", true), set(&["소방관", "소방원"]));
    }

    #[test]
    fn test_all_separators() {
        assert_eq!(
            expand_answers("가; 나/다，라", true),
            set(&["가", "나", "다", "라"])
        );
    }

    #[test]
    fn test_bracket_content_is_an_answer() {
        let answers = expand_answers("provide [제공하다] (동사)", true);
        assert!(answers.contains("제공하다"));
        assert!(answers.contains("동사"));

        let answers = expand_answers("provide [제공하다] (동사)", false);
        assert!(answers.contains("provide"));
    }

    #[test]
    fn test_bracket_content_split_on_whitespace() {
        let answers = expand_answers("rescue (save from danger)", false);
        assert!(answers.contains("savefromdanger"));
        assert!(answers.contains("save"));
        assert!(answers.contains("danger"));
        assert!(answers.contains("rescue"));
    }

    #[test]
    fn test_phrase_is_accepted_whole_and_per_word() {
        let answers = expand_answers("rescued the family", false);
        assert!(answers.contains("rescuedthefamily"));
        assert!(answers.contains("rescued"));
        assert!(answers.contains("family"));
    }

    #[test]
    fn test_unmatched_brackets_do_not_fail() {
        let answers = expand_answers("사과 [애플, 능금)", true);
        assert!(answers.contains("사과"));
        assert!(answers.contains("애플"));
        assert!(answers.contains("능금"));
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert!(expand_answers("", true).is_empty());
        assert_eq!(expand_answers(",, 사과 ,", true), set(&["사과"]));
    }

    #[test]
    fn test_soundness_for_joined_words() {
        let words = ["apple", "Banana", "cherry-pie", "date"];
        let answers = expand_answers(&words.join(","), false);

        assert!(answers.len() >= words.len());
        for word in words {
            assert!(answers.contains(&normalize(word, false)), "missing {word}");
        }
    }

    #[test]
    fn test_matches_any() {
        assert!(matches_any("소방원", "소방관, 소방원", true));
        assert!(matches_any("소방관 ", "소방관, 소방원", true));
        assert!(!matches_any("소방서", "소방관, 소방원", true));
        assert!(!matches_any("", "소방관", true));
    }
}
