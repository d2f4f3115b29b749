use std::sync::LazyLock;

use regex::Regex;

/// `[동]`, `(명)`: a bracket or parenthesis wrapping Hangul only.
static POS_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\p{Hangul}+\]|\(\p{Hangul}+\)").expect("part-of-speech tag pattern is valid")
});

/// Remove part-of-speech annotations and trim.
///
/// Only groups made entirely of Hangul are removed; `"to give (something)"`
/// keeps its parenthetical because it is a gloss, not a tag.
pub fn strip_tags(text: &str) -> String {
    POS_TAG.replace_all(text, "").trim().to_string()
}
