//! Multiple-choice option generation.
//!
//! Options are the correct value plus up to three distractors from other
//! words, shuffled. Values are compared in normalized form so `"Big"` and
//! `"big"` never show up side by side.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use vd_db::models::WordRecord;

use crate::normalization::{contains_hangul, normalize};
use crate::quiz::{Direction, Modality};

/// Number of distractors shown next to the correct value.
pub const DISTRACTORS: usize = 3;

/// Which list of a word a related-word question draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Synonym,
    Antonym,
}

impl Relation {
    pub fn of(self, word: &WordRecord) -> &[String] {
        match self {
            Self::Synonym => &word.synonyms,
            Self::Antonym => &word.antonyms,
        }
    }
}

pub fn korean_of(word: &WordRecord) -> Option<&str> {
    Some(&word.korean)
}

pub fn english_of(word: &WordRecord) -> Option<&str> {
    Some(&word.english)
}

fn choice_key(value: &str) -> String {
    let key = normalize(value, contains_hangul(value));
    if key.is_empty() { value.trim().to_string() } else { key }
}

/// Options for a single-valued field.
///
/// `extract` yields the compared value of a word (its Korean gloss, its
/// English form, ...). Distractors come from `pool` minus `correct` (by id)
/// and minus values equal to the correct one. Returns an empty list when
/// `correct` has no value.
pub fn generate_choices<R, F>(
    correct: &WordRecord,
    pool: &[WordRecord],
    extract: F,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
    F: Fn(&WordRecord) -> Option<&str>,
{
    let Some(answer) = extract(correct).map(str::trim).filter(|v| !v.is_empty()) else {
        return Vec::new();
    };

    let mut seen = HashSet::from([choice_key(answer)]);
    let candidates: Vec<&str> = pool
        .iter()
        .filter(|word| word.id != correct.id)
        .filter_map(|word| extract(word))
        .map(str::trim)
        .filter(|value| !value.is_empty() && seen.insert(choice_key(value)))
        .collect();

    finish(answer, &candidates, rng)
}

/// Options for a synonym or antonym question.
///
/// The correct option is one of `correct`'s own entries, picked at random.
/// Distractors are entries of other words that match none of `correct`'s
/// entries: the entries not picked are left out too, since each of them
/// would also be a right answer. Fewer than three distractors means a
/// shorter list, never repeats. Returns an empty list when `correct` has no
/// entries.
pub fn generate_related_choices<R>(
    correct: &WordRecord,
    pool: &[WordRecord],
    relation: Relation,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let own = relation.of(correct);
    let own: Vec<&str> = own.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
    let Some(answer) = own.choose(rng).copied() else {
        return Vec::new();
    };

    let mut seen: HashSet<String> = own.iter().map(|v| choice_key(v)).collect();
    let candidates: Vec<&str> = pool
        .iter()
        .filter(|word| word.id != correct.id)
        .flat_map(|word| relation.of(word))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty() && seen.insert(choice_key(value)))
        .collect();

    finish(answer, &candidates, rng)
}

/// Options for `word` in `modality`. Empty for modalities without choices
/// and for words that cannot be asked in `modality`.
pub fn choices_for<R>(
    modality: Modality,
    direction: Direction,
    word: &WordRecord,
    pool: &[WordRecord],
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    match modality {
        Modality::MultipleChoice => match direction {
            Direction::EnglishToKorean => generate_choices(word, pool, korean_of, rng),
            Direction::KoreanToEnglish => generate_choices(word, pool, english_of, rng),
        },
        Modality::Definition if word.definition.is_some() => {
            generate_choices(word, pool, english_of, rng)
        }
        Modality::Synonym => generate_related_choices(word, pool, Relation::Synonym, rng),
        Modality::Antonym => generate_related_choices(word, pool, Relation::Antonym, rng),
        Modality::Definition | Modality::Typing | Modality::Listening | Modality::Spelling => {
            Vec::new()
        }
    }
}

fn finish<R: Rng + ?Sized>(answer: &str, candidates: &[&str], rng: &mut R) -> Vec<String> {
    let mut choices: Vec<String> = candidates
        .choose_multiple(rng, DISTRACTORS)
        .map(|value| value.to_string())
        .collect();
    choices.push(answer.to_string());
    choices.shuffle(rng);
    choices
}
