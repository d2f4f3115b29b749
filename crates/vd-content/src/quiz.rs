//! Answer checking for the seven quiz modalities.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use vd_db::models::WordRecord;

use crate::answers::matches_any;
use crate::normalization::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modality {
    /// Type the answer for the prompt
    Typing,
    /// Type the answer for a spoken prompt
    Listening,
    /// Pick the answer among four choices
    MultipleChoice,
    /// Pick or type a synonym of the English word
    Synonym,
    /// Pick or type an antonym of the English word
    Antonym,
    /// Find the English word for a definition
    Definition,
    /// Assemble the English word from letter tiles
    Spelling,
}

impl Modality {
    pub const ALL: [Self; 7] = [
        Self::Typing,
        Self::Listening,
        Self::MultipleChoice,
        Self::Synonym,
        Self::Antonym,
        Self::Definition,
        Self::Spelling,
    ];

    /// Whether [`Direction`] changes what is asked.
    pub const fn uses_direction(self) -> bool {
        matches!(self, Self::Typing | Self::Listening | Self::MultipleChoice)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::Listening => "listening",
            Self::MultipleChoice => "multipleChoice",
            Self::Synonym => "synonym",
            Self::Antonym => "antonym",
            Self::Definition => "definition",
            Self::Spelling => "spelling",
        }
    }

    /// Whether `word` has what this modality asks about.
    pub fn is_eligible(self, word: &WordRecord) -> bool {
        match self {
            Self::Synonym => !word.synonyms.is_empty(),
            Self::Antonym => !word.antonyms.is_empty(),
            Self::Definition => word.definition.is_some(),
            Self::Typing | Self::Listening | Self::MultipleChoice | Self::Spelling => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Prompt in English, answer in Korean
    #[default]
    #[serde(rename = "enToKo")]
    EnglishToKorean,
    /// Prompt in Korean, answer in English
    #[serde(rename = "koToEn")]
    KoreanToEnglish,
}

impl Direction {
    pub fn prompt(self, word: &WordRecord) -> &str {
        match self {
            Self::EnglishToKorean => &word.english,
            Self::KoreanToEnglish => &word.korean,
        }
    }

    pub fn answer(self, word: &WordRecord) -> &str {
        match self {
            Self::EnglishToKorean => &word.korean,
            Self::KoreanToEnglish => &word.english,
        }
    }

    /// Whether answers are compared with the Hangul rule.
    pub const fn answer_is_hangul(self) -> bool {
        matches!(self, Self::EnglishToKorean)
    }
}

/// What the learner submitted: typed text, or the letter tiles picked in
/// order for spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LearnerInput {
    Text(String),
    Letters(Vec<String>),
}

impl LearnerInput {
    /// The input as one string; letters are concatenated in order.
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Letters(letters) => Cow::Owned(letters.concat()),
        }
    }
}

impl From<&str> for LearnerInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// What the learner is shown for `word`. `None` when the word lacks the
/// field the modality prompts with.
pub fn prompt(word: &WordRecord, modality: Modality, direction: Direction) -> Option<&str> {
    match modality {
        Modality::Typing | Modality::Listening | Modality::MultipleChoice => {
            Some(direction.prompt(word))
        }
        Modality::Synonym | Modality::Antonym => Some(&word.english),
        Modality::Definition => word.definition.as_deref(),
        Modality::Spelling => Some(&word.korean),
    }
}

/// Decide whether `input` is a correct answer for `word`.
///
/// A word missing the field a modality needs (no synonyms, no definition) is
/// never answered correctly. Blank input is never correct.
pub fn evaluate(
    word: &WordRecord,
    modality: Modality,
    direction: Direction,
    input: &LearnerInput,
) -> bool {
    let input = input.joined();

    match modality {
        Modality::Typing | Modality::Listening => {
            matches_any(&input, direction.answer(word), direction.answer_is_hangul())
        }
        Modality::MultipleChoice => {
            let hangul = direction.answer_is_hangul();
            let expected = normalize(direction.answer(word), hangul);
            !expected.is_empty() && normalize(&input, hangul) == expected
        }
        Modality::Synonym => matches_entry(&input, &word.synonyms),
        Modality::Antonym => matches_entry(&input, &word.antonyms),
        Modality::Definition => {
            word.definition.is_some() && matches_english(&input, &word.english)
        }
        Modality::Spelling => matches_english(&input, &word.english),
    }
}

fn matches_english(input: &str, english: &str) -> bool {
    let expected = normalize(english, false);
    !expected.is_empty() && normalize(input, false) == expected
}

fn matches_entry(input: &str, entries: &[String]) -> bool {
    let input = normalize(input, false);
    !input.is_empty() && entries.iter().any(|entry| normalize(entry, false) == input)
}

/// Active words that can be asked in `modality`.
pub fn eligible_words(modality: Modality, words: &[WordRecord]) -> Vec<&WordRecord> {
    words
        .iter()
        .filter(|word| word.is_active() && modality.is_eligible(word))
        .collect()
}

/// Active words due at `now`, soonest first.
pub fn due_words(words: &[WordRecord], now: DateTime<Utc>) -> Vec<&WordRecord> {
    let mut due: Vec<&WordRecord> = words
        .iter()
        .filter(|word| word.is_active() && word.review.is_due(now))
        .collect();
    due.sort_by_key(|word| word.review.next_review_date);
    due
}

/// Shuffled letter tiles for the spelling modality: every non-whitespace
/// character of the English word.
pub fn spelling_tiles<R: Rng + ?Sized>(word: &WordRecord, rng: &mut R) -> Vec<String> {
    let mut tiles: Vec<String> = word
        .english
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
        .collect();
    tiles.shuffle(rng);
    tiles
}
