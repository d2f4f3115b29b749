//! Quiz sessions as immutable values.
//!
//! A [`QuizSession`] holds the words being asked, the position and the
//! running score. Every transition returns a new session, so a caller can
//! keep, persist or drop any intermediate state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vd_db::models::WordRecord;

use crate::quiz::{Direction, LearnerInput, Modality, evaluate};
use crate::review::schedule_word;

/// How one question ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub word_id: String,
    pub outcome: QuestionOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
    /// Questions in the session, answered or not
    pub total: usize,
}

/// The result of answering the current question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsweredWord {
    pub correct: bool,
    /// The word after rescheduling, to be written back to the store
    pub word: WordRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    modality: Modality,
    direction: Direction,
    words: Vec<WordRecord>,
    index: usize,
    results: Vec<QuestionResult>,
}

impl QuizSession {
    /// Start a session over the words that can be asked in `modality`.
    /// Mastered words and words missing the needed field are left out.
    pub fn new(modality: Modality, direction: Direction, words: Vec<WordRecord>) -> Self {
        let words = words
            .into_iter()
            .filter(|word| word.is_active() && modality.is_eligible(word))
            .collect();

        Self {
            modality,
            direction,
            words,
            index: 0,
            results: Vec::new(),
        }
    }

    pub const fn modality(&self) -> Modality {
        self.modality
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Words in the session, with review state as of their last answer.
    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// The word being asked, `None` once the session is over.
    pub fn current(&self) -> Option<&WordRecord> {
        self.words.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.words.len()
    }

    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.index)
    }

    pub fn score(&self) -> Score {
        let count = |outcome: QuestionOutcome| {
            self.results
                .iter()
                .filter(|r| r.outcome == outcome)
                .count()
        };
        Score {
            correct: count(QuestionOutcome::Correct),
            incorrect: count(QuestionOutcome::Incorrect),
            skipped: count(QuestionOutcome::Skipped),
            total: self.words.len(),
        }
    }

    /// Grade `input` against the current word and move on.
    ///
    /// Returns `None` when the session is already finished.
    pub fn answer(
        &self,
        input: &LearnerInput,
        now: DateTime<Utc>,
    ) -> Option<(Self, AnsweredWord)> {
        let word = self.current()?;
        let correct = evaluate(word, self.modality, self.direction, input);
        let updated = schedule_word(word, correct, now);

        let mut next = self.clone();
        next.words[self.index] = updated.clone();
        next.results.push(QuestionResult {
            word_id: updated.id.clone(),
            outcome: if correct {
                QuestionOutcome::Correct
            } else {
                QuestionOutcome::Incorrect
            },
        });
        next.index += 1;

        Some((
            next,
            AnsweredWord {
                correct,
                word: updated,
            },
        ))
    }

    /// Move past the current word without grading it.
    pub fn skip(&self) -> Self {
        let mut next = self.clone();
        if let Some(word) = self.current() {
            next.results.push(QuestionResult {
                word_id: word.id.clone(),
                outcome: QuestionOutcome::Skipped,
            });
            next.index += 1;
        }
        next
    }
}
