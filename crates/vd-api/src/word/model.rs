use serde::{Deserialize, Serialize};
use vd_content::{Direction, LearnerInput, Modality};
use vd_db::models::WordRecord;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub correct: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub modality: Modality,
    #[serde(default)]
    pub direction: Direction,
    pub input: LearnerInput,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub correct: bool,
    /// The word after rescheduling
    pub word: WordRecord,
}

#[derive(Debug, Deserialize)]
pub struct ChoicesQuery {
    pub modality: Modality,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct ChoicesResponse {
    pub prompt: Option<String>,
    /// Correct answer plus distractors, shuffled. Empty when the word
    /// cannot be asked this way.
    pub choices: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SpellingResponse {
    pub prompt: String,
    pub tiles: Vec<String>,
}
