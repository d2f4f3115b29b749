use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vd_srs::ReviewProgress;

/// Book model - a named collection of words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique book identifier
    pub id: String,
    /// Display name, taken from the import source
    pub name: String,
    /// When the book was created
    pub created_at: DateTime<Utc>,
    /// When the book was last updated
    pub updated_at: DateTime<Utc>,
}

/// Word model - a single vocabulary entry
///
/// Stored with camelCase keys; the review bookkeeping is flattened into the
/// same document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    /// Unique word identifier, stable for the record's lifetime
    pub id: String,
    /// Book the word currently lives in
    pub book_id: String,
    /// Book the word was created in, restored when un-mastered
    pub original_book_id: String,
    /// English form (prompt or answer depending on direction)
    pub english: String,
    /// Korean gloss, may list several comma-separated answers
    pub korean: String,
    /// Example sentence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Pronunciation hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// English definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Synonyms with part-of-speech tags already stripped
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Antonyms with part-of-speech tags already stripped
    #[serde(default)]
    pub antonyms: Vec<String>,
    /// Lesson/unit grouping, `None` means ungrouped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Mastered words are out of the review rotation
    #[serde(default)]
    pub mastered: bool,
    /// Learner tag for words to revisit
    #[serde(default)]
    pub wrong_note: bool,
    /// Free learner bookmark
    #[serde(default)]
    pub checked: bool,
    /// Review scheduling state
    #[serde(flatten)]
    pub review: ReviewProgress,
}

impl WordRecord {
    /// Create a new word in `book_id`, due for review at `now`.
    pub fn new(
        book_id: impl Into<String>,
        english: impl Into<String>,
        korean: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let book_id = book_id.into();
        Self {
            id: Uuid::new_v4().to_string(),
            original_book_id: book_id.clone(),
            book_id,
            english: english.into(),
            korean: korean.into(),
            example: None,
            pronunciation: None,
            definition: None,
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            day: None,
            mastered: false,
            wrong_note: false,
            checked: false,
            review: ReviewProgress::new(now),
        }
    }

    /// Whether the word takes part in review and quizzes.
    pub const fn is_active(&self) -> bool {
        !self.mastered
    }

    /// Return a copy with the given flag changes applied.
    ///
    /// Mastering moves the word into `mastered_book_id`; un-mastering moves it
    /// back to `original_book_id`.
    pub fn with_flags(&self, flags: &FlagUpdate, mastered_book_id: &str) -> Self {
        let mut word = self.clone();

        if let Some(mastered) = flags.mastered {
            word.mastered = mastered;
            word.book_id = if mastered {
                mastered_book_id.to_string()
            } else {
                word.original_book_id.clone()
            };
        }
        if let Some(wrong_note) = flags.wrong_note {
            word.wrong_note = wrong_note;
        }
        if let Some(checked) = flags.checked {
            word.checked = checked;
        }

        word
    }
}

/// Partial update of a word's learner flags; `None` leaves a flag unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagUpdate {
    #[serde(default)]
    pub mastered: Option<bool>,
    #[serde(default)]
    pub wrong_note: Option<bool>,
    #[serde(default)]
    pub checked: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_new_word_defaults() {
        let word = WordRecord::new("book-1", "apple", "사과", now());

        assert_eq!(word.book_id, "book-1");
        assert_eq!(word.original_book_id, "book-1");
        assert_eq!(word.review.next_review_date, now());
        assert_eq!(word.review.review_count, 0);
        assert!(word.is_active());
        assert!(!word.id.is_empty());
    }

    #[test]
    fn test_round_trip_uses_camel_case_and_utc() {
        let mut word = WordRecord::new("book-1", "apple", "사과", now());
        word.day = Some(3);
        word.synonyms = vec!["pome".to_string()];
        word.wrong_note = true;

        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["bookId"], "book-1");
        assert_eq!(value["originalBookId"], "book-1");
        assert_eq!(value["wrongNote"], true);
        assert_eq!(value["nextReviewDate"], "2024-05-02T12:30:00Z");
        assert_eq!(value["reviewCount"], 0);

        let back: WordRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, word);
    }

    #[test]
    fn test_sparse_document_deserializes() {
        let json = r#"{
            "id": "w1",
            "bookId": "b1",
            "originalBookId": "b1",
            "english": "book",
            "korean": "책",
            "nextReviewDate": "2024-05-02T12:30:00Z"
        }"#;

        let word: WordRecord = serde_json::from_str(json).unwrap();

        assert!(word.synonyms.is_empty());
        assert_eq!(word.day, None);
        assert!(!word.mastered);
        assert_eq!(word.review.correct_streak, 0);
    }

    #[test]
    fn test_mastering_moves_and_restores_book() {
        let word = WordRecord::new("book-1", "apple", "사과", now());

        let mastered = word.with_flags(
            &FlagUpdate {
                mastered: Some(true),
                ..FlagUpdate::default()
            },
            "mastered",
        );
        assert!(mastered.mastered);
        assert_eq!(mastered.book_id, "mastered");
        assert_eq!(mastered.original_book_id, "book-1");

        let restored = mastered.with_flags(
            &FlagUpdate {
                mastered: Some(false),
                ..FlagUpdate::default()
            },
            "mastered",
        );
        assert!(!restored.mastered);
        assert_eq!(restored.book_id, "book-1");
    }

    #[test]
    fn test_flags_are_independent() {
        let word = WordRecord::new("book-1", "apple", "사과", now());

        let tagged = word.with_flags(
            &FlagUpdate {
                wrong_note: Some(true),
                checked: Some(true),
                mastered: None,
            },
            "mastered",
        );

        assert!(tagged.wrong_note);
        assert!(tagged.checked);
        assert!(!tagged.mastered);
        assert_eq!(tagged.book_id, "book-1");
    }
}
