use chrono::{DateTime, Utc};
use vd_db::models::WordRecord;

/// Grade one attempt and return the rescheduled word.
///
/// The input is not modified; callers replace the stored word with the
/// returned one. Use the same `now` for every word graded in one session.
pub fn schedule_word(word: &WordRecord, was_correct: bool, now: DateTime<Utc>) -> WordRecord {
    WordRecord {
        review: vd_srs::schedule(&word.review, was_correct, now),
        ..word.clone()
    }
}
