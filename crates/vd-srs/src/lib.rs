//! SRS (Spaced Repetition System) library for vocadrill
//!
//! This crate provides the review scheduling policy applied every time a
//! learner answers a word, independent of how words are stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Longest gap between two reviews of the same word, in days.
pub const MAX_INTERVAL_DAYS: i64 = 30;

/// Gap after a wrong answer, in days.
pub const RETRY_INTERVAL_DAYS: i64 = 1;

/// Review bookkeeping carried by every word.
///
/// Missing counters deserialize to zero so that freshly created documents
/// (or documents written before a field existed) can be scheduled as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewProgress {
    /// When the word becomes eligible for review again
    pub next_review_date: DateTime<Utc>,
    /// When the word was last graded, if ever
    #[serde(default)]
    pub last_review_date: Option<DateTime<Utc>>,
    /// Number of graded attempts, never decreases
    #[serde(default)]
    pub review_count: u32,
    /// Consecutive correct attempts, reset by a wrong answer
    #[serde(default)]
    pub correct_streak: u32,
}

impl ReviewProgress {
    /// Progress for a word that has never been reviewed: due immediately.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            next_review_date: now,
            last_review_date: None,
            review_count: 0,
            correct_streak: 0,
        }
    }

    /// Whether the word may be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

/// Get the interval in days for a given correct streak.
///
/// The interval doubles with every consecutive correct answer and is capped
/// at [`MAX_INTERVAL_DAYS`]:
///
/// * Streak 0: 1 day
/// * Streak 1: 2 days
/// * Streak 2: 4 days
/// * Streak 3: 8 days
/// * Streak 4: 16 days
/// * Streak ≥ 5: 30 days
pub fn interval_days_for_streak(correct_streak: u32) -> i64 {
    // 2^5 already exceeds the cap, which also keeps the shift in range
    if correct_streak >= 5 {
        return MAX_INTERVAL_DAYS;
    }
    (1_i64 << correct_streak).min(MAX_INTERVAL_DAYS)
}

/// Compute the progress after one graded attempt.
///
/// # Arguments
///
/// * `progress` - The word's progress before this attempt
/// * `was_correct` - Whether the learner answered correctly
/// * `now` - The grading instant; use one value per grading session
///
/// # Returns
///
/// A new `ReviewProgress`; the input is left untouched.
///
/// A correct answer extends the streak and schedules the next review
/// `2^streak` days out (capped). A wrong answer resets the streak and
/// schedules a retry the next day. Both count as a review.
pub fn schedule(progress: &ReviewProgress, was_correct: bool, now: DateTime<Utc>) -> ReviewProgress {
    let review_count = progress.review_count.saturating_add(1);

    let (correct_streak, interval_days) = if was_correct {
        // Clamped so that correct_streak <= review_count holds even for
        // inconsistent stored documents
        let streak = progress.correct_streak.saturating_add(1).min(review_count);
        (streak, interval_days_for_streak(streak))
    } else {
        (0, RETRY_INTERVAL_DAYS)
    };

    ReviewProgress {
        next_review_date: now + Duration::days(interval_days),
        last_review_date: Some(now),
        review_count,
        correct_streak,
    }
}
