//! Vocabulary content pipeline.
//!
//! Turns raw word lists into [`vd_db::models::WordRecord`]s, checks learner
//! answers against them and produces multiple-choice options. Every function
//! here is synchronous and never fails on malformed input data.

pub mod answers;
pub mod choices;
pub mod ingest;
pub mod normalization;
pub mod quiz;
pub mod review;
pub mod session;
pub mod tags;

pub use answers::expand_answers;
pub use normalization::normalize;
pub use quiz::{Direction, LearnerInput, Modality, evaluate};
pub use review::schedule_word;
pub use session::QuizSession;
pub use tags::strip_tags;
