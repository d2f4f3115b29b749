use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use vd_content::{choices, quiz, review};
use vd_db::{
    models::{FlagUpdate, WordRecord},
    repositories::words,
};

use crate::{ApiState, error::ApiError, metrics};

use super::model::{
    AnswerRequest, AnswerResponse, ChoicesQuery, ChoicesResponse, ReviewRequest,
    SpellingResponse,
};

/// Create the word routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/words/{word_id}", get(get_word).delete(delete_word))
        .route("/words/{word_id}/review", post(review_word))
        .route("/words/{word_id}/answer", post(answer_word))
        .route("/words/{word_id}/choices", get(get_choices))
        .route("/words/{word_id}/spelling", get(get_spelling))
        .route("/words/{word_id}/flags", patch(update_flags))
}

fn find_word(state: &ApiState, word_id: &str) -> Result<WordRecord, ApiError> {
    words::get_word(state.store.as_ref(), word_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Word {word_id} not found")))
}

async fn get_word(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
) -> Result<Json<WordRecord>, ApiError> {
    find_word(&state, &word_id).map(Json)
}

async fn delete_word(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if words::delete_word(state.store.as_ref(), &word_id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Word {word_id} not found")))
    }
}

/// Record a self-graded review
async fn review_word(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<WordRecord>, ApiError> {
    let word = find_word(&state, &word_id)?;
    let updated = review::schedule_word(&word, payload.correct, Utc::now());
    words::save_word(state.store.as_ref(), &updated)?;

    metrics::record_review(payload.correct);

    Ok(Json(updated))
}

/// Check an answer, then reschedule the word with the result
async fn answer_word(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let word = find_word(&state, &word_id)?;

    if !payload.modality.is_eligible(&word) {
        return Err(ApiError::Validation(format!(
            "Word {word_id} cannot be asked as {}",
            payload.modality.as_str()
        )));
    }

    let correct = quiz::evaluate(&word, payload.modality, payload.direction, &payload.input);
    let updated = review::schedule_word(&word, correct, Utc::now());
    words::save_word(state.store.as_ref(), &updated)?;

    metrics::record_answer(payload.modality, correct);
    tracing::debug!(
        word_id = %word_id,
        modality = payload.modality.as_str(),
        correct,
        streak = updated.review.correct_streak,
        "answer evaluated"
    );

    Ok(Json(AnswerResponse {
        correct,
        word: updated,
    }))
}

async fn get_choices(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
    Query(query): Query<ChoicesQuery>,
) -> Result<Json<ChoicesResponse>, ApiError> {
    let word = find_word(&state, &word_id)?;
    let pool = words::list_book_words(state.store.as_ref(), &word.book_id)?;

    let mut rng = StdRng::from_entropy();
    let choices = choices::choices_for(query.modality, query.direction, &word, &pool, &mut rng);
    let prompt = quiz::prompt(&word, query.modality, query.direction).map(str::to_string);

    Ok(Json(ChoicesResponse { prompt, choices }))
}

async fn get_spelling(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
) -> Result<Json<SpellingResponse>, ApiError> {
    let word = find_word(&state, &word_id)?;

    let mut rng = StdRng::from_entropy();
    let tiles = quiz::spelling_tiles(&word, &mut rng);

    Ok(Json(SpellingResponse {
        prompt: word.korean,
        tiles,
    }))
}

/// Toggle mastered, wrong-note and checked flags
async fn update_flags(
    State(state): State<ApiState>,
    Path(word_id): Path<String>,
    Json(flags): Json<FlagUpdate>,
) -> Result<Json<WordRecord>, ApiError> {
    let updated = words::update_flags(
        state.store.as_ref(),
        &word_id,
        &flags,
        &state.mastered_book_id,
    )?;

    Ok(Json(updated))
}
