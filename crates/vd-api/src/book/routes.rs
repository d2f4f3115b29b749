use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use validator::Validate;
use vd_content::{
    ingest::{self, ImportTarget},
    quiz,
};
use vd_db::{
    models::{Book, WordRecord},
    repositories::{books, words},
};

use crate::{ApiState, error::ApiError, metrics, validation};

use super::model::{ImportRequest, ImportResponse, ListWordsQuery};

/// Create the book routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/books/{book_id}", get(get_book))
        .route("/books/{book_id}/import", post(import_words))
        .route("/books/{book_id}/words", get(list_words))
}

async fn get_book(
    State(state): State<ApiState>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    validation::validate_book_id(&book_id)?;

    books::get_book(state.store.as_ref(), &book_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Book {book_id} not found")))
}

/// Ingest a spreadsheet into a book and store the accepted words
async fn import_words(
    State(state): State<ApiState>,
    Path(book_id): Path<String>,
    Json(mut payload): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportResponse>), ApiError> {
    validation::validate_book_id(&book_id)?;
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let grid = payload.take_grid()?;
    validation::validate_grid_size(&grid, state.max_import_rows)?;

    let _guard = state.import_lock.lock().await;

    let store = state.store.as_ref();
    let now = Utc::now();
    let existing = words::list_book_words(store, &book_id)?;

    let outcome = ingest::ingest(
        &grid,
        &ImportTarget {
            book_id: &book_id,
            book_name: &payload.book_name,
        },
        &existing,
        now,
    );

    books::import_into_book(store, &book_id, &payload.book_name, &outcome.words, now)?;

    metrics::record_import(&outcome.report);
    tracing::info!(
        book_id = %book_id,
        accepted = outcome.report.accepted,
        rejected = outcome.report.rejected.len(),
        "import stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            report: outcome.report,
            words: outcome.words,
        }),
    ))
}

async fn list_words(
    State(state): State<ApiState>,
    Path(book_id): Path<String>,
    Query(query): Query<ListWordsQuery>,
) -> Result<Json<Vec<WordRecord>>, ApiError> {
    validation::validate_book_id(&book_id)?;

    let mut book_words = words::list_book_words(state.store.as_ref(), &book_id)?;

    if let Some(day) = query.day {
        book_words.retain(|word| word.day == Some(day));
    }

    if query.due {
        book_words = quiz::due_words(&book_words, Utc::now())
            .into_iter()
            .cloned()
            .collect();
    }

    Ok(Json(book_words))
}
