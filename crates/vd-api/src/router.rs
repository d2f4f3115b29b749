use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{book, state::ApiState, word};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(book::routes())
        .merge(word::routes())
        .fallback(handler_404)
}

async fn health() -> &'static str {
    "OK"
}

async fn handler_404() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
        .into_response()
}
