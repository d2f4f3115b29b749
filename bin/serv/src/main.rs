use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use vd_api::{config::ApiConfig, metrics, state::ApiState};
use vd_db::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    vd_api::tracing::init_tracing(&config.env);

    let metrics_handle = metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let state = ApiState::new(&config, Arc::new(MemoryStore::new()));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Metrics live on their own state
    let metrics_app = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = vd_api::router::router()
        .merge(metrics_app)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(trace_layer)
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(middleware::from_fn(
            vd_api::middleware::request_id::request_id_middleware,
        ));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(env = ?config.env, mastered_book = %config.mastered_book_id, "Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
