//! Log output for the server.
//!
//! Development prints readable multi-line events including the per-row
//! import decisions from `vd_content`; production emits one JSON object per
//! event and keeps the import summaries only.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Per-row import decisions and answer checks are logged at debug.
const DEVELOPMENT_FILTER: &str = "info,vd_content=debug,vd_api=debug,tower_http=debug";

/// Import summaries (`info`) and rejected-row warnings stay visible.
const PRODUCTION_FILTER: &str = "info,vd_content=info,tower_http=warn";

/// Filter used when `RUST_LOG` is unset.
pub const fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Development => DEVELOPMENT_FILTER,
        Environment::Production => PRODUCTION_FILTER,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides [`default_filter`].
pub fn init_tracing(env: &Environment) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    if env.is_development() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(env_filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(env_filter),
            )
            .init();
    }

    tracing::info!(filter = default_filter(env), "logging initialized");
}
