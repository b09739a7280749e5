//! Recommendation Moderation Service: Binary Entrypoint
//! Boots the Axum HTTP server: policy + dictionary, moderation routes, diagnostics
//! and the Prometheus `/metrics` route.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wom_moderation::{api, metrics::Metrics, moderator_from_env, AppState};

/// Compact tracing logs; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("moderation=info,warn"));

    // Shuttle may have installed a subscriber already; keep theirs in that case.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    // An invalid policy file is fatal; a missing one falls back to built-in defaults.
    let moderator = moderator_from_env()?;

    let metrics = Metrics::init(moderator.has_dictionary())?;

    let router = api::router(AppState::new(moderator)).merge(metrics.router());

    Ok(router.into())
}
