use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::batch::{InputRecord, Moderator, OutputRecord};
use crate::debug;
use crate::decision::{Confidence, Label};

/// Shared state for handlers: the moderator is already an `Arc` bundle, cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub moderator: Moderator,
}

impl AppState {
    pub fn new(moderator: Moderator) -> Self {
        Self { moderator }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/moderate", post(moderate_one))
        .route("/moderate/batch", post(moderate_batch))
        .with_state(state)
        .merge(debug::router())
        .layer(CorsLayer::very_permissive())
}

#[derive(serde::Serialize)]
struct ModerateResp {
    decision: Label,
    confidence: Confidence,
    reasons: Vec<String>,
}

async fn moderate_one(
    State(state): State<AppState>,
    Json(record): Json<InputRecord>,
) -> Json<ModerateResp> {
    let input = record.to_input();
    let result = state.moderator.evaluate(&input);

    debug::record_request(false, 1);
    debug::record_decision(&input, &result);

    Json(ModerateResp {
        decision: result.decision,
        confidence: result.confidence,
        reasons: result.reason_codes(),
    })
}

async fn moderate_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<InputRecord>>,
) -> Result<Json<Vec<OutputRecord>>, (StatusCode, String)> {
    let rows = records.len();
    let moderator = state.moderator.clone();

    // CPU-bound fan-out; keep it off the async workers.
    let out = tokio::task::spawn_blocking(move || moderator.evaluate_batch(records))
        .await
        .map_err(|e| {
            error!(target: "moderation", error = %e, "batch evaluation task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "batch evaluation failed".to_string(),
            )
        })?;

    debug::record_request(true, rows);
    for o in &out {
        debug::record_output(o);
    }
    info!(target: "moderation", rows, "batch moderated");
    Ok(Json(out))
}
