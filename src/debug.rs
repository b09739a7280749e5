// src/debug.rs
//! In-memory diagnostics for the HTTP service: last decisions (anonymized) and counters.
//! Volatile by nature; nothing here feeds back into moderation.

use axum::{extract::Query, routing::get, Json, Router};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Instant;

use crate::batch::OutputRecord;
use crate::decision::{ModerationInput, ModerationResult};
use crate::engine::anon_hash;

const HISTORY_CAP: usize = 500;

#[derive(Clone, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub at_ms: u128,
    /// Hash of the comment; raw text is never kept.
    pub id: String,
    pub decision: String,
    pub confidence: String,
    pub reasons: String,
}

#[derive(Default, Clone, Serialize)]
pub struct Stats {
    pub total_requests: u64,
    pub single_requests: u64,
    pub batch_requests: u64,
    pub rows_evaluated: u64,
    pub by_label: BTreeMap<String, u64>,
}

static HISTORY: Lazy<Mutex<VecDeque<DecisionEntry>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(HISTORY_CAP)));
static STATS: Lazy<Mutex<Stats>> = Lazy::new(|| Mutex::new(Stats::default()));

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub fn router() -> Router {
    Router::new()
        .route("/debug/history", get(history))
        .route("/debug/stats", get(stats))
}

pub fn record_request(is_batch: bool, rows: usize) {
    let mut s = STATS.lock().unwrap_or_else(|e| e.into_inner());
    s.total_requests += 1;
    if is_batch {
        s.batch_requests += 1;
    } else {
        s.single_requests += 1;
    }
    s.rows_evaluated += rows as u64;
}

pub fn record_decision(input: &ModerationInput, result: &ModerationResult) {
    push_entry(
        &input.comment,
        result.decision.as_str(),
        result.confidence.as_str(),
        result.joined_reasons(),
    );
}

pub fn record_output(out: &OutputRecord) {
    push_entry(
        &out.input.comment,
        &out.predicted_decision,
        &out.confidence,
        out.reason_codes.clone(),
    );
}

fn push_entry(comment: &str, decision: &str, confidence: &str, reasons: String) {
    {
        let mut s = STATS.lock().unwrap_or_else(|e| e.into_inner());
        *s.by_label.entry(decision.to_string()).or_insert(0) += 1;
    }
    let mut h = HISTORY.lock().unwrap_or_else(|e| e.into_inner());
    if h.len() >= HISTORY_CAP {
        h.pop_front();
    }
    h.push_back(DecisionEntry {
        at_ms: now_ms(),
        id: anon_hash(comment),
        decision: decision.to_string(),
        confidence: confidence.to_string(),
        reasons,
    });
}

async fn history(Query(q): Query<HistoryQuery>) -> Json<Vec<DecisionEntry>> {
    let limit = q.limit.unwrap_or(50);
    let h = HISTORY.lock().unwrap_or_else(|e| e.into_inner());
    let start = h.len().saturating_sub(limit);
    Json(h.iter().skip(start).cloned().collect())
}

async fn stats() -> Json<Stats> {
    Json(STATS.lock().unwrap_or_else(|e| e.into_inner()).clone())
}

fn now_ms() -> u128 {
    static START: Lazy<Instant> = Lazy::new(Instant::now);
    START.elapsed().as_millis()
}
