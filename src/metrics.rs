use anyhow::anyhow;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process), describe the moderation
    /// series on it and publish whether a dictionary backs the spelling check.
    pub fn init(dictionary_loaded: bool) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow!("prometheus: install recorder: {e}"))?;

        // Descriptions go to whichever recorder is installed, so this must follow install.
        describe_series();

        gauge!("moderation_dictionary_loaded").set(if dictionary_loaded { 1.0 } else { 0.0 });

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe_series() {
    describe_counter!(
        "moderation_decisions_total",
        "Decisions produced, by label."
    );
    describe_counter!(
        "moderation_reasons_total",
        "Reason codes emitted, by token family."
    );
    describe_counter!(
        "moderation_dictionary_errors_total",
        "Dictionary lookups that failed and fell back to heuristics."
    );
    describe_histogram!("moderation_eval_us", "Cascade evaluation time in microseconds.");
    describe_gauge!(
        "moderation_dictionary_loaded",
        "1 when a dictionary backs the spelling check, else 0."
    );
}
