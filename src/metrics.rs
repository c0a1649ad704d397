use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const ANALYSES: &str = "dream_analyses_total";
pub const REJECTED: &str = "dream_analyses_rejected_total";
pub const ORACLE_FAILURES: &str = "dream_oracle_failures_total";
pub const JOURNAL_ENTRIES: &str = "dream_journal_entries";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if a recorder is already set.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        describe_counter!(ANALYSES, "Dreams analysed and appended to the journal");
        describe_counter!(REJECTED, "Blank submissions rejected before analysis");
        describe_counter!(ORACLE_FAILURES, "Analyses aborted by a failing linguistic oracle");
        describe_gauge!(JOURNAL_ENTRIES, "Entries currently held in the session journal");

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
