use tracing::debug;

use crate::config::Endpoints;
use crate::data::extract::{extract_counter, group_thousands};
use crate::data::PresentationState;
use crate::source::Fetcher;

/// Probe the metrics endpoint and surface the request counter, if any.
pub async fn probe_metrics(fetcher: &dyn Fetcher, endpoints: &Endpoints) -> PresentationState {
    let outcome = fetcher.probe(&endpoints.metrics).await;
    if !outcome.succeeded {
        debug!(path = %endpoints.metrics, "metrics probe failed");
        return PresentationState::warn("Unavailable");
    }

    match extract_counter(&outcome.raw_text) {
        Some(total) => PresentationState::ok(format!("{} total", group_thousands(total))),
        None => PresentationState::ok("Available"),
    }
}
