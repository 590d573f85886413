use tracing::debug;

use super::FieldChain;
use crate::config::Endpoints;
use crate::data::extract::{format_uptime, uptime_seconds};
use crate::data::PresentationState;
use crate::source::{Fetcher, ProbeOutcome};

/// Equivalent names for the uptime field, in priority order.
pub const UPTIME_FIELDS: FieldChain = FieldChain::new(&["uptime_seconds", "uptime", "uptimeSec"]);

/// Probe the liveness endpoint, falling back once to the legacy path.
pub async fn probe_liveness(fetcher: &dyn Fetcher, endpoints: &Endpoints) -> PresentationState {
    let mut outcome = fetcher.probe(&endpoints.health).await;
    if !outcome.succeeded {
        debug!(
            primary = %endpoints.health,
            fallback = %endpoints.health_fallback,
            "liveness probe failed, trying fallback"
        );
        outcome = fetcher.probe(&endpoints.health_fallback).await;
    }

    if !outcome.succeeded {
        return PresentationState::err("Down");
    }
    healthy_state(&outcome)
}

fn healthy_state(outcome: &ProbeOutcome) -> PresentationState {
    let uptime = outcome
        .parsed_body
        .as_ref()
        .and_then(|body| UPTIME_FIELDS.first(body))
        .and_then(uptime_seconds)
        .map(format_uptime)
        .filter(|label| !label.is_empty());

    match uptime {
        Some(uptime) => PresentationState::ok(format!("OK • {}", uptime)),
        None => PresentationState::ok("OK"),
    }
}
