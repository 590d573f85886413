use tracing::debug;

use super::FieldChain;
use crate::config::Endpoints;
use crate::data::extract::{display_value, truncate_line, DEFAULT_LINE_WIDTH};
use crate::data::PresentationState;
use crate::source::Fetcher;

/// Equivalent names for the build identity field, in priority order.
pub const VERSION_FIELDS: FieldChain = FieldChain::new(&["version", "app", "tag"]);

const UNKNOWN: &str = "unknown";

/// Probe the version endpoint.
///
/// An answering endpoint is healthy even when its content is unhelpful.
pub async fn probe_version(fetcher: &dyn Fetcher, endpoints: &Endpoints) -> PresentationState {
    let outcome = fetcher.probe(&endpoints.version).await;
    if !outcome.succeeded {
        debug!(path = %endpoints.version, "version probe failed");
        return PresentationState::warn(UNKNOWN);
    }

    let label = outcome
        .parsed_body
        .as_ref()
        .and_then(|body| VERSION_FIELDS.first(body))
        .map(|value| truncate_line(Some(&display_value(value)), DEFAULT_LINE_WIDTH))
        .filter(|label| !label.is_empty())
        .or_else(|| {
            let line = truncate_line(Some(outcome.raw_text.as_str()), DEFAULT_LINE_WIDTH);
            (!line.is_empty()).then_some(line)
        })
        .unwrap_or_else(|| UNKNOWN.to_string());

    PresentationState::ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HealthStatus;
    use crate::source::ScriptedFetcher;
    use serde_json::json;

    async fn version_for(fetcher: ScriptedFetcher) -> PresentationState {
        probe_version(&fetcher, &Endpoints::default()).await
    }

    #[tokio::test]
    async fn test_version_field() {
        let state = version_for(ScriptedFetcher::new().with_json(
            "/version",
            json!({"version": "0.1.0-alpha", "timestamp": "2024-05-01T10:00:00"}),
        ))
        .await;
        assert_eq!(state, PresentationState::ok("0.1.0-alpha"));
    }

    #[tokio::test]
    async fn test_field_priority_and_variants() {
        let state =
            version_for(ScriptedFetcher::new().with_json("/version", json!({"tag": "v9", "app": "hguard"})))
                .await;
        assert_eq!(state.label, "hguard");

        let state = version_for(ScriptedFetcher::new().with_json("/version", json!({"version": 3}))).await;
        assert_eq!(state.label, "3");
    }

    #[tokio::test]
    async fn test_plain_text_body() {
        let state = version_for(ScriptedFetcher::new().with_text("/version", "build-7f3a")).await;
        assert_eq!(state, PresentationState::ok("build-7f3a"));
    }

    #[tokio::test]
    async fn test_json_without_known_fields_uses_raw_text() {
        let state = version_for(ScriptedFetcher::new().with_json("/version", json!({"sha": "7f3a"}))).await;
        assert_eq!(state.status, HealthStatus::Healthy);
        assert_eq!(state.label, r#"{"sha":"7f3a"}"#);
    }

    #[tokio::test]
    async fn test_long_text_is_truncated() {
        let state = version_for(
            ScriptedFetcher::new().with_text("/version", "release   candidate\nfor the spring 2025 rollout"),
        )
        .await;
        assert_eq!(state.label, "release candidate for th");
    }

    #[tokio::test]
    async fn test_long_version_field_is_truncated() {
        let state = version_for(ScriptedFetcher::new().with_json(
            "/version",
            json!({"version": "2025.05.01-rc.3+build.7f3a9c2d1e"}),
        ))
        .await;
        assert_eq!(state, PresentationState::ok("2025.05.01-rc.3+build.7f"));
    }

    #[tokio::test]
    async fn test_empty_body_is_unknown_but_ok() {
        let state = version_for(ScriptedFetcher::new().with_text("/version", "   \n")).await;
        assert_eq!(state, PresentationState::ok("unknown"));
    }

    #[tokio::test]
    async fn test_failure_is_warning() {
        let state = version_for(ScriptedFetcher::new().with_failure("/version")).await;
        assert_eq!(state, PresentationState::warn("unknown"));
    }
}
