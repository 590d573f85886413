//! In-memory fetcher with canned responses.
//!
//! Useful for driving probes and the refresh loop without a network,
//! including requests that never complete.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Fetcher, ProbeOutcome};

/// What a scripted path does when probed.
#[derive(Debug, Clone)]
pub enum Script {
    /// Resolve immediately with this outcome.
    Respond(ProbeOutcome),
    /// Never resolve.
    Hang,
}

/// A fetcher that answers from a table of scripted paths.
///
/// Paths with no script resolve as failed requests. Every probe is
/// recorded, in order, before the script runs.
///
/// # Example
///
/// ```
/// use hguard_watch::{Fetcher, ScriptedFetcher};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let fetcher = ScriptedFetcher::new()
///     .with_failure("/health")
///     .with_json("/healthz", json!({ "uptime_seconds": 5400 }));
///
/// assert!(!fetcher.probe("/health").await.succeeded);
/// assert!(fetcher.probe("/healthz").await.succeeded);
/// assert_eq!(fetcher.requests(), vec!["/health", "/healthz"]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, Script>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    /// Create a fetcher with no scripted paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a path with an explicit outcome.
    pub fn with_outcome(self, path: &str, outcome: ProbeOutcome) -> Self {
        self.set(path, Script::Respond(outcome));
        self
    }

    /// Script a path to answer 2xx with a JSON body.
    pub fn with_json(self, path: &str, body: Value) -> Self {
        self.with_outcome(path, ProbeOutcome::from_body(true, body.to_string()))
    }

    /// Script a path to answer 2xx with a plain text body.
    pub fn with_text(self, path: &str, body: &str) -> Self {
        self.with_outcome(path, ProbeOutcome::from_body(true, body))
    }

    /// Script a path to fail at the transport level.
    pub fn with_failure(self, path: &str) -> Self {
        self.with_outcome(path, ProbeOutcome::failed())
    }

    /// Script a path whose request never completes.
    pub fn with_hang(self, path: &str) -> Self {
        self.set(path, Script::Hang);
        self
    }

    /// Replace the script for a path; affects subsequent probes only.
    pub fn set(&self, path: &str, script: Script) {
        self.scripts.lock().insert(path.to_string(), script);
    }

    /// All probed paths, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of probes issued for `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|p| p.as_str() == path).count()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn probe(&self, path: &str) -> ProbeOutcome {
        self.requests.lock().push(path.to_string());

        let script = self.scripts.lock().get(path).cloned();
        match script {
            Some(Script::Respond(outcome)) => outcome,
            Some(Script::Hang) => std::future::pending().await,
            None => ProbeOutcome::failed(),
        }
    }

    fn description(&self) -> &str {
        "scripted"
    }
}
