//! Fetch abstraction for probing backend endpoints.
//!
//! Every probe goes through a [`Fetcher`], which never fails: transport
//! errors, non-success statuses and unparseable bodies are all folded into a
//! [`ProbeOutcome`] so callers only ever deal with data.

mod http;
mod scripted;

pub use http::{no_store_client, resolve_url, HttpFetcher};
pub use scripted::{Script, ScriptedFetcher};

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

/// Normalized result of a single GET request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeOutcome {
    /// True when the request completed with a 2xx status.
    pub succeeded: bool,
    /// Body decoded as JSON, if it was valid JSON.
    pub parsed_body: Option<Value>,
    /// Raw body text (empty when no body could be read).
    pub raw_text: String,
}

impl ProbeOutcome {
    /// Build an outcome from a response body, attempting JSON decoding.
    pub fn from_body(succeeded: bool, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let parsed_body = serde_json::from_str(&raw_text).ok();
        Self {
            succeeded,
            parsed_body,
            raw_text,
        }
    }

    /// An outcome for a request that never produced a response.
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Trait for issuing cache-bypassing GET requests against the backend.
///
/// Implementations must absorb every failure into the returned outcome.
///
/// # Example
///
/// ```
/// use hguard_watch::{Fetcher, ScriptedFetcher};
///
/// # tokio_test::block_on(async {
/// let fetcher = ScriptedFetcher::new().with_text("/metrics", "requests_total 3");
/// let outcome = fetcher.probe("/metrics").await;
/// assert!(outcome.succeeded);
/// # });
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    /// Issue a GET for `path` and normalize the result.
    async fn probe(&self, path: &str) -> ProbeOutcome;

    /// Returns a human-readable description of the target.
    fn description(&self) -> &str;
}
