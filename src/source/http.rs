//! HTTP fetcher backed by reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tracing::debug;

use super::{Fetcher, ProbeOutcome};

/// Build a client that asks every intermediary for a fresh response.
pub fn no_store_client() -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    Client::builder().default_headers(headers).build()
}

/// A fetcher that issues real GET requests against a base URL.
///
/// Paths are resolved relative to the base URL; absolute `http(s)://` URLs
/// are used unchanged. No request timeout is set here, so a hung request is
/// left to the transport and to the liveness fail-safe.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    description: String,
}

impl HttpFetcher {
    /// Create a fetcher for the given base URL with a cache-bypassing client.
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self::with_client(no_store_client()?, base_url))
    }

    /// Create a fetcher that reuses an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let description = format!("http: {}", base_url);
        Self {
            client,
            base_url,
            description,
        }
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Resolve a path or absolute URL into the URL that will be requested.
    pub fn url_for(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }
}

/// Join `path` onto `base_url` unless it is already absolute.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn probe(&self, path: &str) -> ProbeOutcome {
        let url = self.url_for(path);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%url, error = %e, "probe request failed");
                return ProbeOutcome::failed();
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(%url, error = %e, "failed to read probe response body");
                return ProbeOutcome::failed();
            }
        };

        if !status.is_success() {
            debug!(%url, %status, "probe returned non-success status");
        }

        ProbeOutcome::from_body(status.is_success(), text)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_paths() {
        assert_eq!(
            resolve_url("http://localhost:8080/", "/health"),
            "http://localhost:8080/health"
        );
        assert_eq!(
            resolve_url("http://localhost:8080", "version"),
            "http://localhost:8080/version"
        );
    }

    #[test]
    fn test_resolve_absolute_url_unchanged() {
        assert_eq!(
            resolve_url("http://localhost:8080", "https://status.example/healthz"),
            "https://status.example/healthz"
        );
    }

    #[test]
    fn test_description() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(fetcher.base_url(), "http://127.0.0.1:8080");
        assert_eq!(fetcher.description(), "http: http://127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_absorbed() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher = HttpFetcher::new(format!("http://127.0.0.1:{}", port)).unwrap();
        let outcome = fetcher.probe("/health").await;
        assert!(!outcome.succeeded);
        assert!(outcome.parsed_body.is_none());
        assert!(outcome.raw_text.is_empty());
    }
}
