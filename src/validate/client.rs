use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::{AccountId, ValidationError, ValidationReport};
use crate::config::Endpoints;
use crate::probe::is_populated;
use crate::source::{no_store_client, resolve_url};

const REJECTED_FALLBACK: &str = "Validation failed.";

/// Anything that can validate an account against the backend.
#[async_trait]
pub trait AccountValidator: Send + Sync + Debug {
    async fn validate(&self, account: &AccountId) -> Result<ValidationReport, ValidationError>;
}

/// Validates accounts with `GET {base}/validate?accountId=<id>`.
#[derive(Debug, Clone)]
pub struct ValidationClient {
    client: Client,
    base_url: String,
    path: String,
}

impl ValidationClient {
    /// Create a client with cache-bypassing default headers.
    pub fn new(base_url: impl Into<String>, endpoints: &Endpoints) -> reqwest::Result<Self> {
        Ok(Self::with_client(no_store_client()?, base_url, endpoints))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, endpoints: &Endpoints) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            path: endpoints.validate.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AccountValidator for ValidationClient {
    async fn validate(&self, account: &AccountId) -> Result<ValidationReport, ValidationError> {
        let url = resolve_url(&self.base_url, &self.path);
        debug!(%url, %account, "validating account");

        let response = self
            .client
            .get(&url)
            .query(&[("accountId", account.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "validation request failed");
                ValidationError::Network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ValidationError::Network(e.to_string()))?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let detail = body
                .as_ref()
                .and_then(|b| b.get("detail"))
                .filter(|d| is_populated(d))
                .map(|d| match d {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
            debug!(%status, %detail, "validation rejected");
            return Err(ValidationError::Rejected(detail));
        }

        let body = body.ok_or_else(|| ValidationError::Network("response body is not JSON".to_string()))?;
        serde_json::from_value(body).map_err(|e| {
            warn!(error = %e, "unexpected validation response");
            ValidationError::Network(e.to_string())
        })
    }
}

/// Link to the ISO 20022 pain.001 export for `account`, if there is one.
pub fn export_url(base_url: &str, endpoints: &Endpoints, account: Option<&str>) -> Option<String> {
    let account = account.filter(|a| !a.is_empty())?;
    let url = resolve_url(base_url, &endpoints.export);
    Url::parse_with_params(&url, &[("accountId", account)])
        .ok()
        .map(|u| u.to_string())
}
