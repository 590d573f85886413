//! Account validation workflow.
//!
//! A submission goes through three steps:
//!
//! 1. [`AccountId::parse`] checks the surface syntax. Malformed input never
//!    reaches the network.
//! 2. An [`AccountValidator`] (normally a [`ValidationClient`]) asks the
//!    backend for a [`ValidationReport`].
//! 3. [`submit`] drives both against a shared [`ValidationView`], keeping
//!    the submit control disabled while the request is in flight.
//!
//! Every failure surfaces as a [`ValidationError`] whose `Display` text is
//! the alert shown to the user.

mod client;
mod report;
mod view;

pub use client::{export_url, AccountValidator, ValidationClient};
pub use report::{RenderedReport, TxSummary, ValidationReport};
pub use view::{submit, ResultPanel, SubmitControl, ValidationView, BUSY_LABEL, DEFAULT_LABEL};

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static ACCOUNT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0\.0\.\d{1,20}$").expect("account id pattern is valid"));

/// Errors produced by the validation workflow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is not of the form `0.0.<digits>`.
    #[error("Invalid Account ID format. Example: 0.0.123")]
    InvalidAccountId(String),

    /// The backend answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    /// The request failed or the response could not be read.
    #[error("Network error. Please try again.")]
    Network(String),

    /// A validation is already running.
    #[error("Validation already in progress.")]
    Busy,
}

/// A syntactically valid account identifier (`shard.realm.num` with shard
/// and realm fixed at zero).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Parse user input, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if ACCOUNT_ID_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidAccountId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_valid_ids() {
        assert_eq!(AccountId::parse("0.0.123").unwrap().as_str(), "0.0.123");
        assert_eq!(AccountId::parse("  0.0.98\n").unwrap().to_string(), "0.0.98");
        assert!(AccountId::parse(&format!("0.0.{}", "9".repeat(20))).is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for input in [
            "",
            "0.0.",
            "0.0.abc",
            "1.0.123",
            "0.1.123",
            "0.0.123.4",
            "0.0.-1",
            "0.0.1 2",
        ] {
            assert_eq!(
                AccountId::parse(input),
                Err(ValidationError::InvalidAccountId(input.trim().to_string())),
                "input: {:?}",
                input
            );
        }
        assert!(AccountId::parse(&format!("0.0.{}", "1".repeat(21))).is_err());
    }

    #[test]
    fn test_error_messages_are_alert_text() {
        assert_eq!(
            ValidationError::InvalidAccountId("x".into()).to_string(),
            "Invalid Account ID format. Example: 0.0.123"
        );
        assert_eq!(
            ValidationError::Network("connection refused".into()).to_string(),
            "Network error. Please try again."
        );
        assert_eq!(
            ValidationError::Rejected("Account not found".into()).to_string(),
            "Account not found"
        );
    }
}
