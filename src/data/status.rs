//! Presentation states for status indicators.
//!
//! A [`PresentationState`] is the complete externally visible status of one
//! indicator at one point in time: a tri-state [`HealthStatus`] plus a short
//! display label. Every refresh replaces the previous state wholesale.

use serde::Serialize;

/// Health status for a probed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "ok")]
    Healthy,
    #[serde(rename = "warn")]
    Warning,
    #[serde(rename = "err")]
    Critical,
}

impl HealthStatus {
    /// All statuses, in severity order.
    pub const ALL: [HealthStatus; 3] = [
        HealthStatus::Healthy,
        HealthStatus::Warning,
        HealthStatus::Critical,
    ];

    /// Returns the state class applied to an indicator.
    pub fn class(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "ok",
            HealthStatus::Warning => "warn",
            HealthStatus::Critical => "err",
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }
}

/// Status plus label for a single indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationState {
    pub status: HealthStatus,
    pub label: String,
}

impl PresentationState {
    pub fn new(status: HealthStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
        }
    }

    pub fn ok(label: impl Into<String>) -> Self {
        Self::new(HealthStatus::Healthy, label)
    }

    pub fn warn(label: impl Into<String>) -> Self {
        Self::new(HealthStatus::Warning, label)
    }

    pub fn err(label: impl Into<String>) -> Self {
        Self::new(HealthStatus::Critical, label)
    }
}
