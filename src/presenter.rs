//! Status presenter and the in-memory indicator board.
//!
//! The presenter only talks to an [`IndicatorSink`], so probe logic does not
//! depend on how indicators are drawn. [`StatusBoard`] is the sink used by
//! the TUI and by headless mode; the TUI renders it on every frame.

use std::time::Instant;

use serde::Serialize;
use tracing::trace;

use crate::data::{HealthStatus, PresentationState};

/// Key of the liveness indicator.
pub const LIVENESS_INDICATOR: &str = "status-health";
/// Key of the build version indicator.
pub const VERSION_INDICATOR: &str = "status-version";
/// Key of the metrics indicator.
pub const METRICS_INDICATOR: &str = "status-metrics";

/// Label shown before an indicator's first probe result arrives.
pub const PLACEHOLDER_LABEL: &str = "Checking…";

/// Capability interface for anything that can display indicator states.
pub trait IndicatorSink: Send {
    /// Whether an indicator with this key exists.
    fn has(&self, key: &str) -> bool;

    /// Replace the state of an existing indicator.
    fn write(&mut self, key: &str, state: &PresentationState);

    /// Current label text of an indicator, if it has one.
    fn label(&self, key: &str) -> Option<String>;
}

/// Apply a presentation state to the indicator named `key`.
///
/// Missing indicators are skipped silently. Returns whether the state
/// was written.
pub fn apply<S: IndicatorSink + ?Sized>(sink: &mut S, key: &str, state: &PresentationState) -> bool {
    if !sink.has(key) {
        trace!(key, "indicator not present, skipping");
        return false;
    }
    trace!(key, class = state.status.class(), label = %state.label, "applying state");
    sink.write(key, state);
    true
}

/// A single visual indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub key: String,
    pub caption: String,
    /// Applied state class. At most one is active at a time.
    pub status: Option<HealthStatus>,
    /// Text slot for the label. May be missing until first written.
    pub label: Option<String>,
}

impl Indicator {
    /// Create an indicator with no state and no label slot.
    pub fn new(key: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            caption: caption.into(),
            status: None,
            label: None,
        }
    }

    /// Set the initial label text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Full visible text: caption followed by the label, if any.
    pub fn text(&self) -> String {
        match &self.label {
            Some(label) => format!("{}: {}", self.caption, label),
            None => self.caption.clone(),
        }
    }
}

/// In-memory board of indicators, in display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusBoard {
    indicators: Vec<Indicator>,
    #[serde(skip)]
    last_updated: Option<Instant>,
}

impl StatusBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard board: liveness, version and metrics, all checking.
    pub fn standard() -> Self {
        Self::new()
            .with_indicator(Indicator::new(LIVENESS_INDICATOR, "Health").with_label(PLACEHOLDER_LABEL))
            .with_indicator(Indicator::new(VERSION_INDICATOR, "Version").with_label(PLACEHOLDER_LABEL))
            .with_indicator(Indicator::new(METRICS_INDICATOR, "Metrics").with_label(PLACEHOLDER_LABEL))
    }

    /// Add an indicator, replacing any existing one with the same key.
    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicators.retain(|i| i.key != indicator.key);
        self.indicators.push(indicator);
        self
    }

    /// Returns the indicator for `key`.
    pub fn get(&self, key: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.key == key)
    }

    /// All indicators in display order.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// When any indicator last received a state.
    pub fn last_updated(&self) -> Option<Instant> {
        self.last_updated
    }

    /// Worst status currently shown, ignoring indicators with no state.
    pub fn overall(&self) -> Option<HealthStatus> {
        self.indicators.iter().filter_map(|i| i.status).max()
    }
}

impl IndicatorSink for StatusBoard {
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn write(&mut self, key: &str, state: &PresentationState) {
        let Some(indicator) = self.indicators.iter_mut().find(|i| i.key == key) else {
            return;
        };
        indicator.status = Some(state.status);
        let slot = indicator.label.get_or_insert_with(String::new);
        slot.clone_from(&state.label);
        self.last_updated = Some(Instant::now());
    }

    fn label(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|i| i.label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_starts_checking() {
        let board = StatusBoard::standard();
        assert_eq!(board.indicators().len(), 3);
        for indicator in board.indicators() {
            assert_eq!(indicator.status, None);
            assert_eq!(indicator.label.as_deref(), Some(PLACEHOLDER_LABEL));
        }
        assert!(board.last_updated().is_none());
        assert_eq!(board.overall(), None);
    }

    #[test]
    fn test_apply_to_missing_indicator_is_noop() {
        let mut board = StatusBoard::new();
        assert!(!apply(&mut board, LIVENESS_INDICATOR, &PresentationState::ok("OK")));
        assert!(board.indicators().is_empty());
        assert!(board.last_updated().is_none());
    }

    #[test]
    fn test_apply_replaces_previous_state() {
        let mut board = StatusBoard::standard();
        apply(&mut board, METRICS_INDICATOR, &PresentationState::warn("Unavailable"));
        apply(&mut board, METRICS_INDICATOR, &PresentationState::ok("12 total"));

        let indicator = board.get(METRICS_INDICATOR).unwrap();
        assert_eq!(indicator.status, Some(HealthStatus::Healthy));
        assert_eq!(indicator.label.as_deref(), Some("12 total"));
        assert!(board.last_updated().is_some());
    }

    #[test]
    fn test_apply_creates_missing_label_slot() {
        let mut board = StatusBoard::new().with_indicator(Indicator::new("bare", "Bare"));
        assert_eq!(board.label("bare"), None);

        apply(&mut board, "bare", &PresentationState::err("Down"));
        assert_eq!(board.label("bare").as_deref(), Some("Down"));
        assert_eq!(board.get("bare").unwrap().text(), "Bare: Down");
    }

    #[test]
    fn test_overall_is_worst_status() {
        let mut board = StatusBoard::standard();
        apply(&mut board, LIVENESS_INDICATOR, &PresentationState::ok("OK"));
        apply(&mut board, VERSION_INDICATOR, &PresentationState::warn("unknown"));
        assert_eq!(board.overall(), Some(HealthStatus::Warning));

        apply(&mut board, LIVENESS_INDICATOR, &PresentationState::err("Down"));
        assert_eq!(board.overall(), Some(HealthStatus::Critical));
    }

    #[test]
    fn test_with_indicator_replaces_same_key() {
        let board = StatusBoard::standard()
            .with_indicator(Indicator::new(VERSION_INDICATOR, "Build").with_label("n/a"));
        assert_eq!(board.indicators().len(), 3);
        assert_eq!(board.get(VERSION_INDICATOR).unwrap().caption, "Build");
    }
}
