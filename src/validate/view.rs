use parking_lot::Mutex;
use serde::Serialize;
use tracing::info;

use super::{AccountId, AccountValidator, RenderedReport, ValidationError};

/// Label of the submit control when idle.
pub const DEFAULT_LABEL: &str = "Validate Wallet";
/// Label of the submit control while a validation is running.
pub const BUSY_LABEL: &str = "Validating...";

/// The control that triggers a validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl SubmitControl {
    fn begin(&mut self) {
        self.enabled = false;
        self.label = BUSY_LABEL.to_string();
    }

    fn restore(&mut self) {
        *self = Self::default();
    }
}

/// Whether validation results are on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultPanel {
    #[default]
    Hidden,
    Showing(RenderedReport),
}

impl ResultPanel {
    pub fn report(&self) -> Option<&RenderedReport> {
        match self {
            Self::Hidden => None,
            Self::Showing(report) => Some(report),
        }
    }
}

/// Everything the validation workflow shows to the user.
#[derive(Debug, Clone, Default)]
pub struct ValidationView {
    pub control: SubmitControl,
    pub panel: ResultPanel,
    /// Account of the last successful validation; target of the export link.
    pub current_account: Option<String>,
    alert: Option<String>,
}

impl ValidationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending alert text, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

/// Keeps the submit control disabled for as long as it lives.
struct BusyGuard<'a> {
    view: &'a Mutex<ValidationView>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(view: &'a Mutex<ValidationView>) -> Option<Self> {
        let mut locked = view.lock();
        if !locked.control.enabled {
            return None;
        }
        locked.control.begin();
        Some(Self { view })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.lock().control.restore();
    }
}

/// Validate `input` and reflect the outcome in `view`.
///
/// Malformed input raises an alert without touching the network. Otherwise
/// the submit control stays disabled until this future completes or is
/// dropped. Success shows the result panel and records the current account.
/// Failure hides the panel and raises an alert.
pub async fn submit(
    validator: &dyn AccountValidator,
    view: &Mutex<ValidationView>,
    input: &str,
) -> Result<RenderedReport, ValidationError> {
    let account = match AccountId::parse(input) {
        Ok(account) => account,
        Err(e) => {
            view.lock().raise_alert(e.to_string());
            return Err(e);
        }
    };

    let Some(_busy) = BusyGuard::acquire(view) else {
        return Err(ValidationError::Busy);
    };

    match validator.validate(&account).await {
        Ok(report) => {
            let rendered = RenderedReport::new(&report, account.as_str());
            info!(account = %rendered.account, score = %rendered.score, "account validated");
            let mut locked = view.lock();
            locked.current_account = Some(rendered.account.clone());
            locked.panel = ResultPanel::Showing(rendered.clone());
            Ok(rendered)
        }
        Err(e) => {
            info!(%account, error = %e, "validation failed");
            let mut locked = view.lock();
            locked.panel = ResultPanel::Hidden;
            locked.raise_alert(e.to_string());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationReport;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug)]
    struct StubValidator {
        result: Result<ValidationReport, ValidationError>,
        calls: AtomicUsize,
    }

    impl StubValidator {
        fn new(result: Result<ValidationReport, ValidationError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AccountValidator for StubValidator {
        async fn validate(&self, _account: &AccountId) -> Result<ValidationReport, ValidationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Records the control state seen while the request is in flight.
    #[derive(Debug)]
    struct ObservingValidator {
        view: Arc<Mutex<ValidationView>>,
        seen: Mutex<Option<SubmitControl>>,
    }

    #[async_trait]
    impl AccountValidator for ObservingValidator {
        async fn validate(&self, _account: &AccountId) -> Result<ValidationReport, ValidationError> {
            *self.seen.lock() = Some(self.view.lock().control.clone());
            Err(ValidationError::Network("connection reset".into()))
        }
    }

    #[derive(Debug)]
    struct HangingValidator;

    #[async_trait]
    impl AccountValidator for HangingValidator {
        async fn validate(&self, _account: &AccountId) -> Result<ValidationReport, ValidationError> {
            std::future::pending().await
        }
    }

    fn report() -> ValidationReport {
        ValidationReport {
            account_id: Some("0.0.123".into()),
            balance_tinybar: Some(250_000_000.0),
            flags: vec!["KNOWN_EXCHANGE".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_input_never_calls_validator() {
        let validator = StubValidator::new(Ok(report()));
        let view = Mutex::new(ValidationView::new());

        let result = submit(&validator, &view, "0.0.abc").await;
        assert!(matches!(result, Err(ValidationError::InvalidAccountId(_))));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);

        let view = view.lock();
        assert_eq!(view.alert(), Some("Invalid Account ID format. Example: 0.0.123"));
        assert_eq!(view.control, SubmitControl::default());
    }

    #[tokio::test]
    async fn test_success_shows_panel_and_records_account() {
        let validator = StubValidator::new(Ok(report()));
        let view = Mutex::new(ValidationView::new());

        let rendered = submit(&validator, &view, " 0.0.123 ").await.unwrap();
        assert_eq!(rendered.balance, "2.5 HBAR");

        let view = view.lock();
        assert_eq!(view.panel.report(), Some(&rendered));
        assert_eq!(view.current_account.as_deref(), Some("0.0.123"));
        assert_eq!(view.alert(), None);
        assert_eq!(view.control, SubmitControl::default());
    }

    #[tokio::test]
    async fn test_current_account_falls_back_to_input() {
        let validator = StubValidator::new(Ok(ValidationReport::default()));
        let view = Mutex::new(ValidationView::new());
        submit(&validator, &view, "0.0.77").await.unwrap();
        assert_eq!(view.lock().current_account.as_deref(), Some("0.0.77"));
    }

    #[tokio::test]
    async fn test_rejection_hides_panel_and_alerts_detail() {
        let view = Mutex::new(ValidationView::new());
        submit(&StubValidator::new(Ok(report())), &view, "0.0.123").await.unwrap();

        let validator = StubValidator::new(Err(ValidationError::Rejected("Account not found".into())));
        let result = submit(&validator, &view, "0.0.404").await;
        assert_eq!(result, Err(ValidationError::Rejected("Account not found".into())));

        let view = view.lock();
        assert_eq!(view.panel, ResultPanel::Hidden);
        assert_eq!(view.alert(), Some("Account not found"));
        assert_eq!(view.current_account.as_deref(), Some("0.0.123"));
        assert!(view.control.enabled);
    }

    #[tokio::test]
    async fn test_control_disabled_during_request_and_restored_after() {
        let view = Arc::new(Mutex::new(ValidationView::new()));
        let validator = ObservingValidator {
            view: view.clone(),
            seen: Mutex::new(None),
        };

        let result = submit(&validator, &view, "0.0.5").await;
        assert!(matches!(result, Err(ValidationError::Network(_))));

        let seen = validator.seen.lock().clone().unwrap();
        assert!(!seen.enabled);
        assert_eq!(seen.label, BUSY_LABEL);

        let view = view.lock();
        assert_eq!(view.control, SubmitControl::default());
        assert_eq!(view.alert(), Some("Network error. Please try again."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_control_restored_when_submission_is_dropped() {
        let view = Mutex::new(ValidationView::new());
        let result =
            tokio::time::timeout(Duration::from_secs(30), submit(&HangingValidator, &view, "0.0.5")).await;
        assert!(result.is_err());

        let view = view.lock();
        assert_eq!(view.control, SubmitControl::default());
        assert_eq!(view.alert(), None);
    }

    #[tokio::test]
    async fn test_busy_control_rejects_second_submission() {
        let validator = StubValidator::new(Ok(report()));
        let view = Mutex::new(ValidationView::new());
        view.lock().control.begin();

        let result = submit(&validator, &view, "0.0.123").await;
        assert_eq!(result, Err(ValidationError::Busy));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
        assert!(!view.lock().control.enabled);
    }

    #[test]
    fn test_dismiss_alert() {
        let mut view = ValidationView::new();
        view.raise_alert("Validation failed.");
        assert_eq!(view.alert(), Some("Validation failed."));
        view.dismiss_alert();
        assert_eq!(view.alert(), None);
    }
}
