//! Application state for the interactive TUI.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::config::{Endpoints, Settings};
use crate::presenter::StatusBoard;
use crate::refresh::RefreshHandle;
use crate::ui::Theme;
use crate::validate::{export_url, submit, AccountValidator, ValidationView};

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Longest account identifier the input accepts (`0.0.` plus 20 digits).
const MAX_INPUT_LEN: usize = 24;

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub show_disclaimer: bool,

    /// Account identifier being typed.
    pub input: String,

    refresh: RefreshHandle<StatusBoard>,
    validation: Arc<Mutex<ValidationView>>,
    validator: Arc<dyn AccountValidator>,
    runtime: Handle,

    base_url: String,
    endpoints: Endpoints,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app around a started refresh loop.
    pub fn new(
        settings: &Settings,
        refresh: RefreshHandle<StatusBoard>,
        validator: Arc<dyn AccountValidator>,
        runtime: Handle,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            show_disclaimer: false,
            input: String::new(),
            refresh,
            validation: Arc::new(Mutex::new(ValidationView::new())),
            validator,
            runtime,
            base_url: settings.base_url.clone(),
            endpoints: settings.endpoints.clone(),
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the monitored backend.
    pub fn source_description(&self) -> &str {
        self.refresh.source_description()
    }

    /// Copy of the status board for rendering.
    pub fn board(&self) -> StatusBoard {
        self.refresh.sink().lock().clone()
    }

    /// Copy of the validation view for rendering.
    pub fn validation(&self) -> ValidationView {
        self.validation.lock().clone()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Append a character to the account input.
    pub fn input_push(&mut self, c: char) {
        if self.input.chars().count() < MAX_INPUT_LEN {
            self.input.push(c);
        }
    }

    /// Remove the last character from the account input.
    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Validate the current input in the background.
    pub fn submit_validation(&mut self) {
        if !self.validation.lock().control.enabled {
            self.set_status_message("Validation already in progress.".to_string());
            return;
        }

        let validator = Arc::clone(&self.validator);
        let view = Arc::clone(&self.validation);
        let input = self.input.clone();
        self.runtime.spawn(async move {
            if let Err(e) = submit(validator.as_ref(), &view, &input).await {
                debug!(error = %e, "validation did not succeed");
            }
        });
    }

    /// Run an extra refresh cycle now.
    pub fn refresh_now(&mut self) {
        let _guard = self.runtime.enter();
        self.refresh.refresh_now();
        self.set_status_message("Refreshing…".to_string());
    }

    /// Show the export link for the last validated account.
    pub fn export_link(&mut self) {
        let account = self.validation.lock().current_account.clone();
        match export_url(&self.base_url, &self.endpoints, account.as_deref()) {
            Some(url) => {
                info!(%url, "export link");
                self.set_status_message(format!("Export: {}", url));
            }
            None => self.set_status_message("Validate an account first".to_string()),
        }
    }

    /// Pending validation alert, if any.
    pub fn alert(&self) -> Option<String> {
        self.validation.lock().alert().map(str::to_string)
    }

    pub fn dismiss_alert(&mut self) {
        self.validation.lock().dismiss_alert();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Toggle the disclaimer overlay.
    pub fn toggle_disclaimer(&mut self) {
        self.show_disclaimer = !self.show_disclaimer;
    }

    /// Close the topmost overlay, or clear the input when none is open.
    pub fn go_back(&mut self) {
        if self.alert().is_some() {
            self.dismiss_alert();
        } else if self.show_disclaimer {
            self.show_disclaimer = false;
        } else if self.show_help {
            self.show_help = false;
        } else {
            self.clear_input();
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
