//! Runtime settings.
//!
//! Settings are layered: built-in defaults, an optional TOML file, then
//! `HGUARD_*` environment variables, then command-line overrides.
//!
//! ```toml
//! base_url = "https://hguard.example"
//! refresh_interval = "45s"
//! fail_safe_delay = "4s"
//!
//! [endpoints]
//! health = "/health"
//! health_fallback = "/healthz"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `HGUARD_ENDPOINTS__METRICS=/internal/metrics`.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::duration::parse_duration;

/// Default backend location.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Errors raised while assembling [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The config file or environment could not be read.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A duration setting could not be parsed.
    #[error("Invalid {field}: {message}")]
    InvalidDuration { field: &'static str, message: String },

    /// The base URL is not an HTTP(S) URL.
    #[error("Base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
}

/// Paths of the backend endpoints this client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Primary liveness path.
    pub health: String,
    /// Legacy liveness path, tried once when the primary fails.
    pub health_fallback: String,
    /// Build identity path.
    pub version: String,
    /// Metrics exposition path.
    pub metrics: String,
    /// Account validation path.
    pub validate: String,
    /// ISO 20022 pain.001 export path.
    pub export: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            health: "/health".to_string(),
            health_fallback: "/healthz".to_string(),
            version: "/version".to_string(),
            metrics: "/metrics".to_string(),
            validate: "/validate".to_string(),
            export: "/export/iso20022/pain001".to_string(),
        }
    }
}

/// Refresh cadence and fail-safe deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Period between refresh cycles.
    pub refresh_interval: Duration,
    /// Delay after start before the liveness fail-safe checks the board.
    pub fail_safe_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(45),
            fail_safe_delay: Duration::from_secs(4),
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timing: Timing,
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timing: Timing::default(),
            endpoints: Endpoints::default(),
        }
    }
}

/// Settings as they appear in files and the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    base_url: Option<String>,
    refresh_interval: Option<String>,
    fail_safe_delay: Option<String>,
    endpoints: Endpoints,
}

impl Settings {
    /// Load settings from an optional config file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("HGUARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let raw: RawSettings = config.try_deserialize()?;
        let settings = Self {
            endpoints: raw.endpoints,
            ..Self::default()
        };
        settings.merge(
            raw.base_url,
            raw.refresh_interval.as_deref(),
            raw.fail_safe_delay.as_deref(),
        )
    }

    /// Apply overrides on top of these settings, validating each value.
    pub fn merge(
        self,
        base_url: Option<String>,
        refresh_interval: Option<&str>,
        fail_safe_delay: Option<&str>,
    ) -> Result<Self, SettingsError> {
        let mut settings = self;

        if let Some(url) = base_url {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SettingsError::InvalidBaseUrl(url));
            }
            settings.base_url = url;
        }

        if let Some(value) = refresh_interval {
            let interval = parse_setting("refresh_interval", value)?;
            if interval.is_zero() {
                return Err(SettingsError::InvalidDuration {
                    field: "refresh_interval",
                    message: "must be greater than zero".to_string(),
                });
            }
            settings.timing.refresh_interval = interval;
        }

        if let Some(value) = fail_safe_delay {
            settings.timing.fail_safe_delay = parse_setting("fail_safe_delay", value)?;
        }

        Ok(settings)
    }
}

fn parse_setting(field: &'static str, value: &str) -> Result<Duration, SettingsError> {
    parse_duration(value).map_err(|e| SettingsError::InvalidDuration {
        field,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timing.refresh_interval, Duration::from_secs(45));
        assert_eq!(settings.timing.fail_safe_delay, Duration::from_secs(4));
        assert_eq!(settings.endpoints.health_fallback, "/healthz");
        assert_eq!(settings.endpoints.export, "/export/iso20022/pain001");
    }

    #[test]
    fn test_merge_overrides() {
        let settings = Settings::default()
            .merge(Some("https://hguard.example/".to_string()), Some("10s"), Some("750ms"))
            .unwrap();
        assert_eq!(settings.base_url, "https://hguard.example");
        assert_eq!(settings.timing.refresh_interval, Duration::from_secs(10));
        assert_eq!(settings.timing.fail_safe_delay, Duration::from_millis(750));
    }

    #[test]
    fn test_merge_rejects_bad_values() {
        assert!(matches!(
            Settings::default().merge(Some("ftp://x".to_string()), None, None),
            Err(SettingsError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            Settings::default().merge(None, Some("0s"), None),
            Err(SettingsError::InvalidDuration { field: "refresh_interval", .. })
        ));
        assert!(matches!(
            Settings::default().merge(None, None, Some("later")),
            Err(SettingsError::InvalidDuration { field: "fail_safe_delay", .. })
        ));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
base_url = "http://status.internal:9000"
refresh_interval = "30s"

[endpoints]
metrics = "/internal/metrics"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "http://status.internal:9000");
        assert_eq!(settings.timing.refresh_interval, Duration::from_secs(30));
        assert_eq!(settings.timing.fail_safe_delay, Duration::from_secs(4));
        assert_eq!(settings.endpoints.metrics, "/internal/metrics");
        assert_eq!(settings.endpoints.health, "/health");
    }

    #[test]
    fn test_load_reads_prefixed_environment() {
        // No other test asserts on the export path.
        std::env::set_var("HGUARD_ENDPOINTS__EXPORT", "/env/export");
        let settings = Settings::load(None);
        std::env::remove_var("HGUARD_ENDPOINTS__EXPORT");

        let settings = settings.unwrap();
        assert_eq!(settings.endpoints.export, "/env/export");
        assert_eq!(settings.endpoints.validate, "/validate");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Settings::load(Some(Path::new("/nonexistent/hguard.toml")));
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }
}
