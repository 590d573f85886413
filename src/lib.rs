// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # hguard-watch
//!
//! A status dashboard and account validator for an hguard backend.
//!
//! The crate probes three backend capabilities on a fixed cadence
//! (liveness, build version, request metrics), reduces each response to a
//! tri-state indicator, and keeps a board of those indicators current. It
//! also drives the account validation workflow against the same backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐   ┌─────────┐   ┌───────────┐   ┌────────────┐  │
//! │  │ refresh │──▶│  probe  │──▶│ presenter │──▶│ StatusBoard│  │
//! │  │ (timer) │   │         │   │  (apply)  │   │   (ui)     │  │
//! │  └─────────┘   └────┬────┘   └───────────┘   └────────────┘  │
//! │                     ▼                                        │
//! │                ┌─────────┐       ┌──────────┐                │
//! │                │ source  │◀──────│ validate │                │
//! │                │ (fetch) │       │          │                │
//! │                └─────────┘       └──────────┘                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`Fetcher`] trait, a reqwest-backed [`HttpFetcher`] and
//!   a scripted fetcher for tests
//! - **[`data`]**: Indicator states and text extraction helpers
//! - **[`probe`]**: The liveness, version and metrics probes
//! - **[`presenter`]**: Applies probe results to an [`IndicatorSink`]
//! - **[`refresh`]**: Periodic refresh with a liveness fail-safe
//! - **[`validate`]**: Account ID checks, the validation client and its view state
//! - **[`config`]**: Layered settings (file, environment, command line)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### One refresh cycle
//!
//! ```
//! use hguard_watch::{run_cycle, Endpoints, ScriptedFetcher, StatusBoard};
//! use parking_lot::Mutex;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let fetcher = ScriptedFetcher::new()
//!     .with_json("/health", json!({ "uptime_seconds": 5400 }))
//!     .with_json("/version", json!({ "version": "0.1.0-alpha" }))
//!     .with_text("/metrics", "hguard_requests_total 1234\n");
//!
//! let board = Mutex::new(StatusBoard::standard());
//! run_cycle(&fetcher, &board, &Endpoints::default()).await;
//!
//! let board = board.lock();
//! assert_eq!(board.get("status-health").unwrap().text(), "Health: OK • 1h 30m");
//! assert_eq!(board.get("status-metrics").unwrap().text(), "Metrics: 1,234 total");
//! # });
//! ```
//!
//! ### Periodic refresh
//!
//! ```no_run
//! use std::sync::Arc;
//! use hguard_watch::{HttpFetcher, RefreshLoop, Settings, StatusBoard};
//! use parking_lot::Mutex;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let settings = Settings::load(None)?;
//! let fetcher = Arc::new(HttpFetcher::new(&settings.base_url)?);
//! let board = Arc::new(Mutex::new(StatusBoard::standard()));
//!
//! let handle = RefreshLoop::new(fetcher, board, settings.endpoints, settings.timing).start();
//! // ... render `handle.sink()` ...
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod presenter;
pub mod probe;
pub mod refresh;
pub mod source;
pub mod ui;
pub mod validate;

// Re-export main types for convenience
pub use app::App;
pub use config::{Endpoints, Settings, SettingsError, Timing};
pub use data::{HealthStatus, PresentationState};
pub use presenter::{apply, Indicator, IndicatorSink, StatusBoard};
pub use probe::{probe_liveness, probe_metrics, probe_version};
pub use refresh::{run_cycle, LoopState, RefreshHandle, RefreshLoop};
pub use source::{Fetcher, HttpFetcher, ProbeOutcome, ScriptedFetcher};
pub use validate::{
    submit, AccountId, AccountValidator, RenderedReport, ValidationClient, ValidationError,
    ValidationReport, ValidationView,
};
