//! Data models and pure transformations for probe results.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of interval strings (e.g., "45s", "500ms") used by configuration
//! - [`extract`]: Text extractors (uptime formatting, counter scraping, truncation, grouping)
//! - [`status`]: Presentation states ([`HealthStatus`], [`PresentationState`])
//!
//! ## Data Flow
//!
//! ```text
//! ProbeOutcome (raw response)
//!        │
//!        ▼
//! extract::* (uptime, counters, one-line text)
//!        │
//!        ▼
//! PresentationState ──▶ presenter::apply()
//! ```

pub mod duration;
pub mod extract;
pub mod status;

pub use status::{HealthStatus, PresentationState};
