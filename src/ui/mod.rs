//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`status`]: The indicator panel (liveness, version, metrics)
//! - [`validate`]: Account input, result panel, alert and disclaimer overlays
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Indicators (status::render)          │
//! ├──────────────────────────────────────┤
//! │ Account input (validate::render_input)│
//! ├──────────────────────────────────────┤
//! │ Results (validate::render_results)   │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - common::render_help
//!    - validate::render_disclaimer
//!    - validate::render_alert
//! ```

pub mod common;
pub mod status;
pub mod theme;
pub mod validate;

pub use theme::Theme;

use ratatui::layout::Rect;

/// Centered rectangle of at most `width` x `height` inside `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
