//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HealthStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for `warn` indicators.
    pub warning: Color,
    /// Color for `err` indicators.
    pub critical: Color,
    /// Color for `ok` indicators.
    pub healthy: Color,
    /// Color for indicators still waiting on their first result.
    pub pending: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles.
    pub header: Style,
    /// Style for the account input while it accepts submissions.
    pub input: Style,
    /// Style for a disabled submit control.
    pub disabled: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            pending: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            disabled: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            pending: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            disabled: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for an indicator state; `None` means no state applied yet.
    pub fn status_style(&self, status: Option<HealthStatus>) -> Style {
        match status {
            Some(HealthStatus::Healthy) => Style::default().fg(self.healthy),
            Some(HealthStatus::Warning) => Style::default().fg(self.warning),
            Some(HealthStatus::Critical) => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            None => Style::default().fg(self.pending).add_modifier(Modifier::DIM),
        }
    }
}
