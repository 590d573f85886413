//! Common UI components.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::HealthStatus;
use crate::presenter::StatusBoard;

/// Render the header bar with the overall backend status.
///
/// Displays: worst indicator state, indicator counts by state, backend URL.
pub fn render_header(frame: &mut Frame, app: &App, board: &StatusBoard, area: Rect) {
    let count = |status: HealthStatus| {
        board
            .indicators()
            .iter()
            .filter(|i| i.status == Some(status))
            .count()
    };
    let healthy = count(HealthStatus::Healthy);
    let warning = count(HealthStatus::Warning);
    let critical = count(HealthStatus::Critical);

    let overall = board.overall();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", overall.map_or("…", |s| s.symbol())),
            app.theme.status_style(overall),
        ),
        Span::styled("HGUARD ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", healthy), Style::default().fg(app.theme.healthy)),
        Span::raw(" ok "),
        if warning > 0 {
            Span::styled(format!("{}", warning), Style::default().fg(app.theme.warning))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if critical > 0 {
            Span::styled(
                format!("{}", critical),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" err │ "),
        Span::raw(app.source_description().to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows time since the last indicator update and the available controls,
/// unless a temporary status message is pending.
pub fn render_status_bar(frame: &mut Frame, app: &App, board: &StatusBoard, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "Enter:validate e:export r:refresh d:disclaimer ?:help q:quit";
    let status = match board.last_updated() {
        Some(at) => format!(
            " Updated {:.1}s ago | {}",
            at.elapsed().as_secs_f64(),
            controls
        ),
        None => format!(" Checking… | {}", controls),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Validation"),
        Line::from("  0-9 .       Type account ID"),
        Line::from("  Backspace   Delete character"),
        Line::from("  Enter       Validate account"),
        Line::from("  e           Show export link"),
        Line::from("  Esc         Close overlay / clear"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Refresh status now"),
        Line::from("  d           Toggle disclaimer"),
        Line::from("  ?           Toggle help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_area = super::centered(area, 42, 18);
    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
