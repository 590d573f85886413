//! Indicator panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::presenter::{Indicator, StatusBoard};

/// Render one bordered pill per indicator, side by side.
pub fn render(frame: &mut Frame, app: &App, board: &StatusBoard, area: Rect) {
    let indicators = board.indicators();
    if indicators.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, indicators.len() as u32); indicators.len()];
    let cells = Layout::horizontal(constraints).split(area);

    for (indicator, cell) in indicators.iter().zip(cells.iter()) {
        render_indicator(frame, app, indicator, *cell);
    }
}

fn render_indicator(frame: &mut Frame, app: &App, indicator: &Indicator, area: Rect) {
    let style = app.theme.status_style(indicator.status);
    let symbol = if indicator.status.is_some() { "●" } else { "○" };

    let block = Block::default()
        .title(format!(" {} ", indicator.caption))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let line = Line::from(vec![
        Span::styled(format!("{} ", symbol), style),
        Span::styled(indicator.label.clone().unwrap_or_default(), style),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
