//! Account validation panels and overlays.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::validate::{RenderedReport, ValidationView};

const DISCLAIMER: &str = "Validation results are informational only and do not \
constitute financial, legal or compliance advice. Balances and transaction \
history are read from public ledger data and may lag behind the network. \
Always verify an account independently before relying on it.";

/// Render the account input with the submit control.
pub fn render_input(frame: &mut Frame, app: &App, view: &ValidationView, area: Rect) {
    let block = Block::default()
        .title(" Account ID ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let control_style = if view.control.enabled {
        app.theme.header
    } else {
        app.theme.disabled
    };

    let input = if app.input.is_empty() {
        Span::styled("0.0.123", Style::default().add_modifier(Modifier::DIM))
    } else {
        Span::styled(app.input.clone(), app.theme.input)
    };

    let line = Line::from(vec![
        input,
        Span::raw("  "),
        Span::styled(format!("[ {} ]", view.control.label), control_style),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the result panel, or a hint while it is hidden.
pub fn render_results(frame: &mut Frame, app: &App, view: &ValidationView, area: Rect) {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(report) = view.panel.report() else {
        let hint = Paragraph::new("Enter an account ID and press Enter to validate.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(5), Constraint::Min(1)]).split(inner);
    frame.render_widget(Paragraph::new(summary_lines(app, report)), chunks[0]);

    let transactions: Vec<ListItem> = if report.transactions.is_empty() {
        vec![ListItem::new(Span::styled(
            "No recent transactions",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        report
            .transactions
            .iter()
            .map(|tx| ListItem::new(format!("• {}", tx)))
            .collect()
    };
    let list = List::new(transactions).block(
        Block::default()
            .title(Span::styled("Last transactions", app.theme.header))
            .borders(Borders::TOP),
    );
    frame.render_widget(list, chunks[1]);
}

fn summary_lines<'a>(app: &App, report: &'a RenderedReport) -> Vec<Line<'a>> {
    let field = |name: &'static str, value: &'a str| {
        Line::from(vec![
            Span::styled(format!("{:<10}", name), app.theme.header),
            Span::raw(value),
        ])
    };
    vec![
        field("Account", &report.account),
        field("Balance", &report.balance),
        field("Tx count", &report.tx_count),
        field("Score", &report.score),
        field(
            "Flags",
            if report.flags.is_empty() { "none" } else { report.flags.as_str() },
        ),
    ]
}

/// Render the pending validation alert as a modal.
pub fn render_alert(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.warning));

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let alert_area = super::centered(area, 50, 7);
    frame.render_widget(Clear, alert_area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        alert_area,
    );
}

/// Render the disclaimer modal.
pub fn render_disclaimer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Disclaimer ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let text = vec![
        Line::from(DISCLAIMER),
        Line::from(""),
        Line::from(Span::styled(
            "Esc or d to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let disclaimer_area = super::centered(area, 60, 10);
    frame.render_widget(Clear, disclaimer_area);
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        disclaimer_area,
    );
}
