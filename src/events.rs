use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // An alert must be acknowledged before anything else
    if app.alert().is_some() {
        app.dismiss_alert();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_disclaimer {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('d') | KeyCode::Char('q')
        ) {
            app.show_disclaimer = false;
        }
        return;
    }

    match key.code {
        // Account input: identifiers are digits and dots only
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.input_push(c),
        KeyCode::Backspace => app.input_pop(),
        KeyCode::Enter => app.submit_validation(),
        KeyCode::Esc => app.go_back(),

        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('r') => app.refresh_now(),
        KeyCode::Char('e') => app.export_link(),
        KeyCode::Char('d') => app.toggle_disclaimer(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
