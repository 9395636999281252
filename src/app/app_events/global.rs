use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app_state::App;

/// Keys that mean the same thing wherever focus is. Returns true if consumed.
pub fn handle_global_keys(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.should_quit = true;
                return true;
            }
            KeyCode::Char('s') => {
                app.submit();
                return true;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Tab => {
            app.form.focus_next();
            true
        }
        KeyCode::BackTab => {
            app.form.focus_previous();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "global_tests.rs"]
mod global_tests;
