use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

use super::app_state::App;
use super::mouse_events;
use crate::booking::{FieldKeyOutcome, FocusShift, FormFocus};
use crate::search::FieldId;

mod global;

// Short enough that a 300ms debounce fires on time
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(25);

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.poll_lookups();
        self.tick();

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                Event::Mouse(mouse) => {
                    mouse_events::handle_mouse_event(self, mouse);
                }
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_paste_event(&mut self, text: &str) {
        if self.notification.is_blocking() {
            return;
        }
        if let Some(id) = self.form.focus().field() {
            self.form.field_mut(id).paste(text, &mut self.search);
            self.mark_dirty();
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.mark_dirty();

        // A validation prompt swallows the key that acknowledges it
        if self.notification.is_blocking() {
            self.notification.dismiss();
            return;
        }

        if global::handle_global_keys(self, key) {
            return;
        }

        let handled = match self.form.focus().field() {
            Some(id) => self.handle_field_key(id, key),
            None => self.handle_vehicle_key(key),
        };

        if !handled && key.code == KeyCode::Esc {
            self.should_quit = true;
        }
    }

    fn handle_field_key(&mut self, id: FieldId, key: KeyEvent) -> bool {
        match self.form.field_mut(id).handle_key(key, &mut self.search) {
            FieldKeyOutcome::Handled => true,
            FieldKeyOutcome::Selected(FocusShift::NextField) => {
                self.form.focus_next();
                true
            }
            FieldKeyOutcome::Selected(FocusShift::Stay) => true,
            FieldKeyOutcome::Ignored => false,
        }
    }

    fn handle_vehicle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.form.vehicles.select_previous(),
            KeyCode::Right | KeyCode::Char('l') => self.form.vehicles.select_next(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.form.vehicles.select(index);
            }
            KeyCode::Up => self.form.set_focus(FormFocus::Dropoff),
            KeyCode::Enter => self.submit(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
