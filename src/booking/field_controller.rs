//! One location input: text, dropdown, loading flag and resolved location.
//!
//! Keystrokes go through the debouncer; once typing pauses the captured query
//! is resolved through the shared `SearchService`. The controller enforces one
//! armed debounce and one in-flight lookup per field.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use serde::Serialize;
use tui_textarea::{CursorMove, TextArea};

use crate::autocomplete::{ListEvent, SuggestionList};
use crate::geocoding::{NormalizedQuery, SuggestionResult};
use crate::search::{FieldId, QueryDebouncer, Resolution, SearchService};

/// A location picked from the suggestions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&SuggestionResult> for ResolvedLocation {
    fn from(result: &SuggestionResult) -> Self {
        Self {
            display_name: result.display_name.clone(),
            lat: result.lat,
            lon: result.lon,
        }
    }
}

/// Where focus should go after a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusShift {
    Stay,
    NextField,
}

/// Result of routing a key to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKeyOutcome {
    Handled,
    Selected(FocusShift),
    Ignored,
}

#[derive(Debug)]
pub struct FieldController {
    id: FieldId,
    textarea: TextArea<'static>,
    list: SuggestionList,
    loading: bool,
    selected_location: Option<ResolvedLocation>,
    debouncer: QueryDebouncer,
}

impl FieldController {
    pub fn new(id: FieldId, debounce: Duration) -> Self {
        Self {
            id,
            textarea: single_line_textarea(id, ""),
            list: SuggestionList::new(),
            loading: false,
            selected_location: None,
            debouncer: QueryDebouncer::new(debounce),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn text(&self) -> &str {
        self.textarea.lines().first().map_or("", String::as_str)
    }

    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected_location(&self) -> Option<&ResolvedLocation> {
        self.selected_location.as_ref()
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.debouncer.has_pending()
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    /// Replace the text and react as if the user typed it
    pub fn on_text_change(&mut self, new_text: &str, service: &mut SearchService) {
        self.textarea = single_line_textarea(self.id, new_text);
        self.text_changed(service);
    }

    /// Insert pasted text at the cursor; line breaks are flattened to spaces
    pub fn paste(&mut self, text: &str, service: &mut SearchService) {
        let flattened = text.replace(['\r', '\n'], " ");
        if self.textarea.insert_str(flattened) {
            self.text_changed(service);
        }
    }

    fn text_changed(&mut self, service: &mut SearchService) {
        if let Some(query) = NormalizedQuery::new(self.text()) {
            // A lookup for other text must not land under this one
            if service
                .pending_query(self.id)
                .is_some_and(|pending| *pending != query)
            {
                service.cancel(self.id);
                self.loading = false;
            }
            self.debouncer.schedule(self.text().to_string());
            return;
        }

        // Too short to search: drop everything that could still show results
        self.debouncer.cancel();
        service.cancel(self.id);
        self.loading = false;
        self.list.clear();
    }

    /// Re-show the last results without querying again
    pub fn on_focus(&mut self) -> bool {
        self.list.reveal()
    }

    pub fn on_results_ready(&mut self, results: Vec<SuggestionResult>) {
        self.loading = false;
        self.list.show_results(results);
    }

    /// Commit `item` as this field's location
    pub fn select_suggestion(
        &mut self,
        item: &SuggestionResult,
        service: &mut SearchService,
    ) -> FocusShift {
        self.textarea = single_line_textarea(self.id, &item.display_name);
        self.selected_location = Some(ResolvedLocation::from(item));
        self.list.dismiss();
        self.debouncer.cancel();
        service.cancel(self.id);
        self.loading = false;

        log::debug!("Selected {} location '{}'", self.id, item.display_name);

        match self.id {
            FieldId::Pickup => FocusShift::NextField,
            FieldId::Dropoff => FocusShift::Stay,
        }
    }

    pub fn dismiss(&mut self) {
        self.list.dismiss();
    }

    /// Feed a dropdown event; a committed item becomes the selection
    pub fn apply_list_event(
        &mut self,
        event: ListEvent,
        service: &mut SearchService,
    ) -> Option<FocusShift> {
        let item = self.list.apply(event)?;
        Some(self.select_suggestion(&item, service))
    }

    /// Route a key press: dropdown navigation first, then text editing
    pub fn handle_key(&mut self, key: KeyEvent, service: &mut SearchService) -> FieldKeyOutcome {
        let list_event = match key.code {
            KeyCode::Down => Some(ListEvent::ArrowDown),
            KeyCode::Up => Some(ListEvent::ArrowUp),
            KeyCode::Enter => Some(ListEvent::Enter),
            KeyCode::Esc => Some(ListEvent::Escape),
            _ => None,
        };

        if let Some(event) = list_event {
            if !self.list.is_visible() {
                return FieldKeyOutcome::Ignored;
            }
            return match self.apply_list_event(event, service) {
                Some(shift) => FieldKeyOutcome::Selected(shift),
                None => FieldKeyOutcome::Handled,
            };
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab)
            || key.modifiers.contains(KeyModifiers::ALT)
        {
            return FieldKeyOutcome::Ignored;
        }

        if self.textarea.input(key) {
            self.text_changed(service);
        }
        FieldKeyOutcome::Handled
    }

    /// Fire the debounced lookup if typing has paused. Returns true if state changed.
    pub fn tick(&mut self, service: &mut SearchService) -> bool {
        self.tick_at(service, Instant::now())
    }

    pub fn tick_at(&mut self, service: &mut SearchService, now: Instant) -> bool {
        let Some(query) = self.debouncer.take_ready_at(now) else {
            return false;
        };

        match service.resolve(self.id, &query) {
            Resolution::Skipped => false,
            Resolution::Cached(results) => {
                self.on_results_ready(results);
                true
            }
            Resolution::Dispatched(request_id) => {
                log::debug!("{} lookup {} dispatched for '{}'", self.id, request_id, query);
                self.loading = true;
                true
            }
        }
    }

    /// Stop the debounce timer and abort this field's lookup
    pub fn teardown(&mut self, service: &mut SearchService) {
        self.debouncer.cancel();
        service.cancel(self.id);
        self.loading = false;
    }
}

fn single_line_textarea(id: FieldId, text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![text.to_string()]);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text(match id {
        FieldId::Pickup => "Add Pickup Location",
        FieldId::Dropoff => "Add Drop Location",
    });
    textarea.move_cursor(CursorMove::End);
    textarea
}

#[cfg(test)]
#[path = "field_controller_tests.rs"]
mod field_controller_tests;
