//! Suggestion dropdown state machine
//!
//! Two states: hidden, or visible with an optional active row. Independent of
//! terminal events so the same transitions back both the UI and tests.

use crate::geocoding::{MAX_RESULTS, SuggestionResult};

/// Input that can move the dropdown between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    ClickOutside,
    ClickItem(usize),
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    suggestions: Vec<SuggestionResult>,
    visible: bool,
    /// `None` means no row is highlighted
    active: Option<usize>,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with fresh results; visible only when non-empty.
    /// Anything past `MAX_RESULTS` is dropped.
    pub fn show_results(&mut self, mut results: Vec<SuggestionResult>) {
        results.truncate(MAX_RESULTS);
        self.visible = !results.is_empty();
        self.suggestions = results;
        self.active = None;
    }

    /// Re-show the last results without querying again. Returns true if it became visible.
    pub fn reveal(&mut self) -> bool {
        if !self.suggestions.is_empty() {
            self.visible = true;
        }
        self.visible
    }

    /// Hide and deselect, keeping results around for `reveal`
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.active = None;
    }

    /// Drop results entirely
    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.dismiss();
    }

    /// Apply one event.
    ///
    /// Returns the committed suggestion for `Enter` on an active row or a click
    /// on a listed item; the list is hidden in that case. Events are ignored
    /// while hidden.
    pub fn apply(&mut self, event: ListEvent) -> Option<SuggestionResult> {
        if !self.visible {
            return None;
        }

        match event {
            ListEvent::ArrowDown => {
                let last = self.suggestions.len() - 1;
                self.active = Some(self.active.map_or(0, |i| (i + 1).min(last)));
                None
            }
            ListEvent::ArrowUp => {
                self.active = Some(self.active.map_or(0, |i| i.saturating_sub(1)));
                None
            }
            ListEvent::Enter => {
                let index = self.active?;
                self.commit(index)
            }
            ListEvent::Escape | ListEvent::ClickOutside => {
                self.dismiss();
                None
            }
            ListEvent::ClickItem(index) => self.commit(index),
        }
    }

    fn commit(&mut self, index: usize) -> Option<SuggestionResult> {
        let selected = self.suggestions.get(index).cloned()?;
        self.dismiss();
        Some(selected)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn suggestions(&self) -> &[SuggestionResult] {
        &self.suggestions
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Active row as a signed index, -1 when nothing is highlighted
    pub fn active_index(&self) -> isize {
        self.active.map_or(-1, |i| i as isize)
    }

    pub fn active_suggestion(&self) -> Option<&SuggestionResult> {
        self.active.and_then(|i| self.suggestions.get(i))
    }
}

#[cfg(test)]
#[path = "suggestion_list_tests.rs"]
mod suggestion_list_tests;
