//! Per-field lookup debouncer
//!
//! Holds the most recent query until typing pauses for the configured delay.
//! Polled from the UI loop; each `schedule` replaces the armed query and
//! restarts the timer, so only the value present when typing stops survives.

use std::time::{Duration, Instant};

/// Default idle time before a lookup fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    /// Query captured at schedule time and when it was armed
    armed: Option<(String, Instant)>,
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed: None }
    }

    /// Arm the timer for `query`, dropping any previously armed query
    pub fn schedule(&mut self, query: impl Into<String>) {
        self.schedule_at(query, Instant::now());
    }

    pub fn schedule_at(&mut self, query: impl Into<String>, now: Instant) {
        self.armed = Some((query.into(), now));
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Returns the captured query once the delay has elapsed, disarming the timer
    pub fn take_ready(&mut self) -> Option<String> {
        self.take_ready_at(Instant::now())
    }

    pub fn take_ready_at(&mut self, now: Instant) -> Option<String> {
        match &self.armed {
            Some((_, armed_at)) if now.saturating_duration_since(*armed_at) >= self.delay => {
                self.armed.take().map(|(query, _)| query)
            }
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.armed.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
