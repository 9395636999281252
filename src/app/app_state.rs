use crate::booking::{BookingForm, BookingRequest};
use crate::config::Config;
use crate::layout::LayoutRegions;
use crate::notification::NotificationState;
use crate::search::SearchService;

pub struct App {
    pub form: BookingForm,
    pub search: SearchService,
    pub notification: NotificationState,
    pub layout_regions: LayoutRegions,
    pub should_quit: bool,
    pub booking: Option<BookingRequest>,
    pub needs_render: bool,
}

impl App {
    pub fn new(config: &Config, search: SearchService) -> Self {
        Self {
            form: BookingForm::new(config),
            search,
            notification: NotificationState::new(),
            layout_regions: LayoutRegions::new(),
            should_quit: false,
            booking: None,
            needs_render: true,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The submitted booking, once the form has been accepted
    pub fn booking(&self) -> Option<&BookingRequest> {
        self.booking.as_ref()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_render = true;
    }

    pub fn clear_dirty(&mut self) {
        self.needs_render = false;
    }

    pub fn should_render(&self) -> bool {
        self.needs_render
    }

    /// Apply finished lookups to their fields
    pub fn poll_lookups(&mut self) {
        let lookups = self.search.poll();
        if self.form.apply_lookups(lookups) {
            self.mark_dirty();
        }
    }

    /// Fire debounced lookups and expire stale notifications
    pub fn tick(&mut self) {
        if self.form.tick(&mut self.search) {
            self.mark_dirty();
        }
        if self.notification.clear_if_expired() {
            self.mark_dirty();
        }
    }

    /// Validate the form; on success the session ends with the booking as output
    pub fn submit(&mut self) {
        match self.form.submit() {
            Ok(booking) => {
                log::debug!(
                    "Booking accepted: {} -> {} ({})",
                    booking.pickup_location.display_name,
                    booking.drop_location.display_name,
                    booking.truck_type.name
                );
                self.booking = Some(booking);
                self.should_quit = true;
            }
            Err(err) => {
                log::debug!("Booking rejected: {}", err);
                self.notification.show_error(&err.to_string());
            }
        }
        self.mark_dirty();
    }

    /// Stop every timer and abort every lookup before the app goes away
    pub fn teardown(&mut self) {
        self.form.teardown(&mut self.search);
        self.search.teardown();
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
