//! The booking form: two location fields, a vehicle picker and submit validation

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::field_controller::{FieldController, ResolvedLocation};
use super::vehicle::{VehicleSelector, VehicleType};
use crate::config::Config;
use crate::search::{FieldId, ResolvedLookup, SearchService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Pickup,
    Dropoff,
    Vehicles,
}

impl FormFocus {
    pub fn field(self) -> Option<FieldId> {
        match self {
            FormFocus::Pickup => Some(FieldId::Pickup),
            FormFocus::Dropoff => Some(FieldId::Dropoff),
            FormFocus::Vehicles => None,
        }
    }

    fn next(self) -> Self {
        match self {
            FormFocus::Pickup => FormFocus::Dropoff,
            FormFocus::Dropoff => FormFocus::Vehicles,
            FormFocus::Vehicles => FormFocus::Pickup,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormFocus::Pickup => FormFocus::Vehicles,
            FormFocus::Dropoff => FormFocus::Pickup,
            FormFocus::Vehicles => FormFocus::Dropoff,
        }
    }
}

impl From<FieldId> for FormFocus {
    fn from(id: FieldId) -> Self {
        match id {
            FieldId::Pickup => FormFocus::Pickup,
            FieldId::Dropoff => FormFocus::Dropoff,
        }
    }
}

/// Reasons a submit is refused, in the order they are checked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please select a truck type")]
    MissingVehicle,

    #[error("Please select a pickup location from the suggestions")]
    UnresolvedPickup,

    #[error("Please select a drop location from the suggestions")]
    UnresolvedDrop,
}

/// A validated booking, printed as JSON when the session ends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub pickup_location: ResolvedLocation,
    pub drop_location: ResolvedLocation,
    pub truck_type: VehicleType,
}

#[derive(Debug)]
pub struct BookingForm {
    pub pickup: FieldController,
    pub dropoff: FieldController,
    pub vehicles: VehicleSelector,
    focus: FormFocus,
}

impl BookingForm {
    pub fn new(config: &Config) -> Self {
        let debounce = Duration::from_millis(config.search.debounce_ms);
        Self {
            pickup: FieldController::new(FieldId::Pickup, debounce),
            dropoff: FieldController::new(FieldId::Dropoff, debounce),
            vehicles: VehicleSelector::new(config.vehicles.clone()),
            focus: FormFocus::Pickup,
        }
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn field(&self, id: FieldId) -> &FieldController {
        match id {
            FieldId::Pickup => &self.pickup,
            FieldId::Dropoff => &self.dropoff,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FieldController {
        match id {
            FieldId::Pickup => &mut self.pickup,
            FieldId::Dropoff => &mut self.dropoff,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FieldController> {
        let id = self.focus.field()?;
        Some(self.field_mut(id))
    }

    /// Move focus; the field losing it closes its dropdown, the one gaining it re-shows its last results
    pub fn set_focus(&mut self, focus: FormFocus) {
        if self.focus == focus {
            return;
        }

        if let Some(previous) = self.focus.field() {
            self.field_mut(previous).dismiss();
        }
        self.focus = focus;
        if let Some(current) = focus.field() {
            self.field_mut(current).on_focus();
        }
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    /// Fire any debounced lookups whose delay has passed
    pub fn tick(&mut self, service: &mut SearchService) -> bool {
        let pickup = self.pickup.tick(service);
        let dropoff = self.dropoff.tick(service);
        pickup || dropoff
    }

    /// Hand finished lookups to their fields.
    ///
    /// A field that lost focus while its lookup was in flight keeps the results
    /// hidden until it is focused again.
    pub fn apply_lookups(&mut self, lookups: Vec<ResolvedLookup>) -> bool {
        let changed = !lookups.is_empty();
        for lookup in lookups {
            let focused = self.focus.field() == Some(lookup.field);
            let field = self.field_mut(lookup.field);
            field.on_results_ready(lookup.results);
            if !focused {
                field.dismiss();
            }
        }
        changed
    }

    pub fn submit(&self) -> Result<BookingRequest, BookingError> {
        let truck_type = self
            .vehicles
            .selected()
            .ok_or(BookingError::MissingVehicle)?;
        let pickup_location = self
            .pickup
            .selected_location()
            .ok_or(BookingError::UnresolvedPickup)?;
        let drop_location = self
            .dropoff
            .selected_location()
            .ok_or(BookingError::UnresolvedDrop)?;

        Ok(BookingRequest {
            pickup_location: pickup_location.clone(),
            drop_location: drop_location.clone(),
            truck_type: truck_type.clone(),
        })
    }

    /// Stop both fields' timers and lookups
    pub fn teardown(&mut self, service: &mut SearchService) {
        self.pickup.teardown(service);
        self.dropoff.teardown(service);
    }
}

#[cfg(test)]
#[path = "booking_form_tests.rs"]
mod booking_form_tests;
