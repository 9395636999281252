//! Booking module
//!
//! The location fields with their autocomplete, the truck picker and submit validation.

mod booking_form;
mod booking_render;
mod field_controller;
mod vehicle;

pub use booking_form::{BookingError, BookingForm, BookingRequest, FormFocus};
pub use booking_render::{FIELD_HEIGHT, VEHICLE_PANEL_HEIGHT, render_field, render_vehicles};
pub use field_controller::{FieldController, FieldKeyOutcome, FocusShift, ResolvedLocation};
pub use vehicle::{VehicleSelector, VehicleType};
