//! Layout regions tracking for UI components
//!
//! Tracks where UI components are rendered for position-aware mouse interactions.

use ratatui::layout::Rect;

use crate::search::FieldId;

/// Identifies a UI component region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    // Base layout
    Field(FieldId),
    VehicleCard(usize),
    VehiclePanel,

    // Popups
    Suggestions(FieldId),
}

/// Tracks rendered areas of UI components
///
/// Updated during each render pass. Regions are `None` when the component is not visible.
#[derive(Default, Clone, Debug)]
pub struct LayoutRegions {
    // Base layout
    pub pickup_field: Option<Rect>,
    pub dropoff_field: Option<Rect>,
    pub vehicle_panel: Option<Rect>,
    /// Catalogue index and area of each card drawn
    pub vehicle_cards: Vec<(usize, Rect)>,

    // Popups (only populated when visible)
    pub suggestions: Option<(FieldId, Rect)>,
}

impl LayoutRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all regions before a new render pass
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, id: FieldId) -> Option<Rect> {
        match id {
            FieldId::Pickup => self.pickup_field,
            FieldId::Dropoff => self.dropoff_field,
        }
    }

    pub fn set_field(&mut self, id: FieldId, rect: Rect) {
        match id {
            FieldId::Pickup => self.pickup_field = Some(rect),
            FieldId::Dropoff => self.dropoff_field = Some(rect),
        }
    }
}
