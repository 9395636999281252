//! Truck catalogue and the single-choice selector shown under the location fields

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VehicleType {
    pub name: String,
    pub capacity: String,
    pub price: String,
    /// Artwork file name; unused by the terminal UI but carried through to the booking
    #[serde(default)]
    pub image: String,
}

impl VehicleType {
    pub fn new(name: &str, capacity: &str, price: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            capacity: capacity.to_string(),
            price: price.to_string(),
            image: image.to_string(),
        }
    }

    /// Built-in catalogue used when the config has no `[[vehicles]]`
    pub fn catalogue() -> Vec<VehicleType> {
        vec![
            VehicleType::new("3 Wheeler", "500 kg", "Rs 250", "3wheeler.png"),
            VehicleType::new("Tata Ace", "750 kg", "Rs 350", "tata-ace.png"),
            VehicleType::new("Pickup 8ft", "1.25 Ton", "Rs 500", "pickup-8ft.png"),
            VehicleType::new("Bolero 1.7 Ton", "1.7 Ton", "Rs 700", "bolero.png"),
            VehicleType::new("Eicher 14ft", "4 Ton", "Rs 1200", "eicher-14ft.png"),
        ]
    }
}

/// Nothing is chosen until the user picks a card
#[derive(Debug, Clone, Default)]
pub struct VehicleSelector {
    options: Vec<VehicleType>,
    selected: Option<usize>,
}

impl VehicleSelector {
    pub fn new(options: Vec<VehicleType>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    pub fn options(&self) -> &[VehicleType] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&VehicleType> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Returns false for an index outside the catalogue
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.options.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Moves right, wrapping; the first press picks the first card
    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1) % self.options.len(),
        });
    }

    /// Moves left, wrapping; the first press picks the last card
    pub fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.selected = Some(match self.selected {
            None | Some(0) => last,
            Some(i) => i - 1,
        });
    }
}
