//! Geocoding boundary
//!
//! Turns free-text place descriptions into coordinates via an external
//! place-search service. Everything behind this module is I/O; the rest of the
//! crate only sees `SuggestionResult` lists and `GeocodeError`.

mod client;
mod query;

pub use client::{GeocodingClient, PlaceSearch, parse_places};
pub use query::{MIN_QUERY_CHARS, NormalizedQuery};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most suggestions a single lookup may return
pub const MAX_RESULTS: usize = 5;

/// One geocoded candidate.
///
/// `id` is the service's place identifier and is unique within one response batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionResult {
    pub id: u64,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl SuggestionResult {
    pub fn new(id: u64, display_name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            lat,
            lon,
        }
    }
}

/// Geographic rectangle that restricts lookups to the service region.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SearchBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl SearchBounds {
    /// Render as the `viewbox` query parameter (`x1,y1,x2,y2`)
    pub fn viewbox(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            min_lon: 68.7,
            min_lat: 6.5,
            max_lon: 97.25,
            max_lat: 35.7,
        }
    }
}

/// Errors that can occur during a lookup
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeocodeError {
    /// The lookup was superseded and aborted
    #[error("Lookup cancelled")]
    Cancelled,

    /// The service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("Geocoding service returned HTTP {0}")]
    Status(u16),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl GeocodeError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GeocodeError::Cancelled)
    }
}
