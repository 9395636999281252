use thiserror::Error;

use crate::geocoding::GeocodeError;

#[derive(Debug, Error)]
pub enum LorryError {
    #[error("Geocoding lookup failed: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("Could not encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
