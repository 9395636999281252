// Configuration type definitions

use serde::Deserialize;

use crate::booking::VehicleType;
use crate::geocoding::SearchBounds;

/// Search pipeline section
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Idle time after the last keystroke before a lookup fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Lifetime of cached lookup results
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: default_debounce_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Geocoding service section
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub bounds: SearchBounds,
}

fn default_endpoint() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_country_code() -> String {
    "in".to_string()
}

fn default_limit() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("lorry/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        GeocodingConfig {
            endpoint: default_endpoint(),
            country_code: default_country_code(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            bounds: SearchBounds::default(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default = "VehicleType::catalogue")]
    pub vehicles: Vec<VehicleType>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search: SearchConfig::default(),
            geocoding: GeocodingConfig::default(),
            vehicles: VehicleType::catalogue(),
        }
    }
}
