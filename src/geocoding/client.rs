//! Async place-search client
//!
//! Issues one GET per lookup against a Nominatim-compatible `/search` endpoint,
//! restricted to a country code and bounding box. Uses reqwest for HTTP and
//! races every call against a `CancellationToken`.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::{GeocodeError, MAX_RESULTS, NormalizedQuery, SearchBounds, SuggestionResult};
use crate::config::GeocodingConfig;

/// Anything that can answer a place search.
///
/// Implemented by `GeocodingClient`; tests substitute in-memory fakes.
pub trait PlaceSearch: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a NormalizedQuery,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Vec<SuggestionResult>, GeocodeError>>;
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    endpoint: String,
    country_code: String,
    limit: usize,
    bounds: SearchBounds,
}

impl GeocodingClient {
    pub fn from_config(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let limit = clamp_limit(config.limit);
        if limit != config.limit {
            log::warn!(
                "Geocoding limit {} out of range, using {}",
                config.limit,
                limit
            );
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            country_code: config.country_code.clone(),
            limit,
            bounds: config.bounds,
        })
    }

    /// Query string parameters sent with every lookup
    pub fn request_params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("q", query.to_string()),
            ("limit", self.limit.to_string()),
            ("addressdetails", "1".to_string()),
            ("countrycodes", self.country_code.clone()),
            ("viewbox", self.bounds.viewbox()),
            ("bounded", "1".to_string()),
        ]
    }

    /// Run one lookup.
    ///
    /// # Returns
    /// * `Ok(results)` - possibly empty when the service found nothing or answered garbage
    /// * `Err(GeocodeError::Cancelled)` - the token fired before the response arrived
    /// * `Err(GeocodeError::*)` - transport or HTTP failure
    pub async fn lookup(
        &self,
        query: &NormalizedQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuggestionResult>, GeocodeError> {
        if cancel.is_cancelled() {
            return Err(GeocodeError::Cancelled);
        }

        let request = self
            .client
            .get(&self.endpoint)
            .query(&self.request_params(query.as_str()));

        let body = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                log::debug!("Lookup for '{}' cancelled in flight", query);
                return Err(GeocodeError::Cancelled);
            }

            body = fetch_body(request) => body?,
        };

        Ok(parse_places(&body, self.limit))
    }
}

impl PlaceSearch for GeocodingClient {
    fn search<'a>(
        &'a self,
        query: &'a NormalizedQuery,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Vec<SuggestionResult>, GeocodeError>> {
        Box::pin(self.lookup(query, cancel))
    }
}

async fn fetch_body(request: RequestBuilder) -> Result<String, GeocodeError> {
    let response = request
        .send()
        .await
        .map_err(|e| GeocodeError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(GeocodeError::Status(response.status().as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| GeocodeError::Body(e.to_string()))
}

/// Raw place as returned by the service; everything else in the payload is ignored
#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: u64,
    display_name: String,
    lat: Coordinate,
    lon: Coordinate,
}

/// Nominatim sends coordinates as strings; accept plain numbers too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Map a response body into at most `limit` suggestions.
///
/// Any body that is not an array of well-formed places counts as zero results.
pub fn parse_places(body: &str, limit: usize) -> Vec<SuggestionResult> {
    let limit = clamp_limit(limit);
    let raw: Vec<RawPlace> = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Malformed geocoding response ({} bytes): {}", body.len(), e);
            return Vec::new();
        }
    };

    let mut results: Vec<SuggestionResult> = Vec::with_capacity(raw.len().min(limit));
    for place in raw {
        let (Some(lat), Some(lon)) = (place.lat.value(), place.lon.value()) else {
            log::warn!(
                "Geocoding response has non-numeric coordinates for place {}",
                place.place_id
            );
            return Vec::new();
        };

        if results.iter().any(|r| r.id == place.place_id) {
            continue;
        }

        results.push(SuggestionResult::new(
            place.place_id,
            place.display_name,
            lat,
            lon,
        ));

        if results.len() == limit {
            break;
        }
    }

    results
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_RESULTS)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
