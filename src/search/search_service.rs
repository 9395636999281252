//! Search service
//!
//! The single owner of the suggestion cache, the pending-request registry and
//! the worker channels. Field controllers borrow it to resolve queries; the
//! form tears it down explicitly when it goes away.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::FieldId;
use super::cache::SuggestionCache;
use super::coordinator::RequestCoordinator;
use super::worker::{LookupOutcome, LookupRequest, LookupResponse, spawn_worker};
use crate::geocoding::{NormalizedQuery, PlaceSearch, SuggestionResult};

/// What `resolve` did with a query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Too short, or no worker to ask
    Skipped,
    /// Served from cache without a network call
    Cached(Vec<SuggestionResult>),
    /// Sent to the worker under this request id
    Dispatched(u64),
}

/// Results ready to be applied to a field
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLookup {
    pub field: FieldId,
    pub results: Vec<SuggestionResult>,
}

#[derive(Debug)]
pub struct SearchService {
    cache: SuggestionCache,
    coordinator: RequestCoordinator,
    request_tx: Option<UnboundedSender<LookupRequest>>,
    response_rx: Option<Receiver<LookupResponse>>,
}

impl SearchService {
    /// Service without a worker; every uncached lookup is skipped until channels are set
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            cache: SuggestionCache::new(cache_ttl),
            coordinator: RequestCoordinator::new(),
            request_tx: None,
            response_rx: None,
        }
    }

    /// Service backed by a freshly spawned worker thread
    pub fn with_worker(search: Arc<dyn PlaceSearch>, cache_ttl: Duration) -> std::io::Result<Self> {
        let (request_tx, response_rx) = spawn_worker(search)?;
        let mut service = Self::new(cache_ttl);
        service.set_channels(request_tx, response_rx);
        Ok(service)
    }

    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<LookupRequest>,
        response_rx: Receiver<LookupResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Resolve `raw` for `field`.
    ///
    /// Short queries are skipped, cache hits return immediately, and misses
    /// cancel the field's previous lookup before dispatching a new one. A hit
    /// also cancels it so an older response cannot overwrite the cached list.
    /// A miss for the query the field already has in flight keeps that lookup.
    pub fn resolve(&mut self, field: FieldId, raw: &str) -> Resolution {
        let Some(query) = NormalizedQuery::new(raw) else {
            return Resolution::Skipped;
        };

        if let Some(results) = self.cache.get(&query) {
            log::debug!("Cache hit for {} '{}'", field, query);
            self.coordinator.cancel(field);
            return Resolution::Cached(results);
        }

        let in_flight = self
            .coordinator
            .pending(field)
            .filter(|pending| pending.query == query);
        if let Some(pending) = in_flight {
            log::debug!(
                "{} lookup {} already in flight for '{}'",
                field,
                pending.request_id,
                query
            );
            return Resolution::Dispatched(pending.request_id);
        }

        let Some(request_tx) = &self.request_tx else {
            log::warn!("No geocoder worker; skipping lookup for '{}'", query);
            return Resolution::Skipped;
        };

        let (request_id, cancel_token) = self.coordinator.begin(field, query.clone());
        let request = LookupRequest {
            field,
            request_id,
            query,
            cancel_token,
        };

        if request_tx.send(request).is_err() {
            log::warn!("Geocoder worker is gone; dropping lookup {}", request_id);
            self.coordinator.cancel(field);
            self.request_tx = None;
            return Resolution::Skipped;
        }

        Resolution::Dispatched(request_id)
    }

    /// Drain finished lookups and return the ones that should reach their field.
    ///
    /// Stale responses are dropped; successful ones are cached; failures and
    /// live cancellations become empty result lists.
    pub fn poll(&mut self) -> Vec<ResolvedLookup> {
        let mut responses = Vec::new();
        let mut disconnected = false;

        if let Some(rx) = &self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => responses.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let mut resolved: Vec<ResolvedLookup> = responses
            .into_iter()
            .filter_map(|response| self.complete(response))
            .collect();

        if disconnected {
            log::error!("Geocoder worker disconnected unexpectedly");
            self.response_rx = None;
            self.request_tx = None;
            for field in FieldId::ALL {
                if self.coordinator.cancel(field) {
                    resolved.push(ResolvedLookup {
                        field,
                        results: Vec::new(),
                    });
                }
            }
        }

        resolved
    }

    fn complete(&mut self, response: LookupResponse) -> Option<ResolvedLookup> {
        let Some(pending) = self.coordinator.finish(response.field, response.request_id) else {
            log::debug!(
                "Discarding stale {} response {}",
                response.field,
                response.request_id
            );
            return None;
        };

        let results = match response.outcome {
            LookupOutcome::Found(results) => {
                log::debug!(
                    "Lookup {} for '{}' returned {} results",
                    response.request_id,
                    pending.query,
                    results.len()
                );
                self.cache.put(pending.query, results.clone());
                results
            }
            LookupOutcome::Cancelled => {
                log::debug!("Lookup {} for '{}' cancelled", response.request_id, pending.query);
                Vec::new()
            }
            LookupOutcome::Failed(message) => {
                log::warn!("Lookup for '{}' failed: {}", pending.query, message);
                Vec::new()
            }
        };

        Some(ResolvedLookup {
            field: response.field,
            results,
        })
    }

    /// Abort the field's lookup; its eventual response will be discarded
    pub fn cancel(&mut self, field: FieldId) -> bool {
        self.coordinator.cancel(field)
    }

    /// Query the field is currently waiting on
    pub fn pending_query(&self, field: FieldId) -> Option<&NormalizedQuery> {
        self.coordinator.pending(field).map(|pending| &pending.query)
    }

    pub fn is_in_flight(&self, field: FieldId) -> bool {
        self.coordinator.pending(field).is_some()
    }

    pub fn in_flight_count(&self) -> usize {
        self.coordinator.in_flight_count()
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn has_worker(&self) -> bool {
        self.request_tx.is_some()
    }

    /// Abort every lookup, forget cached results and let the worker exit
    pub fn teardown(&mut self) {
        self.coordinator.cancel_all();
        self.cache.clear();
        self.request_tx = None;
        self.response_rx = None;
        log::debug!("Search service torn down");
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        self.coordinator.cancel_all();
    }
}

#[cfg(test)]
#[path = "search_service_tests.rs"]
mod search_service_tests;
