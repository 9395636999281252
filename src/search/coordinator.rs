//! In-flight request registry
//!
//! At most one pending lookup per field. Starting a new lookup for a field
//! cancels the previous one, and only the live request may finish.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use super::FieldId;
use crate::geocoding::NormalizedQuery;

/// The live lookup for one field
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub query: NormalizedQuery,
    pub request_id: u64,
    pub cancel_token: CancellationToken,
}

#[derive(Debug, Default)]
pub struct RequestCoordinator {
    pending: HashMap<FieldId, PendingRequest>,
    next_request_id: u64,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new lookup for `field`, cancelling whatever it had in flight.
    ///
    /// Returns the request id and the token the worker must observe.
    pub fn begin(&mut self, field: FieldId, query: NormalizedQuery) -> (u64, CancellationToken) {
        self.cancel(field);

        self.next_request_id = self.next_request_id.wrapping_add(1);
        let request_id = self.next_request_id;
        let cancel_token = CancellationToken::new();

        self.pending.insert(
            field,
            PendingRequest {
                query,
                request_id,
                cancel_token: cancel_token.clone(),
            },
        );

        (request_id, cancel_token)
    }

    /// Complete `request_id` for `field`.
    ///
    /// Returns `None` when the id is not the field's live request, i.e. the
    /// response is stale and must be discarded.
    pub fn finish(&mut self, field: FieldId, request_id: u64) -> Option<PendingRequest> {
        match self.pending.get(&field) {
            Some(pending) if pending.request_id == request_id => self.pending.remove(&field),
            _ => None,
        }
    }

    /// Abort the field's in-flight lookup, if any. Returns true if one was cancelled.
    pub fn cancel(&mut self, field: FieldId) -> bool {
        match self.pending.remove(&field) {
            Some(previous) => {
                previous.cancel_token.cancel();
                log::debug!(
                    "Cancelled {} lookup {} for '{}'",
                    field,
                    previous.request_id,
                    previous.query
                );
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.cancel_token.cancel();
        }
    }

    pub fn pending(&self, field: FieldId) -> Option<&PendingRequest> {
        self.pending.get(&field)
    }

    pub fn in_flight_count(&self) -> usize {
        self.pending.len()
    }
}
