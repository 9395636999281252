//! Geocoding worker thread
//!
//! Runs lookups on a background thread so the UI loop never blocks on the
//! network. Requests arrive over a tokio channel; each one runs as its own task
//! racing the place search against its cancellation token. Results go back over
//! a std channel that the UI drains with `try_recv`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use futures::FutureExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use super::FieldId;
use crate::geocoding::{NormalizedQuery, PlaceSearch, SuggestionResult};

/// A lookup handed to the worker
#[derive(Debug)]
pub struct LookupRequest {
    pub field: FieldId,
    pub request_id: u64,
    pub query: NormalizedQuery,
    pub cancel_token: CancellationToken,
}

/// How a lookup ended
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Vec<SuggestionResult>),
    /// Superseded or torn down; never cached
    Cancelled,
    /// Transport or service failure, already rendered as a message
    Failed(String),
}

#[derive(Debug)]
pub struct LookupResponse {
    pub field: FieldId,
    pub request_id: u64,
    pub outcome: LookupOutcome,
}

/// Spawn the worker thread.
///
/// The thread exits once the returned sender (and every clone of it) is dropped.
pub fn spawn_worker(
    search: Arc<dyn PlaceSearch>,
) -> std::io::Result<(UnboundedSender<LookupRequest>, Receiver<LookupResponse>)> {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();

    std::thread::Builder::new()
        .name("lorry-geocoder".to_string())
        .spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        log::error!("Failed to create geocoder runtime: {}", e);
                        return;
                    }
                };

                rt.block_on(worker_loop(search, request_rx, response_tx));
            }));

            if let Err(e) = result {
                log::error!("Geocoder worker panicked: {}", panic_message(e.as_ref()));
            }
        })?;

    Ok((request_tx, response_rx))
}

/// Process requests until the request channel closes.
///
/// Dropping the runtime afterwards aborts any lookup still running.
pub(crate) async fn worker_loop(
    search: Arc<dyn PlaceSearch>,
    mut request_rx: UnboundedReceiver<LookupRequest>,
    response_tx: Sender<LookupResponse>,
) {
    while let Some(request) = request_rx.recv().await {
        let search = Arc::clone(&search);
        let response_tx = response_tx.clone();
        let (field, request_id) = (request.field, request.request_id);
        tokio::spawn(async move {
            let lookup = AssertUnwindSafe(handle_lookup(search.as_ref(), request, &response_tx));
            if let Err(e) = lookup.catch_unwind().await {
                let message = panic_message(e.as_ref());
                log::error!("Lookup {} panicked: {}", request_id, message);
                let _ = response_tx.send(LookupResponse {
                    field,
                    request_id,
                    outcome: LookupOutcome::Failed(format!("lookup panicked: {}", message)),
                });
            }
        });
    }
    log::debug!("Geocoder request channel closed, worker exiting");
}

pub(crate) async fn handle_lookup(
    search: &dyn PlaceSearch,
    request: LookupRequest,
    response_tx: &Sender<LookupResponse>,
) {
    let LookupRequest {
        field,
        request_id,
        query,
        cancel_token,
    } = request;

    log::debug!("Lookup {} for {} '{}' started", request_id, field, query);

    let outcome = tokio::select! {
        biased;

        _ = cancel_token.cancelled() => LookupOutcome::Cancelled,

        result = search.search(&query, &cancel_token) => match result {
            Ok(results) => LookupOutcome::Found(results),
            Err(e) if e.is_cancelled() => LookupOutcome::Cancelled,
            Err(e) => LookupOutcome::Failed(e.to_string()),
        },
    };

    // Main thread may already be gone during shutdown
    let _ = response_tx.send(LookupResponse {
        field,
        request_id,
        outcome,
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
