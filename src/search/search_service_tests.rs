//! Tests for the search service
//!
//! Most tests wire the service to in-test channels (like a worker that never
//! answers on its own) so every response can be injected deterministically.

use super::*;
use crate::search::worker::LookupOutcome;
use crate::test_utils::test_helpers::{
    FakeSearch, mumbai_results, place, service_with, wait_for_lookups,
};
use std::sync::mpsc::{self, Sender};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

struct Harness {
    service: SearchService,
    requests: UnboundedReceiver<LookupRequest>,
    responses: Sender<LookupResponse>,
}

fn harness() -> Harness {
    harness_with_ttl(Duration::from_secs(300))
}

fn harness_with_ttl(ttl: Duration) -> Harness {
    let (request_tx, requests) = unbounded_channel();
    let (responses, response_rx) = mpsc::channel();
    let mut service = SearchService::new(ttl);
    service.set_channels(request_tx, response_rx);
    Harness {
        service,
        requests,
        responses,
    }
}

impl Harness {
    fn answer(&self, request: &LookupRequest, outcome: LookupOutcome) {
        self.responses
            .send(LookupResponse {
                field: request.field,
                request_id: request.request_id,
                outcome,
            })
            .unwrap();
    }
}

#[test]
fn test_short_query_is_skipped_without_request() {
    let mut h = harness();

    assert_eq!(h.service.resolve(FieldId::Pickup, "Mu"), Resolution::Skipped);
    assert_eq!(h.service.resolve(FieldId::Pickup, "   "), Resolution::Skipped);
    assert!(h.requests.try_recv().is_err());
    assert_eq!(h.service.in_flight_count(), 0);
}

#[test]
fn test_miss_dispatches_normalized_query() {
    let mut h = harness();

    let resolution = h.service.resolve(FieldId::Pickup, " Mum ");
    let request = h.requests.try_recv().unwrap();

    assert_eq!(resolution, Resolution::Dispatched(request.request_id));
    assert_eq!(request.query.as_str(), "mum");
    assert_eq!(request.field, FieldId::Pickup);
    assert!(h.service.is_in_flight(FieldId::Pickup));
}

#[test]
fn test_success_is_cached_and_delivered() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mum");
    let request = h.requests.try_recv().unwrap();

    h.answer(&request, LookupOutcome::Found(mumbai_results()));
    let resolved = h.service.poll();

    assert_eq!(
        resolved,
        vec![ResolvedLookup {
            field: FieldId::Pickup,
            results: mumbai_results(),
        }]
    );
    assert!(!h.service.is_in_flight(FieldId::Pickup));
    assert_eq!(h.service.cache().len(), 1);
}

#[test]
fn test_second_identical_query_hits_cache() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mum");
    let request = h.requests.try_recv().unwrap();
    h.answer(&request, LookupOutcome::Found(mumbai_results()));
    h.service.poll();

    let resolution = h.service.resolve(FieldId::Pickup, "MUM");

    assert_eq!(resolution, Resolution::Cached(mumbai_results()));
    assert!(h.requests.try_recv().is_err(), "no second network call");
}

#[test]
fn test_cache_is_shared_between_fields() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mum");
    let request = h.requests.try_recv().unwrap();
    h.answer(&request, LookupOutcome::Found(mumbai_results()));
    h.service.poll();

    assert_eq!(
        h.service.resolve(FieldId::Dropoff, "mum"),
        Resolution::Cached(mumbai_results())
    );
}

#[test]
fn test_new_lookup_cancels_previous_for_same_field() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Delhi");
    let first = h.requests.try_recv().unwrap();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let second = h.requests.try_recv().unwrap();

    assert!(first.cancel_token.is_cancelled());
    assert!(!second.cancel_token.is_cancelled());
    assert_eq!(h.service.in_flight_count(), 1);
}

#[test]
fn test_same_query_in_flight_is_not_sent_again() {
    let mut h = harness();
    let first = h.service.resolve(FieldId::Pickup, "Mumbai");
    let request = h.requests.try_recv().unwrap();

    let again = h.service.resolve(FieldId::Pickup, "Mumbai ");

    assert_eq!(again, first);
    assert_eq!(h.service.pending_query(FieldId::Pickup), Some(&request.query));
    assert!(!request.cancel_token.is_cancelled());
    assert!(h.requests.try_recv().is_err());

    h.answer(&request, LookupOutcome::Found(mumbai_results()));
    assert_eq!(h.service.poll().len(), 1);
}

#[test]
fn test_same_query_in_other_field_is_sent_separately() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let pickup = h.requests.try_recv().unwrap();
    h.service.resolve(FieldId::Dropoff, "Mumbai");
    let dropoff = h.requests.try_recv().unwrap();

    assert_ne!(pickup.request_id, dropoff.request_id);
    assert!(!pickup.cancel_token.is_cancelled());
}

#[test]
fn test_expired_entry_triggers_fresh_lookup() {
    let mut h = harness_with_ttl(Duration::from_millis(30));
    h.service.resolve(FieldId::Pickup, "Mum");
    let first = h.requests.try_recv().unwrap();
    h.answer(&first, LookupOutcome::Found(mumbai_results()));
    h.service.poll();

    assert_eq!(
        h.service.resolve(FieldId::Pickup, "Mum"),
        Resolution::Cached(mumbai_results())
    );

    std::thread::sleep(Duration::from_millis(60));

    let resolution = h.service.resolve(FieldId::Pickup, "Mum");
    let second = h.requests.try_recv().unwrap();
    assert_eq!(resolution, Resolution::Dispatched(second.request_id));
    assert_ne!(second.request_id, first.request_id);
    assert_eq!(second.query.as_str(), "mum");
}

#[test]
fn test_stale_response_is_discarded_and_not_cached() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Delhi");
    let first = h.requests.try_recv().unwrap();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let second = h.requests.try_recv().unwrap();

    // Older request answers late, after the newer one was issued
    h.answer(&first, LookupOutcome::Found(vec![place(9, "Delhi, India")]));
    assert!(h.service.poll().is_empty());
    assert!(h.service.cache().is_empty());

    h.answer(&second, LookupOutcome::Found(mumbai_results()));
    let resolved = h.service.poll();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].results, mumbai_results());
}

#[test]
fn test_stale_response_arriving_after_newer_is_ignored() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Delhi");
    let first = h.requests.try_recv().unwrap();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let second = h.requests.try_recv().unwrap();

    h.answer(&second, LookupOutcome::Found(mumbai_results()));
    h.answer(&first, LookupOutcome::Found(vec![place(9, "Delhi, India")]));

    let resolved = h.service.poll();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].results, mumbai_results());
}

#[test]
fn test_cache_hit_cancels_in_flight_lookup() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mum");
    let request = h.requests.try_recv().unwrap();
    h.answer(&request, LookupOutcome::Found(mumbai_results()));
    h.service.poll();

    h.service.resolve(FieldId::Pickup, "Delhi");
    let delhi = h.requests.try_recv().unwrap();
    h.service.resolve(FieldId::Pickup, "mum");

    assert!(delhi.cancel_token.is_cancelled());
    h.answer(&delhi, LookupOutcome::Found(vec![place(9, "Delhi, India")]));
    assert!(h.service.poll().is_empty());
}

#[test]
fn test_failure_yields_empty_results_and_is_not_cached() {
    let mut h = harness();
    h.service.resolve(FieldId::Dropoff, "Goa");
    let request = h.requests.try_recv().unwrap();

    h.answer(&request, LookupOutcome::Failed("HTTP 503".into()));
    let resolved = h.service.poll();

    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].results.is_empty());
    assert!(h.service.cache().is_empty());
    assert!(!h.service.is_in_flight(FieldId::Dropoff));
}

#[test]
fn test_cancelled_outcome_is_not_cached() {
    let mut h = harness();
    h.service.resolve(FieldId::Dropoff, "Goa");
    let request = h.requests.try_recv().unwrap();

    h.answer(&request, LookupOutcome::Cancelled);
    let resolved = h.service.poll();

    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].results.is_empty());
    assert!(h.service.cache().is_empty());
}

#[test]
fn test_explicit_cancel_drops_later_response() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let request = h.requests.try_recv().unwrap();

    assert!(h.service.cancel(FieldId::Pickup));
    assert!(request.cancel_token.is_cancelled());

    h.answer(&request, LookupOutcome::Found(mumbai_results()));
    assert!(h.service.poll().is_empty());
}

#[test]
fn test_without_worker_lookups_are_skipped() {
    let mut service = SearchService::new(Duration::from_secs(300));
    assert!(!service.has_worker());
    assert_eq!(service.resolve(FieldId::Pickup, "Mumbai"), Resolution::Skipped);
    assert_eq!(service.in_flight_count(), 0);
}

#[test]
fn test_disconnected_worker_releases_pending_fields() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let Harness {
        mut service,
        requests,
        responses,
    } = h;
    drop(responses);
    drop(requests);

    let resolved = service.poll();

    assert_eq!(
        resolved,
        vec![ResolvedLookup {
            field: FieldId::Pickup,
            results: Vec::new(),
        }]
    );
    assert!(!service.has_worker());
    assert_eq!(service.in_flight_count(), 0);
}

#[test]
fn test_teardown_cancels_everything() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    h.service.resolve(FieldId::Dropoff, "Pune");
    let a = h.requests.try_recv().unwrap();
    let b = h.requests.try_recv().unwrap();

    h.service.teardown();

    assert!(a.cancel_token.is_cancelled());
    assert!(b.cancel_token.is_cancelled());
    assert_eq!(h.service.in_flight_count(), 0);
    assert!(h.service.cache().is_empty());
    assert!(!h.service.has_worker());
}

#[test]
fn test_drop_cancels_in_flight() {
    let mut h = harness();
    h.service.resolve(FieldId::Pickup, "Mumbai");
    let request = h.requests.try_recv().unwrap();

    drop(h.service);

    assert!(request.cancel_token.is_cancelled());
}

#[test]
fn test_end_to_end_with_worker_thread() {
    let search = FakeSearch::new().with_results("mum", mumbai_results());
    let mut service = service_with(search.clone());

    assert!(matches!(
        service.resolve(FieldId::Pickup, "Mum"),
        Resolution::Dispatched(_)
    ));
    let resolved = wait_for_lookups(&mut service, 1, Duration::from_secs(2));
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].results, mumbai_results());

    assert_eq!(
        service.resolve(FieldId::Pickup, "mum"),
        Resolution::Cached(mumbai_results())
    );
    assert_eq!(search.calls(), vec!["mum"]);
}

#[test]
fn test_end_to_end_superseded_lookup_never_applies() {
    let search = FakeSearch::new()
        .with_delay(Duration::from_millis(100))
        .with_results("delhi", vec![place(9, "Delhi, India")])
        .with_results("mumbai", mumbai_results());
    let mut service = service_with(search);

    service.resolve(FieldId::Pickup, "Delhi");
    service.resolve(FieldId::Pickup, "Mumbai");

    let resolved = wait_for_lookups(&mut service, 1, Duration::from_secs(2));
    // Give the cancelled lookup time to report back too
    std::thread::sleep(Duration::from_millis(150));
    let late = service.poll();

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].results, mumbai_results());
    assert!(late.is_empty());
}
