//! Shared test utilities for lorry
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures::future::BoxFuture;
    use tokio_util::sync::CancellationToken;

    use crate::app::App;
    use crate::config::Config;
    use crate::geocoding::{GeocodeError, NormalizedQuery, PlaceSearch, SuggestionResult};
    use crate::search::{ResolvedLookup, SearchService};

    /// In-memory place search that records every query it receives
    #[derive(Clone, Default)]
    pub struct FakeSearch {
        calls: Arc<Mutex<Vec<String>>>,
        delay: Duration,
        responses: HashMap<String, Result<Vec<SuggestionResult>, String>>,
    }

    impl FakeSearch {
        pub fn new() -> Self {
            Self::default()
        }

        /// Hold every answer for `delay` (cancellable)
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn with_results(mut self, query: &str, results: Vec<SuggestionResult>) -> Self {
            self.responses.insert(query.to_string(), Ok(results));
            self
        }

        pub fn failing(mut self, query: &str, message: &str) -> Self {
            self.responses
                .insert(query.to_string(), Err(message.to_string()));
            self
        }

        /// Normalized queries seen so far, in call order
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PlaceSearch for FakeSearch {
        fn search<'a>(
            &'a self,
            query: &'a NormalizedQuery,
            cancel: &'a CancellationToken,
        ) -> BoxFuture<'a, Result<Vec<SuggestionResult>, GeocodeError>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(query.as_str().to_string());

                if !self.delay.is_zero() {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(GeocodeError::Cancelled),
                        _ = tokio::time::sleep(self.delay) => {}
                    }
                }

                match self.responses.get(query.as_str()) {
                    Some(Ok(results)) => Ok(results.clone()),
                    Some(Err(message)) => Err(GeocodeError::Network(message.clone())),
                    None => Ok(Vec::new()),
                }
            })
        }
    }

    pub fn place(id: u64, name: &str) -> SuggestionResult {
        SuggestionResult::new(id, name, 19.0 + id as f64 / 100.0, 72.8)
    }

    /// Two candidates for "mum"
    pub fn mumbai_results() -> Vec<SuggestionResult> {
        vec![
            place(1, "Mumbai, Maharashtra, India"),
            place(2, "Mumbra, Thane, Maharashtra, India"),
        ]
    }

    pub fn service_with(search: FakeSearch) -> SearchService {
        SearchService::with_worker(Arc::new(search), Duration::from_secs(300))
            .expect("worker thread should spawn")
    }

    /// Poll until `count` lookups have resolved or the timeout passes
    pub fn wait_for_lookups(
        service: &mut SearchService,
        count: usize,
        timeout: Duration,
    ) -> Vec<ResolvedLookup> {
        let deadline = Instant::now() + timeout;
        let mut resolved = Vec::new();
        while resolved.len() < count && Instant::now() < deadline {
            resolved.extend(service.poll());
            std::thread::sleep(Duration::from_millis(5));
        }
        resolved
    }

    /// Helper to create App with default config and a fake geocoder
    pub fn test_app(search: FakeSearch) -> App {
        App::new(&Config::default(), service_with(search))
    }

    /// Helper to create a KeyEvent without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Helper to create a KeyEvent with specific modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }
}
