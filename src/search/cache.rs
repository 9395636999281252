//! TTL-bounded cache of lookup results
//!
//! Keyed by normalized query. Every access sweeps the whole map first, which is
//! fine for the handful of queries one booking session produces.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::geocoding::{NormalizedQuery, SuggestionResult};

/// Default lifetime of a cached lookup
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Results of one lookup; never mutated after insertion
#[derive(Debug, Clone)]
struct CacheEntry {
    results: Vec<SuggestionResult>,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct SuggestionCache {
    ttl: Duration,
    entries: HashMap<NormalizedQuery, CacheEntry>,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SuggestionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, query: &NormalizedQuery) -> Option<Vec<SuggestionResult>> {
        self.get_at(query, Instant::now())
    }

    pub fn put(&mut self, query: NormalizedQuery, results: Vec<SuggestionResult>) {
        self.put_at(query, results, Instant::now());
    }

    /// Look up `query` as of `now`. Only entries younger than the TTL are hits.
    pub fn get_at(
        &mut self,
        query: &NormalizedQuery,
        now: Instant,
    ) -> Option<Vec<SuggestionResult>> {
        self.evict_expired(now);
        self.entries.get(query).map(|entry| entry.results.clone())
    }

    pub fn put_at(&mut self, query: NormalizedQuery, results: Vec<SuggestionResult>, now: Instant) {
        self.evict_expired(now);
        self.entries.insert(
            query,
            CacheEntry {
                results,
                fetched_at: now,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn evict_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.fetched_at) < ttl);

        let evicted = before - self.entries.len();
        if evicted > 0 {
            log::debug!("Evicted {} expired suggestion cache entries", evicted);
        }
    }
}
