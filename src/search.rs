//! Location search pipeline
//!
//! Keystroke -> debouncer -> service (cache, coordinator) -> worker -> service -> field.

mod cache;
mod coordinator;
mod debouncer;
mod search_service;
pub mod worker;

pub use cache::{DEFAULT_TTL, SuggestionCache};
pub use coordinator::{PendingRequest, RequestCoordinator};
pub use debouncer::{DEFAULT_DEBOUNCE, QueryDebouncer};
pub use search_service::{Resolution, ResolvedLookup, SearchService};

use std::fmt;

/// Which booking input a lookup belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Pickup,
    Dropoff,
}

impl FieldId {
    pub const ALL: [FieldId; 2] = [FieldId::Pickup, FieldId::Dropoff];
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Pickup => write!(f, "pickup"),
            FieldId::Dropoff => write!(f, "drop"),
        }
    }
}
