use std::fmt;

/// Queries shorter than this are never dispatched or cached
pub const MIN_QUERY_CHARS: usize = 3;

/// Trimmed, lowercased search text used as the cache key.
///
/// Only constructible from input that is at least `MIN_QUERY_CHARS` long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
