use serde::{Deserialize, Serialize};
use std::fmt;

/// Document identifier. Signed to let callers pass a raw, possibly invalid,
/// id through the public API (`AddDocument` rejects negative ids itself
/// rather than the type system silently wrapping them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub i64);

impl DocumentId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        DocumentId(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Metadata stored per live document. Immutable once inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i64,
    pub status: DocumentStatus,
}

/// A scored search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i64,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id.0, self.relevance, self.rating
        )
    }
}

/// Integer-truncated arithmetic mean, truncation toward zero (matches
/// Rust's native integer division), 0 for an empty sequence.
pub fn average_rating(ratings: &[i64]) -> i64 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().sum();
    sum / ratings.len() as i64
}
