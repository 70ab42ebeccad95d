//! An in-memory full-text search engine: inverted-index storage, TF-IDF
//! relevance scoring, plus/minus query terms, stop-word filtering, and
//! sharded concurrent accumulation for the parallel scoring path.
//!
//! `core` holds the public `SearchEngine` type, its configuration and
//! error types. `analysis` tokenizes and filters stop words. `query`
//! parses raw query strings into plus/minus word sets. `index` is the
//! inverted-index data model. `search` implements scoring and
//! document-query matching, sequential and parallel. `parallel` holds the
//! sharded accumulator and the batch query executor built on it.
//! `pagination` and `request_log` are small standalone collaborators, not
//! wired into `SearchEngine` itself — callers compose them around it as
//! needed.

pub mod analysis;
pub mod core;
pub mod index;
pub mod pagination;
pub mod parallel;
pub mod query;
pub mod request_log;
pub mod search;

pub use core::config::EngineConfig;
pub use core::engine::SearchEngine;
pub use core::error::{Error, ErrorKind, Result};
pub use core::types::{Document, DocumentId, DocumentStatus};
pub use search::scorer::ExecutionPolicy;
