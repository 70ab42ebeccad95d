use std::collections::VecDeque;

use crate::core::engine::{DocumentPredicate, SearchEngine};
use crate::core::error::Result;
use crate::core::types::{Document, DocumentStatus};
use crate::search::scorer::ExecutionPolicy;

const MIN_IN_DAY: usize = 1440;

struct QueryResult {
    found_anything: bool,
}

/// Wraps `SearchEngine`'s query methods to track how often the last
/// `MIN_IN_DAY` queries returned nothing. Drops the oldest entry once the
/// log reaches capacity rather than growing unbounded (a "day" here is a
/// unit of request count, not wall-clock time — the caller decides what a
/// request is).
pub struct RequestLog<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<QueryResult>,
}

impl<'a> RequestLog<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestLog {
            engine,
            requests: VecDeque::new(),
        }
    }

    fn push(&mut self, found_anything: bool) {
        if self.requests.len() >= MIN_IN_DAY {
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult { found_anything });
    }

    pub fn find_top_documents_with<F>(&mut self, raw_query: &str, predicate: F) -> Result<Vec<Document>>
    where
        F: DocumentPredicate,
    {
        let result = self
            .engine
            .find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)?;
        self.push(!result.is_empty());
        Ok(result)
    }

    pub fn find_top_documents_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let result = self
            .engine
            .find_top_documents_status(ExecutionPolicy::Sequential, raw_query, status)?;
        self.push(!result.is_empty());
        Ok(result)
    }

    pub fn find_top_documents(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.engine.find_top_documents(raw_query)?;
        self.push(!result.is_empty());
        Ok(result)
    }

    pub fn empty_result_count(&self) -> usize {
        self.requests.iter().filter(|r| !r.found_anything).count()
    }
}
