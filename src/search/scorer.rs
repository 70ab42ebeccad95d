use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::core::types::{Document, DocumentId, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::parallel::sharded_map::ShardedMap;
use crate::query::types::Query;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Sequential vs. parallel is an explicit parameter rather than overload
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPolicy {
    Sequential,
    Parallel,
}

/// idf(w) = ln(N / df(w)). Only ever called for a word present in the
/// index, so `df >= 1`; `N >= 1` follows from the word having at least one
/// document. Division by zero / log of zero are precluded by these
/// invariants, not guarded defensively at the call site.
pub fn inverse_document_frequency(doc_count: usize, document_frequency: usize) -> f64 {
    (doc_count as f64 / document_frequency as f64).ln()
}

/// Computes relevance for every document that has at least one plus-word
/// and passes `predicate`, minus documents containing any minus-word.
/// Unsorted — `find_top_documents` is the sorted, truncated wrapper.
pub fn find_all_documents<F>(
    index: &InvertedIndex,
    query: &Query,
    predicate: F,
    policy: ExecutionPolicy,
    shard_count: usize,
) -> Vec<Document>
where
    F: Fn(DocumentId, DocumentStatus, i64) -> bool + Sync,
{
    let doc_count = index.document_count();
    match policy {
        ExecutionPolicy::Sequential => find_all_sequential(index, query, predicate, doc_count),
        ExecutionPolicy::Parallel => {
            find_all_parallel(index, query, predicate, doc_count, shard_count)
        }
    }
}

fn find_all_sequential<F>(
    index: &InvertedIndex,
    query: &Query,
    predicate: F,
    doc_count: usize,
) -> Vec<Document>
where
    F: Fn(DocumentId, DocumentStatus, i64) -> bool,
{
    let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        let Some(postings) = index.posting_list(word) else {
            continue;
        };
        let idf = inverse_document_frequency(doc_count, postings.len());
        for (&id, &tf) in postings {
            let data = index.metadata_of(id).expect("live id has metadata");
            if predicate(id, data.status, data.rating) {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
    }
    for word in &query.minus_words {
        if let Some(postings) = index.posting_list(word) {
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
    }
    relevance
        .into_iter()
        .map(|(id, relevance)| Document {
            id,
            relevance,
            rating: index.metadata_of(id).expect("live id has metadata").rating,
        })
        .collect()
}

fn find_all_parallel<F>(
    index: &InvertedIndex,
    query: &Query,
    predicate: F,
    doc_count: usize,
    shard_count: usize,
) -> Vec<Document>
where
    F: Fn(DocumentId, DocumentStatus, i64) -> bool + Sync,
{
    let relevance: ShardedMap<f64> = ShardedMap::new(shard_count);

    query.plus_words.par_iter().for_each(|word| {
        let Some(postings) = index.posting_list(word) else {
            return;
        };
        let idf = inverse_document_frequency(doc_count, postings.len());
        for (&id, &tf) in postings {
            let data = index.metadata_of(id).expect("live id has metadata");
            if predicate(id, data.status, data.rating) {
                *relevance.access(id) += tf * idf;
            }
        }
    });

    for word in &query.minus_words {
        if let Some(postings) = index.posting_list(word) {
            for &id in postings.keys() {
                relevance.erase(id);
            }
        }
    }

    relevance
        .build_ordinary()
        .into_iter()
        .map(|(id, relevance)| Document {
            id,
            relevance,
            rating: index.metadata_of(id).expect("live id has metadata").rating,
        })
        .collect()
}

/// Sorts descending by relevance, breaking ties (|delta| < epsilon) by
/// higher rating, then truncates to `MAX_RESULT_DOCUMENT_COUNT`. Stability
/// beyond that tie-break is not required.
pub fn find_top_documents<F>(
    index: &InvertedIndex,
    query: &Query,
    predicate: F,
    policy: ExecutionPolicy,
    shard_count: usize,
) -> Vec<Document>
where
    F: Fn(DocumentId, DocumentStatus, i64) -> bool + Sync,
{
    let mut matched = find_all_documents(index, query, predicate, policy, shard_count);
    matched.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance.partial_cmp(&lhs.relevance).unwrap()
        }
    });
    matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
    matched
}
