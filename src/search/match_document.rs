use rayon::prelude::*;

use crate::analysis::stopwords::StopWordSet;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocumentId, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::query::parser::{parse_query, parse_query_raw};

fn not_found(id: DocumentId) -> Error {
    Error::new(ErrorKind::NotFound, format!("document {id} not found"))
}

/// Returns the plus-words of `raw_query` present in `id`'s document, plus
/// its status. The matched list is empty whenever any minus-word of the
/// query is present instead. Fails `NotFound` for an unknown id.
pub fn match_document_sequential(
    index: &InvertedIndex,
    stop_words: &StopWordSet,
    raw_query: &str,
    id: DocumentId,
) -> Result<(Vec<String>, DocumentStatus)> {
    let data = index.metadata_of(id).ok_or_else(|| not_found(id))?;
    let query = parse_query(raw_query, stop_words)?;
    let freqs = index.word_frequencies(id);

    if query.minus_words.iter().any(|w| freqs.contains_key(w)) {
        return Ok((Vec::new(), data.status));
    }
    let matched = query
        .plus_words
        .iter()
        .filter(|w| freqs.contains_key(w.as_str()))
        .cloned()
        .collect();
    Ok((matched, data.status))
}

/// Parallel-oriented variant: parses the query without deduplicating
/// (tolerable here since duplicates are only ever membership-tested, never
/// summed) and collapses the matched list with sort+dedup before
/// returning.
pub fn match_document_parallel(
    index: &InvertedIndex,
    stop_words: &StopWordSet,
    raw_query: &str,
    id: DocumentId,
) -> Result<(Vec<String>, DocumentStatus)> {
    let data = index.metadata_of(id).ok_or_else(|| not_found(id))?;
    let query = parse_query_raw(raw_query, stop_words)?;
    let freqs = index.word_frequencies(id);

    if query.minus_words.par_iter().any(|w| freqs.contains_key(w)) {
        return Ok((Vec::new(), data.status));
    }
    let mut matched: Vec<String> = query
        .plus_words
        .par_iter()
        .filter(|w| freqs.contains_key(w.as_str()))
        .cloned()
        .collect();
    matched.sort();
    matched.dedup();
    Ok((matched, data.status))
}
