use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::analysis::stopwords::StopWordSet;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{Document, DocumentId, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::query::parser::parse_query;
use crate::search::match_document::{match_document_parallel, match_document_sequential};
use crate::search::scorer::{find_top_documents, ExecutionPolicy};

/// A document predicate: `(id, status, rating) -> keep?`.
pub trait DocumentPredicate: Fn(DocumentId, DocumentStatus, i64) -> bool + Sync {}
impl<F: Fn(DocumentId, DocumentStatus, i64) -> bool + Sync> DocumentPredicate for F {}

fn actual_status(_id: DocumentId, status: DocumentStatus, _rating: i64) -> bool {
    status == DocumentStatus::Actual
}

/// The in-memory full-text search engine. Single-writer, multi-reader:
/// concurrent calls to the `find_*`/`match_document`/`word_frequencies`
/// family are safe against each other, but never against `add_document`,
/// `remove_document`, or `remove_duplicates` — callers serialize writes
/// externally.
pub struct SearchEngine {
    index: InvertedIndex,
    stop_words: StopWordSet,
    config: EngineConfig,
}

impl SearchEngine {
    /// Builds an engine over `stop_words`. Fails `InvalidStopWords` if any
    /// stop word contains a control byte; empty strings are discarded
    /// silently.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(stop_words, EngineConfig::default())
    }

    pub fn with_config<I, S>(stop_words: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(SearchEngine {
            index: InvertedIndex::new(),
            stop_words: StopWordSet::new(stop_words)?,
            config,
        })
    }

    pub fn add_document(
        &mut self,
        id: i64,
        text: &str,
        status: DocumentStatus,
        ratings: &[i64],
    ) -> Result<()> {
        self.index
            .add(DocumentId(id), text, status, ratings, &self.stop_words)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn word_frequencies(&self, id: i64) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(DocumentId(id))
    }

    /// Ascending iteration over live document ids.
    pub fn iter_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.index.iter_ids().map(|id| id.value())
    }

    /// Full control: explicit policy and predicate.
    pub fn find_top_documents_with<F>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: F,
    ) -> Result<Vec<Document>>
    where
        F: DocumentPredicate,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        Ok(find_top_documents(
            &self.index,
            &query,
            predicate,
            policy,
            self.config.shard_count,
        ))
    }

    pub fn find_top_documents_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(policy, raw_query, move |_, doc_status, _| doc_status == status)
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, actual_status)
    }

    pub fn find_top_documents_par(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionPolicy::Parallel, raw_query, actual_status)
    }

    pub fn match_document(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: i64,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        match policy {
            ExecutionPolicy::Sequential => {
                match_document_sequential(&self.index, &self.stop_words, raw_query, DocumentId(id))
            }
            ExecutionPolicy::Parallel => {
                match_document_parallel(&self.index, &self.stop_words, raw_query, DocumentId(id))
            }
        }
    }

    /// Silent no-op when `id` is unknown.
    pub fn remove_document(&mut self, policy: ExecutionPolicy, id: i64) {
        match policy {
            ExecutionPolicy::Sequential => {
                self.index.remove(DocumentId(id));
            }
            ExecutionPolicy::Parallel => {
                self.index.remove_parallel(DocumentId(id));
            }
        }
    }

    /// Removes documents whose word set (ignoring frequencies) duplicates
    /// an earlier document's, visiting ids in ascending order so the
    /// smallest id in any duplicate group survives. `on_duplicate` is
    /// called once per removed id, in removal order.
    pub fn remove_duplicates(&mut self, mut on_duplicate: impl FnMut(i64)) {
        let mut seen: HashSet<BTreeSet<String>> = HashSet::new();
        let mut to_remove = Vec::new();

        for id in self.index.iter_ids() {
            let word_set: BTreeSet<String> = self.index.word_frequencies(id).keys().cloned().collect();
            if !seen.insert(word_set) {
                to_remove.push(id);
            }
        }

        for id in to_remove {
            self.index.remove(id);
            on_duplicate(id.value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_rejected() {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        let err = engine
            .add_document(-1, "a", DocumentStatus::Actual, &[])
            .unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidId);

        engine.add_document(1, "a", DocumentStatus::Actual, &[]).unwrap();
        let err = engine
            .add_document(1, "b", DocumentStatus::Actual, &[])
            .unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidId);
    }

    #[test]
    fn invalid_word_rejected_on_add_and_query() {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        let err = engine
            .add_document(4, "bad\u{1}word", DocumentStatus::Actual, &[])
            .unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidWord);

        engine.add_document(4, "good", DocumentStatus::Actual, &[]).unwrap();
        let err = engine.find_top_documents("bad\u{1}word").unwrap_err();
        assert_eq!(err.kind, crate::core::error::ErrorKind::InvalidWord);
    }

    #[test]
    fn remove_duplicates_keeps_smallest_id() {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        engine.add_document(1, "a b", DocumentStatus::Actual, &[1]).unwrap();
        engine.add_document(2, "a b", DocumentStatus::Actual, &[1]).unwrap();
        engine.add_document(3, "a", DocumentStatus::Actual, &[1]).unwrap();

        let mut notified = Vec::new();
        engine.remove_duplicates(|id| notified.push(id));

        assert_eq!(notified, vec![2]);
        let remaining: Vec<i64> = engine.iter_ids().collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[test]
    fn remove_document_is_silent_on_unknown_id() {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        engine.remove_document(ExecutionPolicy::Sequential, 42);
        assert_eq!(engine.document_count(), 0);
    }

    #[test]
    fn add_then_remove_restores_empty_index() {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        engine.add_document(0, "alpha beta", DocumentStatus::Actual, &[3]).unwrap();
        engine.remove_document(ExecutionPolicy::Sequential, 0);
        assert_eq!(engine.document_count(), 0);
        assert!(engine.word_frequencies(0).is_empty());
        assert!(engine.find_top_documents("alpha").unwrap().is_empty());
    }

    #[test]
    fn default_status_filter_is_actual() {
        let mut engine = SearchEngine::new(Vec::<String>::new()).unwrap();
        engine.add_document(0, "cat", DocumentStatus::Banned, &[1]).unwrap();
        assert!(engine.find_top_documents("cat").unwrap().is_empty());
        assert_eq!(
            engine
                .find_top_documents_status(ExecutionPolicy::Sequential, "cat", DocumentStatus::Banned)
                .unwrap()
                .len(),
            1
        );
    }
}
