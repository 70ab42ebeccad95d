use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::OnceLock;

use rayon::prelude::*;

use crate::analysis::stopwords::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{average_rating, DocumentData, DocumentId, DocumentStatus};

fn empty_frequencies() -> &'static BTreeMap<String, f64> {
    static EMPTY: OnceLock<BTreeMap<String, f64>> = OnceLock::new();
    EMPTY.get_or_init(BTreeMap::new)
}

/// The central data model: word -> (document_id -> tf), its inverse
/// document_id -> (word -> tf) for O(doc size) removal and duplicate
/// detection, per-document metadata, and the live id set.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<DocumentId, f64>>,
    forward: BTreeMap<DocumentId, BTreeMap<String, f64>>,
    metadata: BTreeMap<DocumentId, DocumentData>,
    live: BTreeSet<DocumentId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.metadata.len()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.live.contains(&id)
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.live.iter().copied()
    }

    pub fn metadata_of(&self, id: DocumentId) -> Option<&DocumentData> {
        self.metadata.get(&id)
    }

    pub fn posting_list(&self, word: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.postings.get(word)
    }

    pub fn word_frequencies(&self, id: DocumentId) -> &BTreeMap<String, f64> {
        self.forward.get(&id).unwrap_or_else(|| empty_frequencies())
    }

    /// Adds a document. Fails with `InvalidId` if `id` is negative or
    /// already live, `InvalidWord` if any token contains a control byte.
    /// Tokens are validated before any mutation is committed, so a failed
    /// call leaves the index untouched.
    pub fn add(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i64],
        stop_words: &StopWordSet,
    ) -> Result<()> {
        if id.value() < 0 || self.live.contains(&id) {
            return Err(Error::new(
                ErrorKind::InvalidId,
                format!("document id {id} is invalid"),
            ));
        }

        let mut words = Vec::new();
        for token in split_into_words(text) {
            if !is_valid_word(token) {
                return Err(Error::new(
                    ErrorKind::InvalidWord,
                    format!("word '{token}' is invalid"),
                ));
            }
            if !stop_words.contains(token) {
                words.push(token);
            }
        }

        if !words.is_empty() {
            let inv = 1.0 / words.len() as f64;
            let mut term_counts: BTreeMap<&str, f64> = BTreeMap::new();
            for word in &words {
                *term_counts.entry(word).or_insert(0.0) += inv;
            }
            let forward_entry = self.forward.entry(id).or_default();
            for (word, tf) in term_counts {
                *self
                    .postings
                    .entry(word.to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += tf;
                *forward_entry.entry(word.to_string()).or_insert(0.0) += tf;
            }
        }

        self.metadata.insert(
            id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        self.live.insert(id);
        Ok(())
    }

    /// Removes a document. No-op when `id` is unknown. Posting lists left
    /// empty by the removal are physically dropped: a word with no
    /// documents left has no reason to keep an entry.
    pub fn remove(&mut self, id: DocumentId) -> bool {
        if !self.live.remove(&id) {
            return false;
        }
        if let Some(words) = self.forward.remove(&id) {
            for word in words.into_keys() {
                if let Some(postings) = self.postings.get_mut(&word) {
                    postings.remove(&id);
                    if postings.is_empty() {
                        self.postings.remove(&word);
                    }
                }
            }
        }
        self.metadata.remove(&id);
        true
    }

    /// Parallel-oriented removal. Rust's `BTreeMap` gives no safe way to
    /// mutate caller-chosen disjoint keys from multiple threads at once, so
    /// instead of farming out `id`'s own (short) word list, this scans the
    /// whole postings map once via rayon's parallel `BTreeMap` iterator and
    /// drops `id` from every entry that's one of its words — genuine
    /// thread-level parallelism, safe, no unsafe code.
    pub fn remove_parallel(&mut self, id: DocumentId) -> bool {
        if !self.live.remove(&id) {
            return false;
        }
        if let Some(words) = self.forward.remove(&id) {
            let word_set: HashSet<&str> = words.keys().map(|s| s.as_str()).collect();
            self.postings.par_iter_mut().for_each(|(word, postings)| {
                if word_set.contains(word.as_str()) {
                    postings.remove(&id);
                }
            });
            self.postings.retain(|_, postings| !postings.is_empty());
        }
        self.metadata.remove(&id);
        true
    }
}
