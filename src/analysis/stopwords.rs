use std::collections::BTreeSet;

use crate::analysis::tokenizer::is_valid_word;
use crate::core::error::{Error, ErrorKind, Result};

/// Immutable stop-word set configured at engine construction. Every
/// ingested and queried word is checked against it.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    /// Builds the set from any iterable of strings. Empty strings are
    /// discarded silently; a stop word containing a control byte fails the
    /// whole construction.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::new(
                    ErrorKind::InvalidStopWords,
                    format!("stop word '{word}' contains a control byte"),
                ));
            }
            words.insert(word.to_string());
        }
        Ok(StopWordSet { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
