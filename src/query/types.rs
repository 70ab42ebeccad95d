use std::collections::BTreeSet;

/// A parsed query: deduplicated, sorted plus/minus word sets. This is the
/// canonical representation used by every scoring path (sequential and
/// parallel alike — the parallel scorer always deduplicates, since summing
/// the same word's contribution twice would double it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

/// The parallel-oriented query representation: plus/minus words in
/// first-seen order, duplicates intact. Used only by `match_document`'s
/// parallel path, where duplicates are harmless (the result is sorted and
/// deduplicated after the membership check, never summed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    pub plus_words: Vec<String>,
    pub minus_words: Vec<String>,
}
