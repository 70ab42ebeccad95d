use crate::analysis::stopwords::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, ErrorKind, Result};
use crate::query::types::{Query, RawQuery};

struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
}

/// Validates and signs a single raw token. Shared by both parser variants.
fn parse_query_word(text: &str) -> Result<QueryWord<'_>> {
    if text.is_empty() {
        return Err(Error::new(ErrorKind::InvalidQuery, "query word is empty"));
    }
    let (word, is_minus) = if let Some(rest) = text.strip_prefix('-') {
        (rest, true)
    } else {
        (text, false)
    };
    if word.is_empty() || word.starts_with('-') {
        return Err(Error::new(
            ErrorKind::InvalidQuery,
            format!("query word '{text}' is invalid"),
        ));
    }
    if !is_valid_word(word) {
        return Err(Error::new(
            ErrorKind::InvalidWord,
            format!("query word '{word}' contains a control byte"),
        ));
    }
    Ok(QueryWord { word, is_minus })
}

/// Canonical query parse: deduplicated, sorted plus/minus sets. Stop words
/// are dropped entirely, plus and minus alike.
///
/// An empty raw query short-circuits to an empty `Query` rather than being
/// split into a single degenerate empty token.
pub fn parse_query(text: &str, stop_words: &StopWordSet) -> Result<Query> {
    let mut query = Query::default();
    if text.is_empty() {
        return Ok(query);
    }
    for token in split_into_words(text) {
        let query_word = parse_query_word(token)?;
        if stop_words.contains(query_word.word) {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.insert(query_word.word.to_string());
        } else {
            query.plus_words.insert(query_word.word.to_string());
        }
    }
    Ok(query)
}

/// Parallel-oriented query parse: same validation, but plus/minus words
/// keep duplicates and first-seen order instead of being deduplicated.
pub fn parse_query_raw(text: &str, stop_words: &StopWordSet) -> Result<RawQuery> {
    let mut query = RawQuery::default();
    if text.is_empty() {
        return Ok(query);
    }
    for token in split_into_words(text) {
        let query_word = parse_query_word(token)?;
        if stop_words.contains(query_word.word) {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.push(query_word.word.to_string());
        } else {
            query.plus_words.push(query_word.word.to_string());
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(words: &[&str]) -> StopWordSet {
        StopWordSet::new(words.iter().copied()).unwrap()
    }

    #[test]
    fn empty_query_has_no_words() {
        let query = parse_query("", &stops(&[])).unwrap();
        assert!(query.plus_words.is_empty());
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn minus_prefix_marks_minus_word() {
        let query = parse_query("cat -dog", &stops(&[])).unwrap();
        assert!(query.plus_words.contains("cat"));
        assert!(query.minus_words.contains("dog"));
    }

    #[test]
    fn bare_dash_is_invalid_query() {
        let err = parse_query("-", &stops(&[])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }

    #[test]
    fn double_dash_is_invalid_query() {
        let err = parse_query("--cat", &stops(&[])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }

    #[test]
    fn control_byte_in_word_is_invalid_word() {
        let err = parse_query("bad\u{1}word", &stops(&[])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidWord);
    }

    #[test]
    fn stop_words_are_dropped_from_both_signs() {
        let query = parse_query("-и кот и", &stops(&["и"])).unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert!(query.plus_words.contains("кот"));
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn duplicates_collapse_within_a_sign() {
        let query = parse_query("cat cat -dog -dog", &stops(&[])).unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert_eq!(query.minus_words.len(), 1);
    }

    #[test]
    fn raw_parse_preserves_duplicates_and_order() {
        let query = parse_query_raw("cat dog cat", &stops(&[])).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "dog", "cat"]);
    }
}
