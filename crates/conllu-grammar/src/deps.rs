//! Parsing of the enhanced dependency (`DEPS`) column and relation labels.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Matches a basic dependency relation (`universal[:subtype]`).
static BASIC_RELATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(r"^[a-z]+(:[a-z]+)?$").unwrap()
});

/// Matches an enhanced dependency relation.
///
/// Besides the universal part, up to three colon-separated parts may follow:
/// a subtype, a segment of Unicode letters and marks (typically a
/// preposition, with single underscores between words), and a case.
static ENHANCED_RELATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(
        r"^[a-z]+(:[a-z]+)?(:[\p{Ll}\p{Lm}\p{Lo}\p{M}]+(_[\p{Ll}\p{Lm}\p{Lo}\p{M}]+)*)?(:[a-z]+)?$",
    )
    .unwrap()
});

/// Determines if a label is a well-formed basic dependency relation.
pub fn is_basic_relation(label: &str) -> bool {
    BASIC_RELATION_REGEX.is_match(label)
}

/// Determines if a label is a well-formed enhanced dependency relation.
pub fn is_enhanced_relation(label: &str) -> bool {
    ENHANCED_RELATION_REGEX.is_match(label)
}

/// Gets the universal part of a relation label (the text before the first
/// colon).
pub fn universal_part(label: &str) -> &str {
    label.split_once(':').map_or(label, |(universal, _)| universal)
}

/// An error for a `DEPS` column that cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepsError {
    /// An entry has no `:` separating the head from the relation.
    #[error("malformed DEPS entry `{0}`")]
    MissingRelation(String),
}

/// A single `head:relation` entry of the `DEPS` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dep<'a> {
    /// The head reference, as written.
    pub head: &'a str,
    /// The relation label.
    pub relation: &'a str,
}

impl fmt::Display for Dep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{head}:{relation}", head = self.head, relation = self.relation)
    }
}

/// Parses the `DEPS` column.
///
/// `_` denotes an empty list. Otherwise entries are separated by `|` and each
/// entry is split at its first colon.
pub fn parse_deps(text: &str) -> Result<Vec<Dep<'_>>, DepsError> {
    if text == "_" {
        return Ok(Vec::new());
    }

    text.split('|')
        .map(|entry| {
            entry
                .split_once(':')
                .map(|(head, relation)| Dep { head, relation })
                .ok_or_else(|| DepsError::MissingRelation(entry.to_string()))
        })
        .collect()
}

/// A numeric head reference of the enhanced graph (`w` or `w.k`).
///
/// Heads order numerically by word and then by empty node index, with a
/// plain word preceding its empty nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnhancedHead {
    /// The word index.
    word: u32,
    /// The empty node index (zero for a word).
    empty: u32,
}

impl EnhancedHead {
    /// Parses a numeric head reference.
    ///
    /// This is more lenient than the head syntax required in a valid file; it
    /// only requires one or two dot-separated runs of ASCII digits.
    pub fn parse(text: &str) -> Option<Self> {
        /// Parses a non-empty run of ASCII digits.
        fn digits(text: &str) -> Option<u32> {
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }

            text.parse().ok()
        }

        match text.split_once('.') {
            Some((word, empty)) => Some(Self {
                word: digits(word)?,
                empty: digits(empty)?,
            }),
            None => Some(Self {
                word: digits(text)?,
                empty: 0,
            }),
        }
    }

    /// Gets the word index of the head.
    pub fn word(&self) -> u32 {
        self.word
    }

    /// Gets the empty node index of the head (zero for a word).
    pub fn empty(&self) -> u32 {
        self.empty
    }
}

impl fmt::Display for EnhancedHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty == 0 {
            write!(f, "{}", self.word)
        } else {
            write!(f, "{}.{}", self.word, self.empty)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_deps() {
        assert_eq!(parse_deps("_"), Ok(Vec::new()));
        assert_eq!(
            parse_deps("2:nsubj|4.1:obl:arg:na"),
            Ok(vec![
                Dep {
                    head: "2",
                    relation: "nsubj"
                },
                Dep {
                    head: "4.1",
                    relation: "obl:arg:na"
                },
            ])
        );
        assert_eq!(
            parse_deps("2:nsubj|3"),
            Err(DepsError::MissingRelation("3".to_string()))
        );
    }

    #[test]
    fn relation_grammar() {
        assert!(is_basic_relation("nsubj"));
        assert!(is_basic_relation("nsubj:pass"));
        assert!(!is_basic_relation("nsubj:pass:x"));
        assert!(!is_basic_relation("Nsubj"));

        assert!(is_enhanced_relation("obl:arg"));
        assert!(is_enhanced_relation("obl:při:loc"));
        assert!(is_enhanced_relation("obl:arg:v_souvislosti_s:gen"));
        assert!(is_enhanced_relation("nmod:في"));
        assert!(!is_enhanced_relation("obl:_na"));
        assert!(!is_enhanced_relation("obl:na__x"));
        assert!(!is_enhanced_relation("obl:a:b:c:d"));
        assert!(!is_enhanced_relation(""));
    }

    #[test]
    fn universal_parts() {
        assert_eq!(universal_part("nsubj:pass"), "nsubj");
        assert_eq!(universal_part("root"), "root");
    }

    #[test]
    fn orders_enhanced_heads() {
        let head = |s| EnhancedHead::parse(s).unwrap();
        assert!(head("1") < head("1.1"));
        assert!(head("1.2") < head("1.10"));
        assert!(head("1.10") < head("2"));
        assert_eq!(head("0").to_string(), "0");
        assert_eq!(head("3.1").to_string(), "3.1");
        assert_eq!(EnhancedHead::parse("x"), None);
        assert_eq!(EnhancedHead::parse("1."), None);
    }
}
