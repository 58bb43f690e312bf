//! A rule for multiword token ranges.

use conllu_grammar::Sentence;
use conllu_grammar::TokenId;

use super::REVERSED_WORD_INTERVAL_ID;
use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;

/// The identifier for the token ranges rule.
const ID: &str = "TokenRanges";

/// Creates a token range diagnostic.
fn token_range(rule: &'static str, message: String, line: usize) -> Diagnostic {
    Diagnostic::format(message)
        .with_rule(rule)
        .with_level(Level::One)
        .with_line(line)
}

/// Detects multiword token ranges that are empty, reversed or overlapping.
#[derive(Default, Debug, Clone, Copy)]
pub struct TokenRangesRule;

impl Rule for TokenRangesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that multiword token ranges span at least two words and do not overlap."
    }

    fn explanation(&self) -> &'static str {
        "A multiword token `b-e` covers the words `b` to `e`, so `b` must be less than `e`. \
         Every word belongs to at most one multiword token."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::One
    }

    fn emits(&self) -> &'static [&'static str] {
        &["overlapping-word-intervals", REVERSED_WORD_INTERVAL_ID]
    }
}

impl Visitor for TokenRangesRule {
    fn sentence(&mut self, state: &mut Session, _: &Context<'_>, sentence: &Sentence) {
        let mut seen: Vec<(u32, u32)> = Vec::new();
        for row in sentence.rows() {
            let TokenId::Range(begin, end) = row.id() else {
                continue;
            };

            if begin >= end {
                state.add(token_range(
                    REVERSED_WORD_INTERVAL_ID,
                    format!("Spurious token interval {begin}-{end}"),
                    row.line(),
                ));
                continue;
            }

            if seen.iter().any(|&(b, e)| b <= end && begin <= e) {
                state.add(token_range(
                    "overlapping-word-intervals",
                    format!("Range overlaps with others: {id}", id = row.id()),
                    row.line(),
                ));
            }

            seen.push((begin, end));
        }
    }
}
