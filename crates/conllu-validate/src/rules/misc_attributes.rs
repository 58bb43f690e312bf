//! A rule for `MISC` attributes that may occur only once.

use std::collections::BTreeSet;
use std::collections::HashSet;

use conllu_grammar::Sentence;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the `MISC` attributes rule.
const ID: &str = "MiscAttributes";

/// The documented attributes that a node carries at most once.
const UNIQUE_ATTRIBUTES: [&str; 6] = [
    "SpaceAfter",
    "Translit",
    "LTranslit",
    "Gloss",
    "LId",
    "LDeriv",
];

/// Detects documented `MISC` attributes that occur more than once on a node.
#[derive(Default, Debug, Clone, Copy)]
pub struct MiscAttributesRule;

impl Rule for MiscAttributesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that documented MISC attributes occur at most once per node."
    }

    fn explanation(&self) -> &'static str {
        "The MISC column may contain almost anything; a vertical bar separates attributes, \
         which are usually `name=value` pairs. The same attribute may in general appear several \
         times, but the attributes described in the UD documentation (SpaceAfter, Translit, \
         LTranslit, Gloss, LId and LDeriv) occur at most once on a word or empty node."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &["repeated-misc"]
    }
}

impl Visitor for MiscAttributesRule {
    fn sentence(&mut self, state: &mut Session, _: &Context<'_>, sentence: &Sentence) {
        for row in sentence.nodes() {
            let Some(record) = row.record() else {
                continue;
            };

            let mut seen = HashSet::new();
            let mut repeated = BTreeSet::new();
            for attribute in record.misc_attributes() {
                let name = attribute
                    .split_once('=')
                    .map_or(attribute, |(name, _)| name);
                if UNIQUE_ATTRIBUTES.contains(&name) && !seen.insert(name) {
                    repeated.insert(name);
                }
            }

            for name in repeated {
                state.add(
                    Diagnostic::format(format!(
                        "MISC attribute {name} not supposed to occur twice",
                        name = quoted(name)
                    ))
                    .with_rule("repeated-misc")
                    .with_level(Level::Two)
                    .with_line(row.line()),
                );
            }
        }
    }
}
