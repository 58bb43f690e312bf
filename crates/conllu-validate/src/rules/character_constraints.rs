//! A rule for the characters allowed in tag and relation columns.

use std::sync::LazyLock;

use conllu_grammar::TokenId;
use conllu_grammar::TokenRow;
use conllu_grammar::is_basic_relation;
use conllu_grammar::is_enhanced_relation;
use conllu_grammar::parse_deps;
use regex::Regex;

use super::INVALID_DEPS_ID;
use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the character constraints rule.
const ID: &str = "CharacterConstraints";

/// Matches a well-formed universal part-of-speech tag.
static UPOS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(r"^[A-Z]+$").unwrap()
});

/// Detects tags and relation labels made of the wrong characters.
#[derive(Default, Debug, Clone, Copy)]
pub struct CharacterConstraintsRule;

impl Rule for CharacterConstraintsRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that UPOS, DEPREL and DEPS use only the characters their grammar allows."
    }

    fn explanation(&self) -> &'static str {
        "A UPOS tag is a run of upper case ASCII letters. A DEPREL is a lower case universal \
         relation optionally followed by a colon and a lower case subtype. Empty nodes have \
         neither, so they may use `_` in both columns. DEPS is a `|`-separated list of \
         `head:relation` pairs whose relations may additionally carry a case marker and a \
         segment of Unicode letters such as `obl:arg:в`."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Morpho, Category::Syntax, Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &["invalid-upos", "invalid-deprel", INVALID_DEPS_ID, "invalid-edeprel"]
    }
}

impl Visitor for CharacterConstraintsRule {
    fn row(&mut self, state: &mut Session, _: &Context<'_>, row: &TokenRow) {
        if !matches!(row.id(), TokenId::Word(_) | TokenId::Empty(..)) {
            return;
        }

        let Some(record) = row.record() else {
            return;
        };

        let empty_node = row.id().is_empty_node();
        let line = row.line();
        if !(UPOS_REGEX.is_match(record.upos) || empty_node && record.upos == "_") {
            state.add(
                Diagnostic::morpho(format!(
                    "Invalid UPOS value {upos}.",
                    upos = quoted(record.upos)
                ))
                .with_rule("invalid-upos")
                .with_level(Level::Two)
                .with_line(line),
            );
        }

        if !(is_basic_relation(record.deprel) || empty_node && record.deprel == "_") {
            state.add(
                Diagnostic::syntax(format!(
                    "Invalid DEPREL value {deprel}.",
                    deprel = quoted(record.deprel)
                ))
                .with_rule("invalid-deprel")
                .with_level(Level::Two)
                .with_line(line),
            );
        }

        let Ok(deps) = parse_deps(record.deps) else {
            state.add(
                Diagnostic::enhanced(format!(
                    "Failed to parse DEPS: {deps}.",
                    deps = quoted(record.deps)
                ))
                .with_rule(INVALID_DEPS_ID)
                .with_level(Level::Two)
                .with_line(line),
            );
            return;
        };

        if deps.iter().any(|dep| !is_enhanced_relation(dep.relation)) {
            state.add(
                Diagnostic::enhanced(format!(
                    "Invalid enhanced relation type: {deps}.",
                    deps = quoted(record.deps)
                ))
                .with_rule("invalid-edeprel")
                .with_level(Level::Two)
                .with_line(line),
            );
        }
    }
}
