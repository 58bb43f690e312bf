//! A rule for references from `HEAD` and `DEPS` to other nodes.

use std::collections::HashSet;
use std::sync::LazyLock;

use conllu_grammar::Sentence;
use conllu_grammar::parse_deps;
use regex::Regex;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::rules::INVALID_DEPS_ID;
use crate::rules::unparsable_deps;
use crate::util::quoted;

/// The identifier for the head references rule.
const ID: &str = "HeadReferences";

/// Matches a basic head: zero or a positive integer.
static BASIC_HEAD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(r"^(0|[1-9][0-9]*)$").unwrap()
});

/// Matches an enhanced head: a basic head, optionally followed by the index
/// of an empty node.
static ENHANCED_HEAD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(r"^(0|[1-9][0-9]*)(\.[1-9][0-9]*)?$").unwrap()
});

/// Places a head reference diagnostic on a row.
fn reference(diagnostic: Diagnostic, rule: &'static str, line: usize) -> Diagnostic {
    diagnostic
        .with_rule(rule)
        .with_level(Level::Two)
        .with_line(line)
}

/// Detects heads that are malformed or refer to nodes that do not exist.
#[derive(Default, Debug, Clone, Copy)]
pub struct HeadReferencesRule;

impl Rule for HeadReferencesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that HEAD and DEPS refer to nodes of the sentence."
    }

    fn explanation(&self) -> &'static str {
        "The HEAD of a word is 0 (the virtual root) or the ID of another node of the same \
         sentence. Each head of the DEPS column is 0, the ID of a word or the ID of an empty \
         node (`w.k`) of the same sentence."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format, Category::Syntax, Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "invalid-head",
            "unknown-head",
            INVALID_DEPS_ID,
            "invalid-ehead",
            "unknown-ehead",
        ]
    }
}

impl Visitor for HeadReferencesRule {
    fn sentence(&mut self, state: &mut Session, _: &Context<'_>, sentence: &Sentence) {
        let mut records = Vec::new();
        for row in sentence.nodes() {
            // Missing columns are reported while reading the rows
            let Some(record) = row.record() else {
                return;
            };

            records.push((row, record));
        }

        let ids: HashSet<_> = records.iter().map(|(_, record)| record.id).collect();
        let known = |head: &str| head == "0" || ids.contains(head);
        for (row, record) in &records {
            let line = row.line();
            if !row.id().is_empty_node() {
                if !BASIC_HEAD_REGEX.is_match(record.head) {
                    state.add(reference(
                        Diagnostic::format(format!(
                            "Invalid HEAD: {head}.",
                            head = quoted(record.head)
                        )),
                        "invalid-head",
                        line,
                    ));
                }

                if !known(record.head) {
                    state.add(reference(
                        Diagnostic::syntax(format!(
                            "Undefined HEAD (no such ID): {head}.",
                            head = quoted(record.head)
                        )),
                        "unknown-head",
                        line,
                    ));
                }
            }

            let Ok(deps) = parse_deps(record.deps) else {
                state.add(unparsable_deps(record.deps, line));
                continue;
            };

            for dep in deps {
                if !ENHANCED_HEAD_REGEX.is_match(dep.head) {
                    state.add(reference(
                        Diagnostic::format(format!(
                            "Invalid enhanced head reference: {head}.",
                            head = quoted(dep.head)
                        )),
                        "invalid-ehead",
                        line,
                    ));
                }

                if !known(dep.head) {
                    state.add(reference(
                        Diagnostic::enhanced(format!(
                            "Undefined enhanced head reference (no such ID): {head}.",
                            head = quoted(dep.head)
                        )),
                        "unknown-ehead",
                        line,
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::testing::ids;
    use crate::rules::testing::run;
    use crate::rules::testing::sentence;

    #[test]
    fn regexes_compile() {
        assert!(BASIC_HEAD_REGEX.is_match("10"));
        assert!(!BASIC_HEAD_REGEX.is_match("01"));
        assert!(ENHANCED_HEAD_REGEX.is_match("2.1"));
        assert!(!ENHANCED_HEAD_REGEX.is_match("2.0"));
    }

    #[test]
    fn references_to_words_and_empty_nodes_pass() {
        let input = sentence(
            &[],
            &[
                "1 run run VERB _ _ 0 root 0:root _",
                "1.1 go go VERB _ _ _ _ 1:conj _",
                "2 fast fast ADV _ _ 1 advmod 1:advmod|1.1:advmod _",
            ],
        );
        assert!(run(HeadReferencesRule, &input).is_empty());
    }

    #[test]
    fn reports_malformed_and_unknown_heads() {
        let input = sentence(
            &[],
            &[
                "1 run run VERB _ _ 0 root 0:root _",
                "2 fast fast ADV _ _ 01 advmod 1:advmod _",
                "3 now now ADV _ _ 7 advmod 3.0:advmod|5:advmod _",
            ],
        );
        let diagnostics = run(HeadReferencesRule, &input);
        assert_eq!(
            ids(&diagnostics),
            [
                "invalid-head",
                "unknown-head",
                "unknown-head",
                "invalid-ehead",
                "unknown-ehead",
                "unknown-ehead",
            ]
        );
        assert_eq!(
            diagnostics[2].to_string(),
            "[Line 3]: [L2 Syntax unknown-head] Undefined HEAD (no such ID): '7'."
        );
        assert_eq!(
            diagnostics[5].message(),
            "Undefined enhanced head reference (no such ID): '5'."
        );
    }

    #[test]
    fn unparsable_deps_are_reported() {
        let input = sentence(&[], &["1 run run VERB _ _ 0 root root _"]);
        assert_eq!(ids(&run(HeadReferencesRule, &input)), ["invalid-deps"]);
    }
}
