//! A rule for the `root` relation and attachment to the virtual root.

use conllu_grammar::Sentence;
use conllu_grammar::parse_deps;

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

/// The identifier for the root relation rule.
const ID: &str = "RootRelation";

/// The head of words attached to the virtual root.
const ROOT_HEAD: &str = "0";

/// The relation of words attached to the virtual root.
const ROOT_RELATION: &str = "root";

/// Detects a `root` relation without attachment to the virtual root and vice
/// versa.
#[derive(Default, Debug, Clone, Copy)]
pub struct RootRelationRule;

impl Rule for RootRelationRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that exactly the words attached to the virtual root use the `root` relation."
    }

    fn explanation(&self) -> &'static str {
        "A word whose HEAD is 0 must have the DEPREL `root`, and the `root` relation is only \
         used with HEAD 0. The same holds for every entry of the DEPS column of words and empty \
         nodes: an entry with head 0 has the relation `root` and no other head takes it."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format, Category::Syntax, Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "0-is-not-root",
            "root-is-not-0",
            "enhanced-0-is-not-root",
            "enhanced-root-is-not-0",
            INVALID_DEPS_ID,
        ]
    }
}

impl Visitor for RootRelationRule {
    fn sentence(&mut self, state: &mut Session, _: &Context<'_>, sentence: &Sentence) {
        for row in sentence.nodes() {
            let Some(record) = row.record() else {
                continue;
            };

            if row.id().is_word() {
                if record.head == ROOT_HEAD && record.deprel != ROOT_RELATION {
                    state.add(
                        Diagnostic::syntax("DEPREL must be 'root' if HEAD is 0.")
                            .with_rule("0-is-not-root")
                            .with_level(Level::Two)
                            .with_line(row.line()),
                    );
                }

                if record.head != ROOT_HEAD && record.deprel == ROOT_RELATION {
                    state.add(
                        Diagnostic::syntax("DEPREL cannot be 'root' if HEAD is not 0.")
                            .with_rule("root-is-not-0")
                            .with_level(Level::Two)
                            .with_line(row.line()),
                    );
                }
            }

            let deps = match parse_deps(record.deps) {
                Ok(deps) => deps,
                Err(_) => {
                    state.add(unparsable_deps(record.deps, row.line()));
                    continue;
                }
            };

            for dep in deps {
                if dep.head == ROOT_HEAD && dep.relation != ROOT_RELATION {
                    state.add(
                        Diagnostic::enhanced(
                            "Enhanced relation type must be 'root' if head is 0.",
                        )
                        .with_rule("enhanced-0-is-not-root")
                        .with_level(Level::Two)
                        .with_line(row.line()),
                    );
                }

                if dep.head != ROOT_HEAD && dep.relation == ROOT_RELATION {
                    state.add(
                        Diagnostic::enhanced(
                            "Enhanced relation type cannot be 'root' if head is not 0.",
                        )
                        .with_rule("enhanced-root-is-not-0")
                        .with_level(Level::Two)
                        .with_line(row.line()),
                    );
                }
            }
        }
    }
}
