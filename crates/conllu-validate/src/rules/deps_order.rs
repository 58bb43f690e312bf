//! A rule for the order of `DEPS` entries.

use conllu_grammar::EnhancedHead;
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
use crate::util::quoted;

/// The identifier for the `DEPS` order rule.
const ID: &str = "DepsOrder";

/// Creates a `DEPS` format diagnostic.
fn deps_format(rule: &'static str, message: String, line: usize) -> Diagnostic {
    Diagnostic::format(message)
        .with_rule(rule)
        .with_level(Level::Two)
        .with_line(line)
}

/// Detects unsorted and repeated `DEPS` entries and self-loops.
#[derive(Default, Debug, Clone, Copy)]
pub struct DepsOrderRule;

impl Rule for DepsOrderRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that DEPS entries are sorted, unique and do not point to their own node."
    }

    fn explanation(&self) -> &'static str {
        "The entries of the DEPS column are sorted numerically by head, an empty node `w.k` \
         following the word `w`. Entries with the same head are sorted by relation and a \
         relation appears at most once per head. A node cannot be its own enhanced head.\n\n\
         A DEPS column that cannot be parsed stops the check for the rest of the sentence."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format, Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            INVALID_DEPS_ID,
            "unsorted-deps",
            "unsorted-deps-2",
            "repeated-deps",
            "deps-self-loop",
        ]
    }
}

impl Visitor for DepsOrderRule {
    fn sentence(&mut self, state: &mut Session, _: &Context<'_>, sentence: &Sentence) {
        for row in sentence.nodes() {
            let Some(record) = row.record() else {
                continue;
            };

            let line = row.line();
            let parsed = parse_deps(record.deps).ok().and_then(|deps| {
                let heads = deps
                    .iter()
                    .map(|dep| EnhancedHead::parse(dep.head))
                    .collect::<Option<Vec<_>>>()?;
                Some((deps, heads))
            });

            let Some((deps, heads)) = parsed else {
                state.add(unparsable_deps(record.deps, line));
                return;
            };

            if !heads.is_sorted() {
                state.add(deps_format(
                    "unsorted-deps",
                    format!(
                        "DEPS not sorted by head index: {deps}",
                        deps = quoted(record.deps)
                    ),
                    line,
                ));
            } else {
                for (previous, dep) in deps.iter().zip(deps.iter().skip(1)) {
                    if dep.head != previous.head {
                        continue;
                    }

                    if dep.relation < previous.relation {
                        state.add(deps_format(
                            "unsorted-deps-2",
                            format!(
                                "DEPS pointing to head {head} not sorted by relation type: {deps}",
                                head = quoted(dep.head),
                                deps = quoted(record.deps)
                            ),
                            line,
                        ));
                    } else if dep.relation == previous.relation {
                        state.add(deps_format(
                            "repeated-deps",
                            format!("DEPS contain multiple instances of the same relation '{dep}'"),
                            line,
                        ));
                    }
                }
            }

            let Some(id) = EnhancedHead::parse(record.id) else {
                return;
            };

            if heads.contains(&id) {
                state.add(
                    Diagnostic::enhanced(format!(
                        "Self-loop in DEPS for {id}",
                        id = quoted(record.id)
                    ))
                    .with_rule("deps-self-loop")
                    .with_level(Level::Two)
                    .with_line(line),
                );
            }
        }
    }
}
