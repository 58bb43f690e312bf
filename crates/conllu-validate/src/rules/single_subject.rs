//! A rule for the number of subjects of a predicate.

use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::bracketed;

/// The identifier for the single subject rule.
const ID: &str = "SingleSubject";

/// The largest number of subjects a predicate may have.
///
/// A clause acting as the nonverbal predicate of another clause without a
/// copula has two subjects: its own and that of the outer clause.
const MAX_SUBJECTS: usize = 2;

/// Detects predicates with too many subjects.
#[derive(Default, Debug, Clone, Copy)]
pub struct SingleSubjectRule;

impl Rule for SingleSubjectRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that no predicate has more than one subject."
    }

    fn explanation(&self) -> &'static str {
        "A predicate has at most one subject (any relation whose universal part contains \
         `subj`). Two subjects are tolerated because a clause without a copula that is the \
         predicate of another clause carries the subjects of both; three or more are an error."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &["too-many-subjects"]
    }
}

impl Visitor for SingleSubjectRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for i in tree.words() {
            let subjects: Vec<_> = tree
                .children(i)
                .iter()
                .copied()
                .filter(|c| tree.record(*c).universal_deprel().contains("subj"))
                .collect();

            if subjects.len() > MAX_SUBJECTS {
                state.add(
                    Diagnostic::syntax(format!(
                        "Node has more than one subject: {subjects}",
                        subjects = bracketed(&subjects)
                    ))
                    .with_rule("too-many-subjects")
                    .with_level(Level::Three)
                    .with_line(tree.node(i).line)
                    .with_node(i.to_string()),
                );
            }
        }
    }
}
