//! A rule for the parents of `orphan` dependents.

use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the orphan parent rule.
const ID: &str = "OrphanParent";

/// The relations of clauses in which gapping may leave an orphan.
const ORPHAN_PARENT_RELATIONS: &[&str] = &[
    "conj",
    "parataxis",
    "root",
    "csubj",
    "ccomp",
    "advcl",
    "acl",
    "reparandum",
];

/// Detects `orphan` dependents of words that do not head a clause.
#[derive(Default, Debug, Clone, Copy)]
pub struct OrphanParentRule;

impl Rule for OrphanParentRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that `orphan` dependents are attached to the promoted head of a clause."
    }

    fn explanation(&self) -> &'static str {
        "In gapping, one dependent of the elided predicate is promoted to its place and the \
         others are attached to it as `orphan`. The promoted word heads a clause, typically a \
         conjunct, so its own relation is one of `conj`, `parataxis`, `root`, `csubj`, `ccomp`, \
         `advcl`, `acl` or `reparandum`. A frequent error is to attach the promoted word as \
         `orphan` too."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &["orphan-parent"]
    }
}

impl Visitor for OrphanParentRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for i in tree.words() {
            let node = tree.node(i);
            if node.record.universal_deprel() != "orphan" {
                continue;
            }

            let parent = tree.record(node.head).universal_deprel();
            if !ORPHAN_PARENT_RELATIONS.contains(&parent) {
                state.add(
                    Diagnostic::syntax(format!(
                        "The parent of 'orphan' should normally be 'conj' but it is {parent}.",
                        parent = quoted(parent)
                    ))
                    .with_rule("orphan-parent")
                    .with_level(Level::Three)
                    .with_line(node.line)
                    .with_node(i.to_string()),
                );
            }
        }
    }
}
