//! A rule for the shape of the basic dependency tree.

use conllu_grammar::Graph;
use conllu_grammar::GraphError;
use conllu_grammar::Tree;
use conllu_grammar::TreeError;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;

/// The identifier for the tree structure rule.
const ID: &str = "TreeStructure";

/// Detects self-loops, multiple roots and words unreachable from the root.
#[derive(Default, Debug, Clone, Copy)]
pub struct TreeStructureRule;

impl Rule for TreeStructureRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the basic dependencies of a sentence form a tree."
    }

    fn explanation(&self) -> &'static str {
        "The words of a sentence and their HEAD values form a tree rooted in the virtual node 0: \
         no word is its own head, every word is reachable from the root and, unless multiple \
         roots are allowed, exactly one word is attached to the root. A cycle shows up as words \
         that cannot be reached.\n\n\
         When the tree cannot be built, the content checks of level 3 and above are skipped for \
         the sentence and a notice says so."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format, Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "head-self-loop",
            "multiple-roots",
            "non-tree",
            "skipped-corrupt-tree",
        ]
    }
}

impl Visitor for TreeStructureRule {
    fn structure(
        &mut self,
        state: &mut Session,
        _: &Context<'_>,
        tree: Result<&Tree<'_>, &TreeError>,
        _: Result<Option<&Graph<'_>>, &GraphError>,
    ) {
        let Err(e) = tree else {
            return;
        };

        let diagnostic = Diagnostic::syntax(e.to_string()).with_level(Level::Two);
        match e {
            TreeError::Malformed => {}
            TreeError::SelfLoop { line, .. } => {
                state.add(diagnostic.with_rule("head-self-loop").with_line(*line));
            }
            TreeError::MultipleRoots { .. } => {
                state.add(
                    diagnostic
                        .with_rule("multiple-roots")
                        .with_location(state.tree_location()),
                );
            }
            TreeError::Unreachable(_) => {
                state.add(
                    diagnostic
                        .with_rule("non-tree")
                        .with_location(state.tree_location()),
                );
            }
        }

        state.add(
            Diagnostic::format("Skipping annotation tests because of corrupt tree structure.")
                .with_rule("skipped-corrupt-tree")
                .with_level(Level::Two)
                .with_location(state.tree_location()),
        );
    }
}
