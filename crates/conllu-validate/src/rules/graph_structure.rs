//! A rule for the connectivity of the enhanced graph.

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

/// The identifier for the graph structure rule.
const ID: &str = "GraphStructure";

/// Detects nodes of the enhanced graph that cannot be reached from the root.
#[derive(Default, Debug, Clone, Copy)]
pub struct GraphStructureRule;

impl Rule for GraphStructureRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that every node of the enhanced graph is reachable from the root."
    }

    fn explanation(&self) -> &'static str {
        "The enhanced dependencies in DEPS may give a node several heads, but every word and \
         empty node must still be reachable from the virtual root 0. The enhanced graph is \
         optional: a sentence without DEPS entries and empty nodes is not checked."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &["unconnected-egraph"]
    }
}

impl Visitor for GraphStructureRule {
    fn structure(
        &mut self,
        state: &mut Session,
        _: &Context<'_>,
        _: Result<&Tree<'_>, &TreeError>,
        graph: Result<Option<&Graph<'_>>, &GraphError>,
    ) {
        if let Err(e @ GraphError::Unconnected(_)) = graph {
            state.add(
                Diagnostic::enhanced(e.to_string())
                    .with_rule("unconnected-egraph")
                    .with_level(Level::Two)
                    .with_location(state.tree_location()),
            );
        }
    }
}
