//! Implementation of the validation visitor.
//!
//! A [`Visitor`] receives the events of a validation run in input order:
//!
//! 1. [`start`](Visitor::start) once, before any input is read.
//! 2. For every input: [`malformation`](Visitor::malformation) and
//!    [`row`](Visitor::row) while the lines of a sentence are read, then
//!    [`sentence`](Visitor::sentence) with the complete sentence,
//!    [`structure`](Visitor::structure) with the outcome of building its
//!    tree and graph, and [`tree`](Visitor::tree) and
//!    [`graph`](Visitor::graph) for the structures that were built.
//!    [`finish`](Visitor::finish) is called at the end of every input.

use conllu_grammar::Graph;
use conllu_grammar::GraphError;
use conllu_grammar::LineEndings;
use conllu_grammar::Malformation;
use conllu_grammar::Sentence;
use conllu_grammar::TokenRow;
use conllu_grammar::Tree;
use conllu_grammar::TreeError;

use crate::Config;
use crate::Lexicon;
use crate::Session;
use crate::Tagsets;

/// The read-only resources available to every check.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// The configuration of the run.
    pub config: &'a Config,
    /// The permitted tag sets.
    pub tagsets: &'a Tagsets,
    /// The approved lemma lists.
    pub lexicon: &'a dyn Lexicon,
}

/// What was observed about an input once it was fully read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamEnd {
    /// The line terminators of the input.
    pub line_endings: LineEndings,
    /// The number of lines of the input.
    pub lines: usize,
}

/// A trait used to implement a validation visitor.
///
/// Every hook has a default implementation that does nothing.
#[allow(unused_variables)]
pub trait Visitor {
    /// Visits the start of a run.
    fn start(&mut self, state: &mut Session, ctx: &Context<'_>) {}

    /// Visits a stream-level malformation.
    fn malformation(&mut self, state: &mut Session, ctx: &Context<'_>, malformation: &Malformation) {
    }

    /// Visits a token row as soon as it is read.
    fn row(&mut self, state: &mut Session, ctx: &Context<'_>, row: &TokenRow) {}

    /// Visits a complete sentence.
    fn sentence(&mut self, state: &mut Session, ctx: &Context<'_>, sentence: &Sentence) {}

    /// Visits the outcome of building the tree and graph of a sentence.
    fn structure(
        &mut self,
        state: &mut Session,
        ctx: &Context<'_>,
        tree: Result<&Tree<'_>, &TreeError>,
        graph: Result<Option<&Graph<'_>>, &GraphError>,
    ) {
    }

    /// Visits the valid basic tree of a sentence.
    fn tree(&mut self, state: &mut Session, ctx: &Context<'_>, tree: &Tree<'_>) {}

    /// Visits the valid enhanced graph of a sentence.
    fn graph(&mut self, state: &mut Session, ctx: &Context<'_>, graph: &Graph<'_>) {}

    /// Visits the end of an input.
    fn finish(&mut self, state: &mut Session, ctx: &Context<'_>, end: &StreamEnd) {}
}
