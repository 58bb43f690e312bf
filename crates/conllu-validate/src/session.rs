//! The mutable state of a validation run.

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::Diagnostic;
use crate::Diagnostics;
use crate::Location;

/// The state shared by all checks for the duration of a run.
///
/// A run may span several inputs; sentence identifiers and the empty node
/// and enhanced orphan markers are remembered across all of them.
#[derive(Debug)]
pub struct Session {
    /// The diagnostic sink.
    diagnostics: Diagnostics,
    /// The name of the current input, shown in diagnostics.
    input: Option<String>,
    /// The label of the most recently read sentence.
    label: Option<String>,
    /// The running number of the current sentence.
    tree_number: usize,
    /// The start line of the current sentence.
    sentence_line: usize,
    /// The sentence identifiers seen so far.
    known_ids: HashSet<String>,
    /// The line of the first empty node of the enhanced graph.
    first_empty_node: Option<usize>,
    /// The line of the first `orphan` relation of the enhanced graph.
    first_enhanced_orphan: Option<usize>,
    /// Language-specific resources a failing check hinted at.
    hints: BTreeSet<&'static str>,
}

impl Session {
    /// Creates a new session recording into the given sink.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics,
            input: None,
            label: None,
            tree_number: 0,
            sentence_line: 0,
            known_ids: HashSet::new(),
            first_empty_node: None,
            first_enhanced_orphan: None,
            hints: BTreeSet::new(),
        }
    }

    /// Records a diagnostic, stamping it with the current input and sentence
    /// label.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        let diagnostic = diagnostic
            .with_input(self.input.clone())
            .with_sentence(self.label.clone());
        self.diagnostics.add(diagnostic);
    }

    /// Gets the diagnostic sink.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes the session and returns the diagnostic sink.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Gets the location of the current sentence as a whole.
    pub fn tree_location(&self) -> Location {
        Location::Tree {
            number: self.tree_number,
            line: self.sentence_line,
        }
    }

    /// Starts a new input.
    pub(crate) fn start_input(&mut self, input: Option<String>) {
        self.input = input;
    }

    /// Starts a new sentence.
    pub(crate) fn start_sentence(&mut self, line: usize) {
        self.tree_number += 1;
        self.sentence_line = line;
    }

    /// Sets the label of the sentence being read.
    pub(crate) fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    /// Gets the label of the sentence being read.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Gets the running number of the current sentence.
    pub fn tree_number(&self) -> usize {
        self.tree_number
    }

    /// Remembers a sentence identifier.
    ///
    /// Returns `false` if the identifier was seen before.
    pub fn remember_id(&mut self, id: &str) -> bool {
        if self.known_ids.contains(id) {
            return false;
        }

        self.known_ids.insert(id.to_string())
    }

    /// Gets the line of the first empty node seen in an enhanced graph.
    pub fn first_empty_node(&self) -> Option<usize> {
        self.first_empty_node
    }

    /// Marks the line of the first empty node, if none was seen yet.
    ///
    /// Returns `true` if this was the first.
    pub fn mark_empty_node(&mut self, line: usize) -> bool {
        if self.first_empty_node.is_some() {
            return false;
        }

        self.first_empty_node = Some(line);
        true
    }

    /// Gets the line of the first enhanced `orphan` relation.
    pub fn first_enhanced_orphan(&self) -> Option<usize> {
        self.first_enhanced_orphan
    }

    /// Marks the line of the first enhanced `orphan` relation, if none was
    /// seen yet.
    pub fn mark_enhanced_orphan(&mut self, line: usize) {
        self.first_enhanced_orphan.get_or_insert(line);
    }

    /// Notes that a check failed for want of a language-specific resource
    /// (such as `feat_val`).
    pub fn hint_missing(&mut self, resource: &'static str) {
        self.hints.insert(resource);
    }

    /// Gets the resources that failing checks hinted at.
    pub fn hints(&self) -> &BTreeSet<&'static str> {
        &self.hints
    }
}
