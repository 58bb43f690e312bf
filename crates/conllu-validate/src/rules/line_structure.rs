//! A rule for the line structure of the input.

use conllu_grammar::Malformation;
use conllu_grammar::MalformationKind;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;

/// The identifier for the line structure rule.
const ID: &str = "LineStructure";

/// Gets the diagnostic identifier of a malformation.
fn diagnostic_id(kind: &MalformationKind) -> &'static str {
    match kind {
        MalformationKind::PseudoEmptyLine => "pseudo-empty-line",
        MalformationKind::ExtraEmptyLine => "extra-empty-line",
        MalformationKind::MisplacedComment => "misplaced-comment",
        MalformationKind::ColumnCount(_) => "number-of-columns",
        MalformationKind::InvalidLine(_) => "invalid-line",
        MalformationKind::MissingEmptyLine => "missing-empty-line",
        MalformationKind::InvalidEncoding => "invalid-encoding",
    }
}

/// Creates a diagnostic for a malformation.
fn malformed(malformation: &Malformation) -> Diagnostic {
    Diagnostic::format(malformation.to_string())
        .with_rule(diagnostic_id(&malformation.kind))
        .with_level(Level::One)
        .with_line(malformation.line)
}

/// Detects lines that break the sentence structure of the input.
#[derive(Default, Debug, Clone, Copy)]
pub struct LineStructureRule;

impl Rule for LineStructureRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the input is a sequence of sentences separated by single blank lines."
    }

    fn explanation(&self) -> &'static str {
        "Every sentence is a block of comment lines followed by token rows and is terminated by \
         exactly one blank line, including the last sentence of the input. Comments may only \
         precede the token rows. A token row has ten tab-separated columns and starts with a \
         digit; any other line that is neither blank nor a comment is invalid. A line made of \
         whitespace only is reported and treated as the end of the sentence."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::One
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "pseudo-empty-line",
            "extra-empty-line",
            "misplaced-comment",
            "number-of-columns",
            "invalid-line",
            "missing-empty-line",
            "invalid-encoding",
        ]
    }
}

impl Visitor for LineStructureRule {
    fn malformation(&mut self, state: &mut Session, _: &Context<'_>, malformation: &Malformation) {
        state.add(malformed(malformation));
    }
}
