//! A rule for Unicode normalization.

use conllu_grammar::Column;
use conllu_grammar::TokenRow;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::is_nfc;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the Unicode normalization rule.
const ID: &str = "UnicodeNormalization";

/// Creates an "unnormalized text" diagnostic.
fn unnormalized(column: Column, index: usize, found: char, expected: char, line: usize) -> Diagnostic {
    Diagnostic::unicode(format!(
        "Unicode not normalized: {column}.character[{index}] is {found}, should be {expected}.",
        column = quoted(column.name()),
        found = code_point(found),
        expected = code_point(expected),
    ))
    .with_rule("unicode-normalization")
    .with_level(Level::One)
    .with_line(line)
}

/// Formats a character as its code point.
fn code_point(c: char) -> String {
    format!("U+{:04X}", u32::from(c))
}

/// Detects text that is not in Normalization Form C.
#[derive(Default, Debug, Clone, Copy)]
pub struct UnicodeNormalizationRule;

impl Rule for UnicodeNormalizationRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that all text is in Unicode Normalization Form C."
    }

    fn explanation(&self) -> &'static str {
        "The same visible text can be encoded by different sequences of code points, for \
         example a letter followed by a combining accent or a single precomposed letter. \
         Treebanks must use the canonical composition (NFC) so that identical words compare \
         equal. The first code point that differs from the normalized column is reported."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Unicode])
    }

    fn level(&self) -> Level {
        Level::One
    }

    fn emits(&self) -> &'static [&'static str] {
        &["unicode-normalization"]
    }
}

impl Visitor for UnicodeNormalizationRule {
    fn row(&mut self, state: &mut Session, _: &Context<'_>, row: &TokenRow) {
        for (column, value) in Column::ALL.iter().zip(row.fields()) {
            if is_nfc(value) {
                continue;
            }

            let normalized: String = value.nfc().collect();
            let difference = value
                .chars()
                .zip(normalized.chars())
                .enumerate()
                .find(|(_, (found, expected))| found != expected);
            if let Some((index, (found, expected))) = difference {
                state.add(unnormalized(*column, index, found, expected, row.line()));
            }
        }
    }
}
