//! A rule for the format of individual columns.

use conllu_grammar::COLUMN_COUNT;
use conllu_grammar::Column;
use conllu_grammar::TokenId;
use conllu_grammar::TokenRow;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the column format rule.
const ID: &str = "ColumnFormat";

/// Creates a column format diagnostic.
fn column_format(rule: &'static str, message: String, line: usize) -> Diagnostic {
    Diagnostic::format(message)
        .with_rule(rule)
        .with_level(Level::One)
        .with_line(line)
}

/// Determines if text contains two consecutive whitespace characters.
fn has_repeated_whitespace(text: &str) -> bool {
    let mut previous = false;
    for c in text.chars() {
        let current = c.is_whitespace();
        if previous && current {
            return true;
        }

        previous = current;
    }

    false
}

/// Detects empty columns, misplaced whitespace and malformed identifiers.
#[derive(Default, Debug, Clone, Copy)]
pub struct ColumnFormatRule;

impl Rule for ColumnFormatRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that columns are non-empty, free of stray whitespace and that IDs are well formed."
    }

    fn explanation(&self) -> &'static str {
        "No column may be empty, start or end with whitespace, or contain two consecutive \
         whitespace characters. FORM, LEMMA and MISC may contain single spaces; the ID, UPOS, \
         XPOS, FEATS, HEAD, DEPREL and DEPS columns may not contain whitespace at all. The ID \
         must be a word index (`1`), a multiword token range (`1-2`) or an empty node (`1.1`)."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::One
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "empty-column",
            "leading-whitespace",
            "trailing-whitespace",
            "repeated-whitespace",
            "invalid-whitespace",
            "invalid-word-id",
        ]
    }
}

impl Visitor for ColumnFormatRule {
    fn row(&mut self, state: &mut Session, _: &Context<'_>, row: &TokenRow) {
        let line = row.line();
        for (column, value) in Column::ALL.iter().zip(row.fields().iter().take(COLUMN_COUNT)) {
            if value.is_empty() {
                state.add(column_format(
                    "empty-column",
                    format!("Empty value in column {column}."),
                    line,
                ));
                continue;
            }

            if value.starts_with(char::is_whitespace) {
                state.add(column_format(
                    "leading-whitespace",
                    format!("Leading whitespace not allowed in column {column}."),
                    line,
                ));
            }

            if value.ends_with(char::is_whitespace) {
                state.add(column_format(
                    "trailing-whitespace",
                    format!("Trailing whitespace not allowed in column {column}."),
                    line,
                ));
            }

            if has_repeated_whitespace(value) {
                state.add(column_format(
                    "repeated-whitespace",
                    format!(
                        "Two or more consecutive whitespace characters not allowed in column \
                         {column}."
                    ),
                    line,
                ));
            }
        }

        for (column, value) in Column::ALL.iter().zip(row.fields()) {
            if !column.allows_whitespace() && value.contains(char::is_whitespace) {
                state.add(column_format(
                    "invalid-whitespace",
                    format!(
                        "White space not allowed in column {column} {value}.",
                        value = quoted(value)
                    ),
                    line,
                ));
            }
        }

        if row.id() == TokenId::Invalid {
            state.add(column_format(
                "invalid-word-id",
                format!(
                    "Unexpected ID format {id}.",
                    id = quoted(&row.fields()[0])
                ),
                line,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::testing::ids;
    use crate::rules::testing::run;
    use crate::rules::testing::sentence;

    #[test]
    fn reports_whitespace_problems() {
        let input = sentence(
            &[],
            &[
                "1 ~a a~~b X _ _ 0 root _ _",
                "2 b b X~Y _ _ 1 dep _ ~",
            ],
        );
        let diagnostics = run(ColumnFormatRule, &input);
        assert_eq!(
            ids(&diagnostics),
            [
                "leading-whitespace",
                "repeated-whitespace",
                "leading-whitespace",
                "trailing-whitespace",
                "invalid-whitespace",
            ]
        );
        assert_eq!(
            diagnostics[4].message(),
            "White space not allowed in column UPOS 'X Y'."
        );
    }

    #[test]
    fn reports_empty_columns_and_bad_ids() {
        let input = "1\t\tx\tX\t_\t_\t0\troot\t_\t_\n1x\tx\tx\tX\t_\t_\t0\troot\t_\t_\n\n";
        let diagnostics = run(ColumnFormatRule, input);
        assert_eq!(ids(&diagnostics), ["empty-column", "invalid-word-id"]);
        assert_eq!(diagnostics[1].message(), "Unexpected ID format '1x'.");
    }

    #[test]
    fn single_spaces_in_forms_pass() {
        let input = sentence(&[], &["1 New~York New~York PROPN _ _ 0 root _ SpaceAfter=No"]);
        assert!(run(ColumnFormatRule, &input).is_empty());
    }
}
