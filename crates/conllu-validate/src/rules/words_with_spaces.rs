//! A rule for words that contain whitespace.

use conllu_grammar::Column;
use conllu_grammar::TokenRow;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::tagset::TOKENS_WITH_SPACE_FILE;
use crate::util::quoted;

/// The identifier for the words with spaces rule.
const ID: &str = "WordsWithSpaces";

/// Creates an "invalid word with space" diagnostic.
fn invalid_word_with_space(column: Column, value: &str, line: usize) -> Diagnostic {
    Diagnostic::format(format!(
        "{value} in column {column} is not on the list of exceptions allowed to contain \
         whitespace (data/tokens_w_space.LANG files).",
        value = quoted(value)
    ))
    .with_rule("invalid-word-with-space")
    .with_level(Level::Four)
    .with_line(line)
}

/// Detects forms and lemmas with whitespace that the language does not list.
#[derive(Default, Debug, Clone, Copy)]
pub struct WordsWithSpacesRule;

impl Rule for WordsWithSpacesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that forms and lemmas only contain whitespace where the language allows it."
    }

    fn explanation(&self) -> &'static str {
        "Words normally do not contain whitespace. Some languages have words that do, such as \
         numbers written with a space as the thousands separator; these are listed as regular \
         expressions in the `tokens_w_space` file of the language. A FORM or LEMMA with \
         whitespace must match one of the expressions in full."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::Four
    }

    fn emits(&self) -> &'static [&'static str] {
        &["invalid-word-with-space"]
    }
}

impl Visitor for WordsWithSpacesRule {
    fn row(&mut self, state: &mut Session, ctx: &Context<'_>, row: &TokenRow) {
        let Some(patterns) = ctx.tagsets.tokens_with_space() else {
            return;
        };

        for column in [Column::Form, Column::Lemma] {
            let Some(value) = row.get(column) else {
                break;
            };

            if !value.contains(char::is_whitespace) {
                continue;
            }

            if !patterns.iter().any(|pattern| pattern.is_match(value)) {
                state.hint_missing(TOKENS_WITH_SPACE_FILE);
                state.add(invalid_word_with_space(column, value, row.line()));
            }
        }
    }
}
