//! A rule for the `# text` attribute and its agreement with the forms.

use conllu_grammar::Sentence;
use conllu_grammar::TokenId;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Location;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;
use crate::util::shorten;

/// The identifier for the text metadata rule.
const ID: &str = "TextMetadata";

/// The `MISC` attribute marking a token not followed by whitespace.
const SPACE_AFTER_NO: &str = "SpaceAfter=No";

/// Creates a text metadata diagnostic.
fn text_metadata(rule: &'static str, message: String, location: Location) -> Diagnostic {
    Diagnostic::metadata(message)
        .with_rule(rule)
        .with_level(Level::Two)
        .with_location(location)
}

/// Detects a missing `# text` attribute and text that does not agree with
/// the forms of the tokens.
#[derive(Default, Debug, Clone, Copy)]
pub struct TextMetadataRule;

impl Rule for TextMetadataRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the `# text` attribute is the concatenation of the token forms."
    }

    fn explanation(&self) -> &'static str {
        "Every sentence has exactly one `# text = ...` comment that does not end with \
         whitespace. Reading the tokens in order (multiword tokens instead of the words they \
         contain), each FORM must be the next part of the text. A token followed directly by \
         the next one, without whitespace, carries `SpaceAfter=No` in MISC; the attribute is \
         not allowed on empty nodes or on the words of a multiword token. This check can be \
         turned off for treebanks whose text cannot be reconstructed."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Metadata])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "missing-text",
            "multiple-text",
            "text-trailing-whitespace",
            "nospaceafter-yes",
            "spaceafter-empty-node",
            "spaceafter-mwt-node",
            "text-form-mismatch",
            "missing-spaceafter",
            "text-extra-chars",
        ]
    }
}

impl Visitor for TextMetadataRule {
    fn sentence(&mut self, state: &mut Session, ctx: &Context<'_>, sentence: &Sentence) {
        if !ctx.config.check_tree_text {
            return;
        }

        let texts: Vec<_> = sentence
            .comments()
            .iter()
            .filter_map(|c| c.sentence_text())
            .collect();
        let mut text = match texts.as_slice() {
            [] => {
                state.add(text_metadata(
                    "missing-text",
                    "Missing the text attribute.".to_string(),
                    state.tree_location(),
                ));
                return;
            }
            [text] => *text,
            _ => {
                state.add(text_metadata(
                    "multiple-text",
                    "Multiple text attributes.".to_string(),
                    state.tree_location(),
                ));
                return;
            }
        };

        if text.ends_with(char::is_whitespace) {
            state.add(text_metadata(
                "text-trailing-whitespace",
                "The text attribute must not end with whitespace.".to_string(),
                state.tree_location(),
            ));
        }

        let mut skipped: Vec<(u32, u32)> = Vec::new();
        let mut mismatch_reported = false;
        for row in sentence.rows() {
            let Some(record) = row.record() else {
                continue;
            };

            let line = Location::Line(row.line());
            if record.misc.contains("NoSpaceAfter=Yes") {
                state.add(text_metadata(
                    "nospaceafter-yes",
                    "'NoSpaceAfter=Yes' should be replaced with 'SpaceAfter=No'.".to_string(),
                    line.clone(),
                ));
            }

            if record.id.contains('.') {
                if record.misc.contains(SPACE_AFTER_NO) {
                    state.add(text_metadata(
                        "spaceafter-empty-node",
                        "'SpaceAfter=No' cannot occur with empty nodes.".to_string(),
                        line,
                    ));
                }

                continue;
            }

            if record.id.contains('-') {
                if let TokenId::Range(begin, end) = row.id() {
                    skipped.push((begin, end));
                }
            } else if let TokenId::Word(id) = row.id() {
                if skipped.iter().any(|&(b, e)| b <= id && id <= e) {
                    if record.misc.contains(SPACE_AFTER_NO) {
                        state.add(text_metadata(
                            "spaceafter-mwt-node",
                            "'SpaceAfter=No' cannot occur with words that are part of a \
                             multi-word token."
                                .to_string(),
                            line,
                        ));
                    }

                    continue;
                }
            }

            let form = record.form;
            let Some(rest) = text.strip_prefix(form) else {
                if !mismatch_reported {
                    let excerpt: String = text.chars().take(form.chars().count() + 20).collect();
                    state.add(text_metadata(
                        "text-form-mismatch",
                        format!(
                            "Mismatch between the text attribute and the FORM field. \
                             Form[{id}] is {form} but text is '{excerpt}...'",
                            id = record.id,
                            form = quoted(form)
                        ),
                        state.tree_location(),
                    ));
                    mismatch_reported = true;
                }

                continue;
            };

            text = rest;
            if !record.has_misc(SPACE_AFTER_NO) {
                if ctx.config.check_space_after
                    && !text.is_empty()
                    && !text.starts_with(char::is_whitespace)
                {
                    state.add(text_metadata(
                        "missing-spaceafter",
                        format!(
                            "'SpaceAfter=No' is missing in the MISC field of node #{id} because \
                             the text is {excerpt}.",
                            id = record.id,
                            excerpt = quoted(&shorten(&format!("{form}{text}")))
                        ),
                        line,
                    ));
                }

                text = text.trim_start();
            }
        }

        if !text.is_empty() {
            state.add(text_metadata(
                "text-extra-chars",
                format!(
                    "Extra characters at the end of the text attribute, not accounted for in the \
                     FORM fields: {text}"
                ),
                state.tree_location(),
            ));
        }
    }
}
