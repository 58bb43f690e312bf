//! A rule for sentence identifiers.

use conllu_grammar::Sentence;

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

/// The identifier for the sentence identifier rule.
const ID: &str = "SentenceId";

/// The languages whose sentence identifiers may contain one slash.
const SLASH_LANGUAGES: [&str; 2] = ["ud", "shopen"];

/// Creates a sentence identifier diagnostic.
fn sentence_id(rule: &'static str, message: String, location: Location) -> Diagnostic {
    Diagnostic::metadata(message)
        .with_rule(rule)
        .with_level(Level::Two)
        .with_location(location)
}

/// Detects missing, malformed and duplicate sentence identifiers.
#[derive(Default, Debug, Clone, Copy)]
pub struct SentenceIdRule;

impl Rule for SentenceIdRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that every sentence has exactly one well-formed, unique `sent_id`."
    }

    fn explanation(&self) -> &'static str {
        "Every sentence starts with a `# sent_id = <id>` comment whose identifier contains no \
         whitespace and is unique across all inputs of the run. The forward slash is reserved \
         for parallel treebanks: an identifier contains at most one, and only with the \
         language codes `ud` and `shopen`."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Metadata])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "invalid-sent-id",
            "missing-sent-id",
            "multiple-sent-id",
            "non-unique-sent-id",
            "slash-in-sent-id",
        ]
    }
}

impl Visitor for SentenceIdRule {
    fn sentence(&mut self, state: &mut Session, ctx: &Context<'_>, sentence: &Sentence) {
        let mut ids = Vec::new();
        for comment in sentence.comments() {
            if let Some(id) = comment.sent_id() {
                ids.push(id);
                continue;
            }

            let text = comment.text();
            if text.starts_with("# sent_id") || text.starts_with("#sent_id") {
                state.add(sentence_id(
                    "invalid-sent-id",
                    format!(
                        "Spurious sent_id line: {text} Should look like '# sent_id = xxxxx' where \
                         xxxxx is not whitespace. Forward slash reserved for special purposes.",
                        text = quoted(text)
                    ),
                    Location::Line(comment.line()),
                ));
            }
        }

        let id = match ids.as_slice() {
            [] => {
                state.add(sentence_id(
                    "missing-sent-id",
                    "Missing the sent_id attribute.".to_string(),
                    state.tree_location(),
                ));
                return;
            }
            [id] => *id,
            _ => {
                state.add(sentence_id(
                    "multiple-sent-id",
                    "Multiple sent_id attributes.".to_string(),
                    state.tree_location(),
                ));
                return;
            }
        };

        if !state.remember_id(id) {
            state.add(sentence_id(
                "non-unique-sent-id",
                format!("Non-unique sent_id attribute {id}.", id = quoted(id)),
                state.tree_location(),
            ));
        }

        let slashes = id.matches('/').count();
        if slashes > 1 || slashes == 1 && !SLASH_LANGUAGES.contains(&ctx.config.lang.as_str()) {
            state.add(sentence_id(
                "slash-in-sent-id",
                format!(
                    "The forward slash is reserved for special use in parallel treebanks: {id}",
                    id = quoted(id)
                ),
                state.tree_location(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Config;
    use crate::Tagsets;
    use crate::rules::testing::ids;
    use crate::rules::testing::run;
    use crate::rules::testing::run_with;
    use crate::rules::testing::sentence;

    const ROW: &str = "1 a a X _ _ 0 root _ _";

    #[test]
    fn reports_missing_malformed_and_multiple_ids() {
        let mut input = sentence(&["# sent_id = two words"], &[ROW]);
        input.push_str(&sentence(&["# sent_id = a", "# sent_id = b"], &[ROW]));
        let diagnostics = run(SentenceIdRule, &input);
        assert_eq!(
            ids(&diagnostics),
            ["invalid-sent-id", "missing-sent-id", "multiple-sent-id"]
        );
        assert_eq!(
            diagnostics[1].to_string(),
            "[Tree number 1 on line 2]: [L2 Metadata missing-sent-id] Missing the sent_id \
             attribute."
        );
    }

    #[test]
    fn repeated_ids_are_reported_the_second_time_only() {
        let mut input = sentence(&["# sent_id = s1"], &[ROW]);
        input.push_str(&sentence(&["# sent_id = s1"], &[ROW]));
        let diagnostics = run(SentenceIdRule, &input);
        assert_eq!(ids(&diagnostics), ["non-unique-sent-id"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Tree number 2 on line 5 Sent s1]: [L2 Metadata non-unique-sent-id] Non-unique \
             sent_id attribute 's1'."
        );
    }

    #[test]
    fn slashes_depend_on_the_language() {
        let input = sentence(&["# sent_id = a/b"], &[ROW]);
        assert!(run(SentenceIdRule, &input).is_empty());

        let config = Config {
            lang: "cs".to_string(),
            ..Default::default()
        };
        let diagnostics = run_with(SentenceIdRule, config, Tagsets::unchecked(), &input);
        assert_eq!(ids(&diagnostics), ["slash-in-sent-id"]);

        let input = sentence(&["# sent_id = a/b/c"], &[ROW]);
        assert_eq!(ids(&run(SentenceIdRule, &input)), ["slash-in-sent-id"]);
    }
}
