//! A rule for the attachment of punctuation.

use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::bracketed;

/// The identifier for the projective punctuation rule.
const ID: &str = "ProjectivePunctuation";

/// Detects punctuation that is attached nonprojectively or that makes other
/// attachments nonprojective.
#[derive(Default, Debug, Clone, Copy)]
pub struct ProjectivePunctuationRule;

impl Rule for ProjectivePunctuationRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that punctuation is attached projectively."
    }

    fn explanation(&self) -> &'static str {
        "Punctuation can almost always be attached without crossing any other edge, so a \
         `punct` node must not sit in the gap of a nonprojective edge and its own edge must not \
         pass over words that its head does not dominate. A punctuation mark is not blamed for \
         a crossing edge if its head lies in the same gap; the head was moved there together \
         with the punctuation."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &["punct-causes-nonproj", "punct-is-nonproj"]
    }
}

impl Visitor for ProjectivePunctuationRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for i in tree.words() {
            if tree.record(i).universal_deprel() != "punct" {
                continue;
            }

            let line = tree.node(i).line;
            let crossing = tree.caused_nonprojectivities(i);
            if !crossing.is_empty() {
                state.add(
                    Diagnostic::syntax(format!(
                        "Punctuation must not cause non-projectivity of nodes {nodes}",
                        nodes = bracketed(&crossing)
                    ))
                    .with_rule("punct-causes-nonproj")
                    .with_level(Level::Three)
                    .with_line(line)
                    .with_node(i.to_string()),
                );
            }

            let gap = tree.gap(i);
            if !gap.is_empty() {
                state.add(
                    Diagnostic::syntax(format!(
                        "Punctuation must not be attached non-projectively over nodes {nodes}",
                        nodes = bracketed(&gap)
                    ))
                    .with_rule("punct-is-nonproj")
                    .with_level(Level::Three)
                    .with_line(line)
                    .with_node(i.to_string()),
                );
            }
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
    fn projective_punctuation_passes() {
        let input = sentence(
            &[],
            &[
                "1 Go go VERB _ _ 0 root _ _",
                "2 home home ADV _ _ 1 advmod _ _",
                "3 ! ! PUNCT _ _ 1 punct _ _",
            ],
        );
        assert!(run(ProjectivePunctuationRule, &input).is_empty());
    }

    #[test]
    fn reports_punctuation_in_a_gap() {
        let input = sentence(
            &[],
            &[
                "1 a a X _ _ 0 root _ _",
                "2 b b X _ _ 4 dep _ _",
                "3 , , PUNCT _ _ 1 punct _ _",
                "4 c c X _ _ 1 dep _ _",
            ],
        );
        let diagnostics = run(ProjectivePunctuationRule, &input);
        assert_eq!(ids(&diagnostics), ["punct-causes-nonproj"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 3 Node 3]: [L3 Syntax punct-causes-nonproj] Punctuation must not cause \
             non-projectivity of nodes [2]"
        );
    }

    #[test]
    fn reports_nonprojective_punctuation() {
        let input = sentence(
            &[],
            &[
                "1 a a X _ _ 0 root _ _",
                "2 , , PUNCT _ _ 4 punct _ _",
                "3 b b X _ _ 1 dep _ _",
                "4 c c X _ _ 1 dep _ _",
            ],
        );
        let diagnostics = run(ProjectivePunctuationRule, &input);
        assert_eq!(
            ids(&diagnostics),
            ["punct-causes-nonproj", "punct-is-nonproj"]
        );
        assert_eq!(
            diagnostics[1].message(),
            "Punctuation must not be attached non-projectively over nodes [3]"
        );
    }
}
