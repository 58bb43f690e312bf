//! A rule for relations that always go from left to right.

use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the left-to-right rule.
const ID: &str = "LeftToRight";

/// Gets the diagnostic identifier for a relation that must go left to right.
///
/// Each relation has its own identifier so that older treebanks can be
/// excused for some of them.
fn diagnostic_id(relation: &str) -> Option<&'static str> {
    match relation {
        "conj" => Some("right-to-left-conj"),
        "fixed" => Some("right-to-left-fixed"),
        "flat" => Some("right-to-left-flat"),
        "goeswith" => Some("right-to-left-goeswith"),
        "appos" => Some("right-to-left-appos"),
        _ => None,
    }
}

/// Detects head-final coordination, multiword expressions and appositions.
#[derive(Default, Debug, Clone, Copy)]
pub struct LeftToRightRule;

impl Rule for LeftToRightRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that `conj`, `fixed`, `flat`, `goeswith` and `appos` are head-initial."
    }

    fn explanation(&self) -> &'static str {
        "Coordination, fixed and flat multiword expressions, words split by whitespace and \
         appositions are always attached to their first member: the dependent follows its \
         head."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "right-to-left-conj",
            "right-to-left-fixed",
            "right-to-left-flat",
            "right-to-left-goeswith",
            "right-to-left-appos",
        ]
    }
}

impl Visitor for LeftToRightRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for i in tree.words() {
            let node = tree.node(i);
            let Some(rule) = diagnostic_id(node.record.universal_deprel()) else {
                continue;
            };

            if i < node.head {
                state.add(
                    Diagnostic::syntax(format!(
                        "Relation {deprel} must go left-to-right.",
                        deprel = quoted(node.record.deprel)
                    ))
                    .with_rule(rule)
                    .with_level(Level::Three)
                    .with_line(node.line)
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
    fn reports_head_final_relations() {
        let input = sentence(
            &[],
            &[
                "1 New New PROPN _ _ 2 flat:name _ _",
                "2 York York PROPN _ _ 0 root _ _",
                "3 and and CCONJ _ _ 4 cc _ _",
                "4 Boston Boston PROPN _ _ 2 conj _ _",
            ],
        );
        let diagnostics = run(LeftToRightRule, &input);
        assert_eq!(ids(&diagnostics), ["right-to-left-flat"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 1 Node 1]: [L3 Syntax right-to-left-flat] Relation 'flat:name' must go \
             left-to-right."
        );
    }
}
