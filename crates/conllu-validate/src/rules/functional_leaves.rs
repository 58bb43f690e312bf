//! A rule for function words that should be leaves.

use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;

/// The identifier for the functional leaves rule.
const ID: &str = "FunctionalLeaves";

/// The feature marking a negation.
const NEGATION: &str = "Polarity=Neg";

/// Gets the diagnostic identifier for a child that a function word of the
/// given relation does not take, if any.
fn unexpected_child(parent: &str, child: &str) -> Option<&'static str> {
    match parent {
        "mark" | "case"
            if !matches!(
                child,
                "advmod" | "obl" | "goeswith" | "fixed" | "reparandum" | "conj" | "cc" | "punct"
            ) =>
        {
            Some("leaf-mark-case")
        }
        "aux" | "cop"
            if !matches!(
                child,
                "goeswith" | "fixed" | "reparandum" | "conj" | "cc" | "punct"
            ) =>
        {
            Some("leaf-aux-cop")
        }
        "cc" if !matches!(child, "goeswith" | "fixed" | "reparandum" | "conj" | "punct") => {
            Some("leaf-cc")
        }
        "fixed" if !matches!(child, "goeswith" | "reparandum" | "conj" | "punct") => {
            Some("leaf-fixed")
        }
        "goeswith" => Some("leaf-goeswith"),
        "punct" if child != "punct" => Some("leaf-punct"),
        _ => None,
    }
}

/// Detects function words with dependents they are not expected to have.
#[derive(Default, Debug, Clone, Copy)]
pub struct FunctionalLeavesRule;

impl Rule for FunctionalLeavesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that function words only have the few dependents they may take."
    }

    fn explanation(&self) -> &'static str {
        "Function words (`case`, `mark`, `cc`, `aux`, `cop`, `fixed`, `goeswith` and `punct`) \
         are normally leaves. The exceptions:\n\n\
         - any function word except punctuation may be modified by a negation (an `advmod` \
         tagged PART or ADV with `Polarity=Neg`);\n\
         - a function word attached nonprojectively may take punctuation that could not be \
         attached projectively elsewhere;\n\
         - `mark` and `case` may take `advmod`, `obl`, `goeswith`, `fixed`, `reparandum`, \
         `conj`, `cc` and `punct`;\n\
         - `aux` and `cop` may take `goeswith`, `fixed`, `reparandum`, `conj`, `cc` and \
         `punct`;\n\
         - `cc` may take `goeswith`, `fixed`, `reparandum`, `conj` and `punct`;\n\
         - `fixed` may take `goeswith`, `reparandum`, `conj` and `punct`;\n\
         - `punct` may take `punct` (brackets or quotes around an exclamation mark);\n\
         - `goeswith` takes no dependents at all."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "leaf-mark-case",
            "leaf-aux-cop",
            "leaf-cc",
            "leaf-fixed",
            "leaf-goeswith",
            "leaf-punct",
        ]
    }
}

impl Visitor for FunctionalLeavesRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for parent in tree.words() {
            let record = tree.record(parent);
            let deprel = record.universal_deprel();
            if !matches!(
                deprel,
                "case" | "mark" | "cc" | "aux" | "cop" | "det" | "fixed" | "goeswith" | "punct"
            ) {
                continue;
            }

            let nonprojective = !tree.gap(parent).is_empty();
            for &child in tree.children(parent) {
                let child_record = tree.record(child);
                let child_deprel = child_record.universal_deprel();
                let negation = child_deprel == "advmod"
                    && matches!(child_record.upos, "PART" | "ADV")
                    && child_record.has_feature(NEGATION);
                if (negation && deprel != "punct") || (nonprojective && child_deprel == "punct") {
                    continue;
                }

                let Some(rule) = unexpected_child(deprel, child_deprel) else {
                    continue;
                };

                state.add(
                    Diagnostic::syntax(format!(
                        "'{deprel}' not expected to have children ({parent}:{form}:{deprel} → \
                         {child}:{child_form}:{child_deprel})",
                        form = record.form,
                        child_form = child_record.form
                    ))
                    .with_rule(rule)
                    .with_level(Level::Three)
                    .with_line(tree.node(child).line)
                    .with_node(parent.to_string()),
                );
            }
        }
    }
}
