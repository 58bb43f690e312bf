//! A rule for the words joined by `goeswith`.

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

/// The identifier for the `goeswith` span rule.
const ID: &str = "GoeswithSpan";

/// Detects `goeswith` groups that skip words or join words without
/// whitespace between them.
#[derive(Default, Debug, Clone, Copy)]
pub struct GoeswithSpanRule;

impl Rule for GoeswithSpanRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that `goeswith` joins adjacent parts of a word that were split by whitespace."
    }

    fn explanation(&self) -> &'static str {
        "`goeswith` connects the parts of a word that was wrongly split at whitespace; the \
         first part heads the others. The parts are therefore adjacent: every word between the \
         head and its last `goeswith` dependent is part of the group. Every part except the \
         last is followed by whitespace, so none of them carries `SpaceAfter=No`."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &["goeswith-gap", "goeswith-nospace"]
    }
}

impl Visitor for GoeswithSpanRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for i in tree.words() {
            let parts: Vec<_> = tree
                .children(i)
                .iter()
                .copied()
                .filter(|c| tree.record(*c).universal_deprel() == "goeswith")
                .collect();
            let Some(&last) = parts.last() else {
                continue;
            };

            let mut group = parts.clone();
            group.push(i);
            group.sort_unstable();
            let range: Vec<_> = (i..=last).collect();
            let line = tree.node(i).line;
            if group != range {
                state.add(
                    Diagnostic::syntax(format!(
                        "Violation of guidelines: gaps in goeswith group {group} != {range}.",
                        group = bracketed(&group),
                        range = bracketed(&range)
                    ))
                    .with_rule("goeswith-gap")
                    .with_level(Level::Three)
                    .with_line(line)
                    .with_node(i.to_string()),
                );
            }

            let joined = group[..group.len() - 1]
                .iter()
                .any(|w| tree.record(*w).has_misc("SpaceAfter=No"));
            if joined {
                state.add(
                    Diagnostic::syntax(
                        "'goeswith' cannot connect nodes that are not separated by whitespace",
                    )
                    .with_rule("goeswith-nospace")
                    .with_level(Level::Three)
                    .with_line(line)
                    .with_node(i.to_string()),
                );
            }
        }
    }
}
