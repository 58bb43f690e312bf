//! A rule for `orphan` relations in the enhanced graph.

use conllu_grammar::Graph;
use conllu_grammar::universal_part;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;

/// The identifier for the enhanced orphan rule.
const ID: &str = "EnhancedOrphan";

/// Detects `orphan` relations in enhanced graphs of treebanks that resolve
/// gapping with empty nodes.
#[derive(Default, Debug, Clone, Copy)]
pub struct EnhancedOrphanRule;

impl Rule for EnhancedOrphanRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the enhanced graph has no `orphan` relations once empty nodes are used."
    }

    fn explanation(&self) -> &'static str {
        "Enhancements are optional. A treebank that reconstructs elided predicates as empty \
         nodes attaches their dependents directly, so the `orphan` relation has no place in its \
         enhanced graphs. The first empty node of the run tells that the treebank does this; \
         from then on, every enhanced `orphan` is an error. An empty node that appears after an \
         enhanced `orphan` was already seen is reported once, pointing to that orphan."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &["empty-node-after-eorphan", "eorphan-after-empty-node"]
    }
}

impl Visitor for EnhancedOrphanRule {
    fn graph(&mut self, state: &mut Session, _: &Context<'_>, graph: &Graph<'_>) {
        for (id, node) in graph.nodes() {
            if node.is_empty_node()
                && state.mark_empty_node(node.line)
                && let Some(orphan) = state.first_enhanced_orphan()
            {
                state.add(
                    Diagnostic::enhanced(format!(
                        "Empty node means that we address gapping and there should be no \
                         orphans in the enhanced graph; but we saw one on line {orphan}"
                    ))
                    .with_rule("empty-node-after-eorphan")
                    .with_level(Level::Three)
                    .with_line(node.line)
                    .with_node(id),
                );
            }

            if !node
                .deps
                .iter()
                .any(|d| universal_part(d.relation) == "orphan")
            {
                continue;
            }

            state.mark_enhanced_orphan(node.line);
            if let Some(empty) = state.first_empty_node() {
                state.add(
                    Diagnostic::enhanced(format!(
                        "'orphan' not allowed in enhanced graph because we saw an empty node on \
                         line {empty}"
                    ))
                    .with_rule("eorphan-after-empty-node")
                    .with_level(Level::Three)
                    .with_line(node.line)
                    .with_node(id),
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

    /// A sentence whose enhanced graph uses `orphan`.
    fn with_orphan() -> String {
        sentence(
            &[],
            &[
                "1 Mary Mary PROPN _ _ 2 nsubj 2:nsubj _",
                "2 won win VERB _ _ 0 root 0:root _",
                "3 gold gold NOUN _ _ 2 obj 2:obj _",
                "4 Peter Peter PROPN _ _ 2 conj 2:conj _",
                "5 bronze bronze NOUN _ _ 4 orphan 4:orphan _",
            ],
        )
    }

    /// A sentence whose enhanced graph resolves gapping with an empty node.
    fn with_empty_node() -> String {
        sentence(
            &[],
            &[
                "1 Mary Mary PROPN _ _ 2 nsubj 2:nsubj _",
                "2 won win VERB _ _ 0 root 0:root _",
                "3 gold gold NOUN _ _ 2 obj 2:obj _",
                "4 Peter Peter PROPN _ _ 2 conj 4.1:nsubj _",
                "4.1 won win VERB _ _ _ _ 2:conj _",
                "5 bronze bronze NOUN _ _ 4 orphan 4.1:obj _",
            ],
        )
    }

    #[test]
    fn either_style_alone_passes() {
        assert!(run(EnhancedOrphanRule, &with_orphan()).is_empty());
        assert!(run(EnhancedOrphanRule, &with_empty_node()).is_empty());
    }

    #[test]
    fn reports_orphans_after_empty_nodes() {
        let input = format!("{}{}", with_empty_node(), with_orphan());
        let diagnostics = run(EnhancedOrphanRule, &input);
        assert_eq!(ids(&diagnostics), ["eorphan-after-empty-node"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 12 Node 5]: [L3 Enhanced eorphan-after-empty-node] 'orphan' not allowed in \
             enhanced graph because we saw an empty node on line 5"
        );
    }

    #[test]
    fn reports_the_first_empty_node_after_an_orphan() {
        let input = format!("{}{}{}", with_orphan(), with_empty_node(), with_empty_node());
        let diagnostics = run(EnhancedOrphanRule, &input);
        assert_eq!(ids(&diagnostics), ["empty-node-after-eorphan"]);
        assert_eq!(
            diagnostics[0].message(),
            "Empty node means that we address gapping and there should be no orphans in the \
             enhanced graph; but we saw one on line 5"
        );
    }
}
