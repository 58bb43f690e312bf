//! A rule for the agreement of relations and parts of speech.

use conllu_grammar::Tree;
use conllu_grammar::universal_part;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;
use crate::util::starts_with_any;

/// The identifier for the UPOS and DEPREL agreement rule.
const ID: &str = "UposDeprel";

/// The tags of words that cannot function as a case marker.
const NOT_CASE: &[&str] = &["PROPN", "ADJ", "PRON", "DET", "NUM", "AUX"];

/// The tags of words that cannot function as a subordinator or a
/// coordinating conjunction.
const NOT_MARK_OR_CC: &[&str] = &[
    "NOUN", "PROPN", "ADJ", "PRON", "DET", "NUM", "VERB", "AUX", "INTJ",
];

/// Detects relations used with words of an unexpected part of speech.
#[derive(Default, Debug, Clone, Copy)]
pub struct UposDeprelRule;

impl Rule for UposDeprelRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that relations are used with words of the expected part of speech."
    }

    fn explanation(&self) -> &'static str {
        "Several relations are reserved for certain parts of speech: `det` is for determiners \
         and pronouns, `nummod` for numerals, `advmod` for adverbs and similar words, `expl` for \
         pronouns, `aux` for auxiliaries and `cop` for auxiliaries or pronouns. Other relations \
         exclude some parts of speech: `case`, `mark` and `cc` are not used with nominals or \
         verbs, and `compound` is not used with auxiliaries. A `fixed` dependent excuses a \
         multiword expression whose first word has a different tag. `punct` and `PUNCT` go \
         together. Only the universal part of the relation is considered."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "rel-upos-det",
            "rel-upos-nummod",
            "rel-upos-advmod",
            "rel-upos-expl",
            "rel-upos-aux",
            "rel-upos-cop",
            "rel-upos-compound",
            "rel-upos-case",
            "rel-upos-mark",
            "rel-upos-cc",
            "rel-upos-punct",
            "upos-rel-punct",
        ]
    }
}

impl Visitor for UposDeprelRule {
    fn tree(&mut self, state: &mut Session, _: &Context<'_>, tree: &Tree<'_>) {
        for i in tree.words() {
            let node = tree.node(i);
            let record = node.record;
            let upos = record.upos;
            let deprel = record.universal_deprel();
            let has_child = |relation: &str| {
                tree.children(i)
                    .iter()
                    .any(|c| universal_part(tree.record(*c).deprel) == relation)
            };
            let fixed = has_child("fixed");

            let mut findings = Vec::new();
            if deprel == "det" && !starts_with_any(upos, &["DET", "PRON"]) && !fixed {
                findings.push((
                    "rel-upos-det",
                    format!(
                        "'det' should be 'DET' or 'PRON' but it is {upos}",
                        upos = quoted(upos)
                    ),
                ));
            }

            if deprel == "nummod" && !["NUM", "NOUN", "SYM"].contains(&upos) {
                findings.push((
                    "rel-upos-nummod",
                    format!("'nummod' should be 'NUM' but it is {upos}", upos = quoted(upos)),
                ));
            }

            if deprel == "advmod"
                && !starts_with_any(upos, &["ADV", "ADJ", "CCONJ", "DET", "PART", "SYM"])
                && !fixed
                && !has_child("goeswith")
            {
                findings.push((
                    "rel-upos-advmod",
                    format!("'advmod' should be 'ADV' but it is {upos}", upos = quoted(upos)),
                ));
            }

            if deprel == "expl" && !["PRON", "DET", "PART"].contains(&upos) {
                findings.push((
                    "rel-upos-expl",
                    format!(
                        "'expl' should normally be 'PRON' but it is {upos}",
                        upos = quoted(upos)
                    ),
                ));
            }

            if deprel == "aux" && !upos.starts_with("AUX") {
                findings.push((
                    "rel-upos-aux",
                    format!("'aux' should be 'AUX' but it is {upos}", upos = quoted(upos)),
                ));
            }

            if deprel == "cop" && !starts_with_any(upos, &["AUX", "PRON", "DET", "SYM"]) {
                findings.push((
                    "rel-upos-cop",
                    format!(
                        "'cop' should be 'AUX' or 'PRON'/'DET' but it is {upos}",
                        upos = quoted(upos)
                    ),
                ));
            }

            if deprel == "compound" && upos.starts_with("AUX") {
                findings.push((
                    "rel-upos-compound",
                    "'compound' should not be 'AUX'".to_string(),
                ));
            }

            for (relation, excluded, rule) in [
                ("case", NOT_CASE, "rel-upos-case"),
                ("mark", NOT_MARK_OR_CC, "rel-upos-mark"),
                ("cc", NOT_MARK_OR_CC, "rel-upos-cc"),
            ] {
                if deprel == relation && starts_with_any(upos, excluded) && !fixed {
                    findings.push((
                        rule,
                        format!("'{relation}' should not be {upos}", upos = quoted(upos)),
                    ));
                }
            }

            if record.deprel == "punct" && upos != "PUNCT" {
                findings.push((
                    "rel-upos-punct",
                    format!("'punct' must be 'PUNCT' but it is {upos}", upos = quoted(upos)),
                ));
            }

            if upos == "PUNCT" && !starts_with_any(deprel, &["punct", "root"]) {
                findings.push((
                    "upos-rel-punct",
                    format!(
                        "'PUNCT' must be 'punct' but it is {deprel}",
                        deprel = quoted(record.deprel)
                    ),
                ));
            }

            for (rule, message) in findings {
                state.add(
                    Diagnostic::syntax(message)
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
    fn expected_tags_pass() {
        let input = sentence(
            &[],
            &[
                "1 the the DET _ _ 2 det _ _",
                "2 cats cat NOUN _ _ 4 nsubj _ _",
                "3 do do AUX _ _ 4 aux _ _",
                "4 run run VERB _ _ 0 root _ _",
                "5 . . PUNCT _ _ 4 punct _ _",
            ],
        );
        assert!(run(UposDeprelRule, &input).is_empty());
    }

    #[test]
    fn reports_unexpected_tags() {
        let input = sentence(
            &[],
            &[
                "1 the the NOUN _ _ 2 det _ _",
                "2 cats cat NOUN _ _ 4 nsubj _ _",
                "3 do do VERB _ _ 4 aux:pass _ _",
                "4 run run VERB _ _ 0 root _ _",
                "5 . . SYM _ _ 4 punct _ _",
                "6 ! ! PUNCT _ _ 4 dep _ _",
            ],
        );
        let diagnostics = run(UposDeprelRule, &input);
        assert_eq!(
            ids(&diagnostics),
            ["rel-upos-det", "rel-upos-aux", "rel-upos-punct", "upos-rel-punct"]
        );
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 1 Node 1]: [L3 Syntax rel-upos-det] 'det' should be 'DET' or 'PRON' but it is \
             'NOUN'"
        );
        assert_eq!(
            diagnostics[3].message(),
            "'PUNCT' must be 'punct' but it is 'dep'"
        );
    }

    #[test]
    fn fixed_children_excuse_multiword_expressions() {
        let input = sentence(
            &[],
            &[
                "1 run run VERB _ _ 0 root _ _",
                "2 because because ADJ _ _ 5 case _ _",
                "3 of of ADP _ _ 2 fixed _ _",
                "4 the the PRON _ _ 5 case _ _",
                "5 rain rain NOUN _ _ 1 obl _ _",
            ],
        );
        let diagnostics = run(UposDeprelRule, &input);
        assert_eq!(ids(&diagnostics), ["rel-upos-case"]);
        assert_eq!(diagnostics[0].message(), "'case' should not be 'PRON'");
    }
}
