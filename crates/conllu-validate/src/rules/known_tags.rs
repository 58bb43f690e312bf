//! A rule for tags and relations that must be known.

use conllu_grammar::TokenId;
use conllu_grammar::TokenRow;
use conllu_grammar::universal_part;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Location;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::tagset::DEPREL_FILE;
use crate::tagset::EDEPREL_FILE;
use crate::tagset::IssueKind;
use crate::tagset::TagsetIssue;
use crate::util::quoted;

/// The identifier for the known tags rule.
const ID: &str = "KnownTags";

/// Creates a diagnostic for a relation rejected while loading the tag sets.
fn rejected_relation(issue: &TagsetIssue) -> Diagnostic {
    let relation = quoted(&issue.relation);
    let diagnostic = match (issue.kind, issue.enhanced) {
        (IssueKind::Malformed, true) => Diagnostic::enhanced(format!(
            "Spurious language-specific enhanced relation {relation} - it does not match the \
             regular expression that restricts enhanced relations."
        ))
        .with_rule("malformed-relation"),
        (IssueKind::Malformed, false) => Diagnostic::syntax(format!(
            "Spurious language-specific relation {relation} - in basic UD, it must match \
             '^[a-z]+(:[a-z]+)?'."
        ))
        .with_rule("malformed-relation"),
        (IssueKind::NotExtension, _) => Diagnostic::syntax(format!(
            "Spurious language-specific relation {relation} - not an extension of any UD \
             relation."
        ))
        .with_rule("relation-not-extension"),
    };

    diagnostic
        .with_level(Level::Four)
        .with_location(Location::Resource(issue.resource.clone()))
}

/// Gets the part of a relation that is looked up: the full label when
/// language-specific labels are checked, the universal part otherwise.
fn label(relation: &str, specific: bool) -> &str {
    if specific {
        relation
    } else {
        universal_part(relation)
    }
}

/// Detects tags and relations missing from the permitted tag sets.
///
/// Below level 4 only the universal part of a relation is looked up.
#[derive(Default, Debug, Clone, Copy)]
pub struct KnownTagsRule;

impl Rule for KnownTagsRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that UPOS tags, relations and enhanced relations are known."
    }

    fn explanation(&self) -> &'static str {
        "UPOS tags must be one of the seventeen universal tags. Relations in DEPREL and DEPS \
         must be universal relations; from level 4, language-specific subtypes must also be \
         declared for the language. Language-specific relation lists are themselves checked \
         when they are loaded: every entry must be well formed and must extend a universal \
         relation."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Morpho, Category::Syntax, Category::Enhanced])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "unknown-upos",
            "unknown-deprel",
            "invalid-head-deprel",
            "unknown-edeprel",
            "malformed-relation",
            "relation-not-extension",
        ]
    }
}

impl Visitor for KnownTagsRule {
    fn start(&mut self, state: &mut Session, ctx: &Context<'_>) {
        for issue in ctx.tagsets.issues() {
            state.add(rejected_relation(issue));
        }
    }

    fn row(&mut self, state: &mut Session, ctx: &Context<'_>, row: &TokenRow) {
        if !matches!(row.id(), TokenId::Word(_) | TokenId::Empty(..)) {
            return;
        }

        let Some(record) = row.record() else {
            return;
        };

        let line = row.line();
        let skip_upos = row.id().is_empty_node() && record.upos == "_";
        if let Some(upos) = ctx.tagsets.upos() {
            if !skip_upos && !upos.contains(record.upos) {
                state.add(
                    Diagnostic::morpho(format!(
                        "Unknown UPOS tag: {upos}.",
                        upos = quoted(record.upos)
                    ))
                    .with_rule("unknown-upos")
                    .with_level(Level::Two)
                    .with_line(line),
                );
            }
        }

        if !row.id().is_word() {
            return;
        }

        let specific = ctx.config.level >= Level::Four;
        let level = if specific { Level::Four } else { Level::Two };

        if let Some(deprel) = ctx.tagsets.deprel() {
            if !deprel.contains(label(record.deprel, specific)) {
                state.hint_missing(DEPREL_FILE);
                state.add(
                    Diagnostic::syntax(format!(
                        "Unknown DEPREL label: {deprel}",
                        deprel = quoted(record.deprel)
                    ))
                    .with_rule("unknown-deprel")
                    .with_level(level)
                    .with_line(line),
                );
            }
        }

        let Some(deps) = ctx.tagsets.deps() else {
            return;
        };

        if record.deps == "_" {
            return;
        }

        for pair in record.deps.split('|') {
            let Some((_, relation)) = pair.split_once(':') else {
                state.add(
                    Diagnostic::enhanced(format!(
                        "Malformed head:deprel pair {pair}.",
                        pair = quoted(pair)
                    ))
                    .with_rule("invalid-head-deprel")
                    .with_level(level)
                    .with_line(line),
                );
                continue;
            };

            let relation = label(relation, specific);
            if !deps.contains(relation) {
                state.hint_missing(EDEPREL_FILE);
                state.add(
                    Diagnostic::enhanced(format!(
                        "Unknown enhanced relation type {relation} in {pair}",
                        relation = quoted(relation),
                        pair = quoted(pair)
                    ))
                    .with_rule("unknown-edeprel")
                    .with_level(level)
                    .with_line(line),
                );
            }
        }
    }
}
