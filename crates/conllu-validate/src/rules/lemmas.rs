//! Rules for the lemmas of auxiliaries and copulas.

use conllu_grammar::Record;
use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::LemmaRole;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the auxiliary lemma rule.
const AUXILIARY_ID: &str = "AuxiliaryLemma";

/// The identifier for the copula lemma rule.
const COPULA_ID: &str = "CopulaLemma";

/// Gets how a role is named in messages, in the singular with an article and
/// in the plural.
fn role_names(role: LemmaRole) -> (&'static str, &'static str) {
    match role {
        LemmaRole::Auxiliary => ("an auxiliary verb", "auxiliaries"),
        LemmaRole::Copula => ("a copula", "copulas"),
    }
}

/// Checks the lemma of every word that plays the given role against the
/// approved lemmas of the language.
fn check_lemmas(
    state: &mut Session,
    ctx: &Context<'_>,
    tree: &Tree<'_>,
    role: LemmaRole,
    plays: impl Fn(&Record<'_>) -> bool,
    diagnostic: impl Fn(String) -> Diagnostic,
) {
    let (describe, plural) = role_names(role);
    let lang = ctx.config.lang.as_str();
    let approved = ctx.lexicon.lookup(lang, role);
    for i in tree.words() {
        let record = tree.record(i);
        if record.lemma == "_" || !plays(&record) {
            continue;
        }

        let message = match approved {
            Some(lemmas) if lemmas.contains(record.lemma) => continue,
            Some(_) => format!(
                "{lemma} is not {describe} in language [{lang}]",
                lemma = quoted(record.lemma)
            ),
            None => format!(
                "{lemma} is not {describe} in language [{lang}] (there are no known approved \
                 {plural} in this language)",
                lemma = quoted(record.lemma)
            ),
        };

        state.add(
            diagnostic(message)
                .with_level(Level::Five)
                .with_line(tree.node(i).line)
                .with_node(i.to_string()),
        );
    }
}

/// Detects auxiliaries whose lemma is not an approved auxiliary of the
/// language.
#[derive(Default, Debug, Clone, Copy)]
pub struct AuxiliaryLemmaRule;

impl Rule for AuxiliaryLemmaRule {
    fn id(&self) -> &'static str {
        AUXILIARY_ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the AUX tag is only used with the approved auxiliaries of the language."
    }

    fn explanation(&self) -> &'static str {
        "Every language has a short, closed list of auxiliary verbs and particles. A word \
         tagged `AUX` must have one of them as its lemma; anything else is a main verb. A \
         language without a list gets a distinct diagnostic so that the list can be added."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Morpho])
    }

    fn level(&self) -> Level {
        Level::Five
    }

    fn emits(&self) -> &'static [&'static str] {
        &["aux-lemma"]
    }
}

impl Visitor for AuxiliaryLemmaRule {
    fn tree(&mut self, state: &mut Session, ctx: &Context<'_>, tree: &Tree<'_>) {
        check_lemmas(
            state,
            ctx,
            tree,
            LemmaRole::Auxiliary,
            |record| record.upos == "AUX",
            |message| Diagnostic::morpho(message).with_rule("aux-lemma"),
        );
    }
}

/// Detects copulas whose lemma is not an approved copula of the language.
#[derive(Default, Debug, Clone, Copy)]
pub struct CopulaLemmaRule;

impl Rule for CopulaLemmaRule {
    fn id(&self) -> &'static str {
        COPULA_ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the `cop` relation is only used with the approved copulas of the language."
    }

    fn explanation(&self) -> &'static str {
        "The copula is narrowly the equivalent of \"to be\" in its equating sense. Verbs such \
         as \"become\" or \"seem\" head their nominal predicate instead. A word attached as \
         `cop` must have one of the approved copula lemmas of the language; a language without \
         a list gets a distinct diagnostic so that the list can be added."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Five
    }

    fn emits(&self) -> &'static [&'static str] {
        &["cop-lemma"]
    }
}

impl Visitor for CopulaLemmaRule {
    fn tree(&mut self, state: &mut Session, ctx: &Context<'_>, tree: &Tree<'_>) {
        check_lemmas(
            state,
            ctx,
            tree,
            LemmaRole::Copula,
            |record| record.deprel == "cop",
            |message| Diagnostic::syntax(message).with_rule("cop-lemma"),
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Config;
    use crate::Tagsets;
    use crate::rules::testing::ids;
    use crate::rules::testing::run_with;
    use crate::rules::testing::sentence;

    /// Creates a configuration for the given language.
    fn config(lang: &str) -> Config {
        Config {
            lang: lang.to_string(),
            ..Default::default()
        }
    }

    /// A sentence with an auxiliary and a copula.
    fn input(aux: &str, cop: &str) -> String {
        let aux = format!("1 it {aux} AUX _ _ 3 aux _ _");
        let cop = format!("2 is {cop} AUX _ _ 3 cop _ _");
        sentence(&[], &[&aux, &cop, "3 fine fine ADJ _ _ 0 root _ _"])
    }

    #[test]
    fn approved_lemmas_pass() {
        let input = input("will", "be");
        assert!(run_with(AuxiliaryLemmaRule, config("en"), Tagsets::unchecked(), &input).is_empty());
        assert!(run_with(CopulaLemmaRule, config("en"), Tagsets::unchecked(), &input).is_empty());
    }

    #[test]
    fn reports_unapproved_lemmas() {
        let input = input("seem", "become");
        let diagnostics = run_with(AuxiliaryLemmaRule, config("en"), Tagsets::unchecked(), &input);
        // Both words are tagged AUX.
        assert_eq!(ids(&diagnostics), ["aux-lemma", "aux-lemma"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 1 Node 1]: [L5 Morpho aux-lemma] 'seem' is not an auxiliary verb in language \
             [en]"
        );

        let diagnostics = run_with(CopulaLemmaRule, config("en"), Tagsets::unchecked(), &input);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 2 Node 2]: [L5 Syntax cop-lemma] 'become' is not a copula in language [en]"
        );
    }

    #[test]
    fn unknown_languages_are_distinct() {
        let input = input("will", "be");
        let diagnostics = run_with(CopulaLemmaRule, config("xx"), Tagsets::unchecked(), &input);
        assert_eq!(
            diagnostics[0].message(),
            "'be' is not a copula in language [xx] (there are no known approved copulas in this \
             language)"
        );

        let diagnostics = run_with(AuxiliaryLemmaRule, config("xx"), Tagsets::unchecked(), &input);
        assert_eq!(
            diagnostics[0].message(),
            "'will' is not an auxiliary verb in language [xx] (there are no known approved \
             auxiliaries in this language)"
        );
    }
}
