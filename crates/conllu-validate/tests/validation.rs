//! Runs whole validation runs over inline CoNLL-U input.

use conllu_validate::BuiltinLexicon;
use conllu_validate::Category;
use conllu_validate::Config;
use conllu_validate::Diagnostic;
use conllu_validate::Level;
use conllu_validate::Rule;
use conllu_validate::Summary;
use conllu_validate::Tagsets;
use conllu_validate::Validator;
use conllu_validate::find_rule;
use pretty_assertions::assert_eq;

/// A valid sentence.
const CATS_RUN: &str = "# sent_id = s1
# text = Cats run.
1\tCats\tcat\tNOUN\t_\tNumber=Plur\t2\tnsubj\t_\t_
2\trun\trun\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No
3\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_

";

/// Builds a sentence with the given identifier from space-separated rows
/// whose forms are joined by spaces for the `# text` comment.
fn sentence(id: &str, rows: &[&str]) -> String {
    let forms: Vec<_> = rows
        .iter()
        .filter_map(|row| row.split(' ').nth(1))
        .collect();
    let mut text = format!("# sent_id = {id}\n# text = {text}\n", text = forms.join(" "));
    for row in rows {
        text.push_str(&row.replace(' ', "\t"));
        text.push('\n');
    }

    text.push('\n');
    text
}

/// Creates a validator for the given configuration.
fn validator(config: Config) -> Validator {
    let lexicon = BuiltinLexicon::new().expect("embedded lemma lists should parse");
    Validator::new(config, Tagsets::unchecked(), Box::new(lexicon))
}

/// Validates one input and returns the summary of the run.
fn check(mut validator: Validator, input: &str) -> Summary {
    validator
        .validate(Some("test.conllu"), input.as_bytes())
        .expect("reading from memory should not fail");
    validator.finish()
}

/// Creates a validator running only the named rule.
fn only(rule: &str) -> Validator {
    let rule: Box<dyn Rule> = find_rule(rule).expect("rule should exist");
    validator(Config::default()).with_rules([rule])
}

/// Gets the diagnostic identifiers of a run.
fn ids(summary: &Summary) -> Vec<&'static str> {
    summary
        .diagnostics()
        .recorded()
        .iter()
        .map(Diagnostic::rule)
        .collect()
}

#[test]
fn well_formed_sentence_passes_level_five() {
    let summary = check(validator(Config::default()), CATS_RUN);
    assert!(summary.passed(), "{:?}", summary.diagnostics().recorded());
    assert!(summary.missing_resources().is_empty());
}

#[test]
fn root_on_a_dependent_is_reported_once() {
    let input = CATS_RUN.replace("2\tpunct", "2\troot");
    let summary = check(validator(Config::default()), &input);
    assert_eq!(ids(&summary), ["root-is-not-0"]);

    let diagnostic = &summary.diagnostics().recorded()[0];
    assert_eq!(diagnostic.category(), Category::Syntax);
    assert_eq!(diagnostic.level(), Level::Two);
    assert_eq!(
        diagnostic.to_string(),
        "[(in test.conllu) Line 5 Sent s1]: [L2 Syntax root-is-not-0] DEPREL cannot be 'root' \
         if HEAD is not 0."
    );
}

#[test]
fn content_checks_continue_after_level_two_findings() {
    // The copula lemma is only checked at level 5, after the misplaced root.
    let input = sentence(
        "s1",
        &[
            "1 it it PRON _ _ 3 nsubj _ _",
            "2 seems seem AUX _ _ 3 cop _ _",
            "3 fine fine ADJ _ _ 0 root _ _",
            "4 ok ok INTJ _ _ 3 root _ _",
        ],
    );
    let config = Config {
        lang: "en".to_string(),
        ..Default::default()
    };
    let summary = check(validator(config), &input);
    assert_eq!(ids(&summary), ["root-is-not-0", "aux-lemma", "cop-lemma"]);
}

#[test]
fn rerunning_a_valid_input_is_idempotent() {
    for _ in 0..2 {
        assert!(check(validator(Config::default()), CATS_RUN).passed());
    }
}

#[test]
fn sentence_ids_are_remembered_across_sentences() {
    let input = format!("{CATS_RUN}{CATS_RUN}");
    let summary = check(validator(Config::default()), &input);
    assert_eq!(ids(&summary), ["non-unique-sent-id"]);
    assert_eq!(
        summary.diagnostics().recorded()[0].location().to_string(),
        "Tree number 2 on line 9"
    );
}

#[test]
fn word_ids_must_form_a_sequence() {
    let valid = sentence("s1", &["1 a a X _ _ 0 root _ _", "2 b b X _ _ 1 dep _ _"]);
    assert!(check(only("IdSequence"), &valid).passed());

    for rows in [
        ["1 a a X _ _ 0 root _ _", "3 b b X _ _ 1 dep _ _"],
        ["2 a a X _ _ 0 root _ _", "1 b b X _ _ 2 dep _ _"],
        ["1 a a X _ _ 0 root _ _", "1 b b X _ _ 1 dep _ _"],
    ] {
        // A gap also leaves the last word out of range.
        let summary = check(only("IdSequence"), &sentence("s1", &rows));
        let sequence = ids(&summary)
            .into_iter()
            .filter(|id| *id == "word-id-sequence")
            .count();
        assert_eq!(sequence, 1, "{rows:?}");
    }
}

#[test]
fn multiword_token_ranges() {
    let valid = sentence(
        "s1",
        &[
            "1-2 del _ _ _ _ _ _ _ _",
            "1 de de ADP _ _ 3 case _ _",
            "2 el el DET _ _ 3 det _ _",
            "3 mar mar NOUN _ _ 0 root _ _",
        ],
    );
    assert!(check(only("TokenRanges"), &valid).passed());
    assert!(check(only("IdSequence"), &valid).passed());

    let overlapping = sentence(
        "s1",
        &[
            "1-2 del _ _ _ _ _ _ _ _",
            "1 de de ADP _ _ 3 case _ _",
            "2-3 lmar _ _ _ _ _ _ _ _",
            "2 el el DET _ _ 3 det _ _",
            "3 mar mar NOUN _ _ 0 root _ _",
        ],
    );
    assert_eq!(
        ids(&check(only("TokenRanges"), &overlapping)),
        ["overlapping-word-intervals"]
    );

    let out_of_range = sentence(
        "s1",
        &[
            "1 de de ADP _ _ 2 case _ _",
            "2-3 lmar _ _ _ _ _ _ _ _",
            "2 mar mar NOUN _ _ 0 root _ _",
        ],
    );
    assert_eq!(
        ids(&check(only("IdSequence"), &out_of_range)),
        ["word-interval-out"]
    );
}

#[test]
fn deps_order() {
    let rows = |deps: &str| {
        let second = format!("2 b b X _ _ 0 root {deps} _");
        sentence(
            "s1",
            &[
                "1 a a X _ _ 2 dep 2:dep _",
                &second,
                "3 c c X _ _ 2 dep 2:dep _",
            ],
        )
    };

    assert!(check(only("DepsOrder"), &rows("0:root|1:dep|3:dep")).passed());
    assert_eq!(
        ids(&check(only("DepsOrder"), &rows("0:root|3:dep|1:dep"))),
        ["unsorted-deps"]
    );
    assert_eq!(
        ids(&check(only("DepsOrder"), &rows("0:root|1:dep|1:dep"))),
        ["repeated-deps"]
    );
}

#[test]
fn tree_builder_outcomes() {
    let valid = sentence(
        "s1",
        &[
            "1 a a X _ _ 0 root _ _",
            "2 b b X _ _ 1 dep _ _",
            "3 c c X _ _ 1 dep _ _",
        ],
    );
    assert!(check(validator(Config::default()), &valid).passed());

    // The nummod would be reported if the tree could be built.
    let self_loop = sentence(
        "s1",
        &[
            "1 a a X _ _ 0 root _ _",
            "2 b b X _ _ 1 dep _ _",
            "3 c c X _ _ 3 nummod _ _",
        ],
    );
    let summary = check(validator(Config::default()), &self_loop);
    assert_eq!(ids(&summary), ["head-self-loop", "skipped-corrupt-tree"]);
}

#[test]
fn single_root_policy() {
    let input = sentence(
        "s1",
        &[
            "1 a a X _ _ 0 root _ _",
            "2 b b X _ _ 0 root _ _",
            "3 c c X _ _ 1 dep _ _",
        ],
    );

    let summary = check(validator(Config::default()), &input);
    assert_eq!(ids(&summary), ["multiple-roots", "skipped-corrupt-tree"]);
    assert_eq!(
        summary.diagnostics().recorded()[0].message(),
        "Multiple root words: [1, 2]"
    );

    let config = Config {
        single_root: false,
        ..Default::default()
    };
    assert!(check(validator(config), &input).passed());
}

#[test]
fn feature_order() {
    let input = |feats: &str| {
        let row = format!("1 he he PRON _ {feats} 0 root _ _");
        sentence("s1", &[&row])
    };

    assert!(check(only("FeatureFormat"), &input("Case=Nom|Number=Sing")).passed());
    assert_eq!(
        ids(&check(only("FeatureFormat"), &input("Number=Sing|Case=Nom"))),
        ["unsorted-features"]
    );
}

#[test]
fn level_one_ignores_content() {
    let input = sentence(
        "s1",
        &["1 a a X _ _ 0 dep _ _", "2 b b X _ _ 1 nummod _ _"],
    );
    let config = Config {
        level: Level::One,
        ..Default::default()
    };
    assert!(check(validator(config), &input).passed());
    assert_eq!(
        ids(&check(validator(Config::default()), &input)),
        ["0-is-not-root", "rel-upos-nummod"]
    );
}

#[test]
fn excepted_diagnostics_are_not_recorded() {
    let input = CATS_RUN.replace("# text = Cats run.\n", "");
    assert_eq!(
        ids(&check(validator(Config::default()), &input)),
        ["missing-text"]
    );

    let config = Config {
        except: ["Missing-Text".to_string()].into(),
        ..Default::default()
    };
    assert!(check(validator(config), &input).passed());
}

#[test]
fn enhanced_orphan_markers_persist_across_inputs() {
    let empty_node = sentence(
        "s1",
        &[
            "1 Mary Mary PROPN _ _ 2 nsubj 2:nsubj _",
            "2 won win VERB _ _ 0 root 0:root _",
            "3 gold gold NOUN _ _ 2 obj 2:obj _",
            "4 Peter Peter PROPN _ _ 2 conj 4.1:nsubj _",
            "4.1 won win VERB _ _ _ _ 2:conj _",
            "5 bronze bronze NOUN _ _ 4 orphan 4.1:obj _",
        ],
    );
    let orphan = sentence(
        "s2",
        &[
            "1 Mary Mary PROPN _ _ 2 nsubj 2:nsubj _",
            "2 won win VERB _ _ 0 root 0:root _",
            "3 gold gold NOUN _ _ 2 obj 2:obj _",
            "4 Peter Peter PROPN _ _ 2 conj 2:conj _",
            "5 bronze bronze NOUN _ _ 4 orphan 4:orphan _",
        ],
    );

    let mut validator = only("EnhancedOrphan");
    validator
        .validate(Some("a.conllu"), empty_node.as_bytes())
        .expect("reading from memory should not fail");
    validator
        .validate(Some("b.conllu"), orphan.as_bytes())
        .expect("reading from memory should not fail");

    let summary = validator.finish();
    assert_eq!(ids(&summary), ["eorphan-after-empty-node"]);
    assert_eq!(
        summary.diagnostics().recorded()[0].to_string(),
        "[(in b.conllu) Line 7 Sent s2 Node 5]: [L3 Enhanced eorphan-after-empty-node] 'orphan' \
         not allowed in enhanced graph because we saw an empty node on line 7"
    );
}
