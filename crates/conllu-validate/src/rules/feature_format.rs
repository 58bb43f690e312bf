//! A rule for the format of morphological features.

use std::collections::HashSet;
use std::sync::LazyLock;

use conllu_grammar::TokenId;
use conllu_grammar::TokenRow;
use regex::Regex;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::tagset::FEATS_FILE;
use crate::util::quoted;

/// The identifier for the feature format rule.
const ID: &str = "FeatureFormat";

/// Matches a well-formed `Feature=Value[,Value]*` entry.
static FEATURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(
        r"^([A-Z0-9][A-Z0-9a-z]*(?:\[[a-z0-9]+\])?)=(([A-Z0-9][A-Z0-9a-z]*)(,([A-Z0-9][A-Z0-9a-z]*))*)$",
    )
    .unwrap()
});

/// Matches the start of a well-formed feature value.
static VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: this is checked statically with tests to always unwrap.
    Regex::new(r"^[A-Z0-9][A-Z0-9a-z]*").unwrap()
});

/// Creates a feature format diagnostic.
fn feature_format(rule: &'static str, message: String, level: Level, line: usize) -> Diagnostic {
    Diagnostic::morpho(message)
        .with_rule(rule)
        .with_level(level)
        .with_line(line)
}

/// Determines if values are sorted, ignoring case.
fn is_sorted_ignoring_case(values: &[&str]) -> bool {
    values
        .windows(2)
        .all(|pair| pair[0].to_lowercase() <= pair[1].to_lowercase())
}

/// Detects malformed, unsorted and repeated morphological features.
///
/// From level 4, feature-value pairs must also be known.
#[derive(Default, Debug, Clone, Copy)]
pub struct FeatureFormatRule;

impl Rule for FeatureFormatRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that FEATS is a sorted list of well-formed feature-value pairs."
    }

    fn explanation(&self) -> &'static str {
        "FEATS is either `_` or a `|`-separated list of `Feature=Value` pairs sorted \
         alphabetically by feature, ignoring case. A feature occurs at most once; multiple \
         values of one feature are joined by commas, sorted and not repeated. Feature names \
         and values start with an upper case ASCII letter or digit and continue with ASCII \
         letters and digits; a feature name may end with a layer in brackets, as in \
         `Number[psor]=Sing`. At level 4, every pair must be listed in the feature-value set \
         of the language."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Morpho])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "unsorted-features",
            "invalid-feature",
            "repeated-feature",
            "repeated-feature-value",
            "unsorted-feature-values",
            "invalid-feature-value",
            "unknown-feature-value",
        ]
    }
}

impl Visitor for FeatureFormatRule {
    fn row(&mut self, state: &mut Session, ctx: &Context<'_>, row: &TokenRow) {
        if !matches!(row.id(), TokenId::Word(_) | TokenId::Empty(..)) {
            return;
        }

        let Some(record) = row.record() else {
            return;
        };

        let feats = record.feats;
        if feats == "_" {
            return;
        }

        let line = row.line();
        let features: Vec<&str> = record.features().collect();
        if !is_sorted_ignoring_case(&features) {
            state.add(feature_format(
                "unsorted-features",
                format!(
                    "Morphological features must be sorted: {feats}.",
                    feats = quoted(feats)
                ),
                Level::Two,
                line,
            ));
        }

        let known = ctx.tagsets.feats().filter(|_| ctx.config.level >= Level::Four);
        let mut names = HashSet::new();
        for feature in &features {
            let Some(captures) = FEATURE_REGEX.captures(feature) else {
                state.add(feature_format(
                    "invalid-feature",
                    format!(
                        "Spurious morphological feature: {feature}. Should be of the form \
                         Feature=Value and must start with [A-Z0-9] and only contain \
                         [A-Za-z0-9].",
                        feature = quoted(feature)
                    ),
                    Level::Two,
                    line,
                ));
                names.insert(*feature);
                continue;
            };

            let (Some(name), Some(values)) = (captures.get(1), captures.get(2)) else {
                continue;
            };

            let name = name.as_str();
            names.insert(name);
            let values: Vec<&str> = values.as_str().split(',').collect();
            if values.iter().collect::<HashSet<_>>().len() != values.len() {
                state.add(feature_format(
                    "repeated-feature-value",
                    format!(
                        "Repeated feature values are disallowed: {feats}",
                        feats = quoted(feats)
                    ),
                    Level::Two,
                    line,
                ));
            }

            if !is_sorted_ignoring_case(&values) {
                state.add(feature_format(
                    "unsorted-feature-values",
                    format!(
                        "If a feature has multiple values, these must be sorted: {feature}",
                        feature = quoted(feature)
                    ),
                    Level::Two,
                    line,
                ));
            }

            for value in values {
                if !VALUE_REGEX.is_match(value) {
                    state.add(feature_format(
                        "invalid-feature-value",
                        format!(
                            "Spurious value {value} in {feature}. Must start with [A-Z0-9] and \
                             only contain [A-Za-z0-9].",
                            value = quoted(value),
                            feature = quoted(feature)
                        ),
                        Level::Two,
                        line,
                    ));
                }

                if let Some(known) = known {
                    if !known.contains(&format!("{name}={value}")) {
                        state.hint_missing(FEATS_FILE);
                        state.add(feature_format(
                            "unknown-feature-value",
                            format!(
                                "Unknown feature-value pair {name}={value}.",
                                value = quoted(value)
                            ),
                            Level::Four,
                            line,
                        ));
                    }
                }
            }
        }

        if names.len() != features.len() {
            state.add(feature_format(
                "repeated-feature",
                format!(
                    "Repeated features are disallowed: {feats}.",
                    feats = quoted(feats)
                ),
                Level::Two,
                line,
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

    #[test]
    fn regexes_compile() {
        assert!(FEATURE_REGEX.is_match("Number[psor]=Plur,Sing"));
        assert!(!FEATURE_REGEX.is_match("number=Sing"));
        assert!(VALUE_REGEX.is_match("Sing"));
    }

    #[test]
    fn features_must_be_sorted() {
        let input = sentence(&[], &["1 a a NOUN _ Number=Sing|Case=Nom 0 root _ _"]);
        let diagnostics = run(FeatureFormatRule, &input);
        assert_eq!(ids(&diagnostics), ["unsorted-features"]);
        assert_eq!(
            diagnostics[0].message(),
            "Morphological features must be sorted: 'Number=Sing|Case=Nom'."
        );

        let input = sentence(&[], &["1 a a NOUN _ Case=Nom|Number=Sing 0 root _ _"]);
        assert!(run(FeatureFormatRule, &input).is_empty());
    }

    #[test]
    fn reports_malformed_and_repeated_features() {
        let input = sentence(
            &[],
            &[
                "1 a a NOUN _ Case=Nom|Gender=masc|Number=Sing 0 root _ _",
                "2 b b NOUN _ Case=Nom,Acc|Number=Sing,Sing 1 dep _ _",
                "3 c c NOUN _ Case=Gen|Case=Nom 1 dep _ _",
            ],
        );
        let diagnostics = run(FeatureFormatRule, &input);
        assert_eq!(
            ids(&diagnostics),
            [
                "invalid-feature",
                "unsorted-feature-values",
                "repeated-feature-value",
                "repeated-feature",
            ]
        );
        assert_eq!(
            diagnostics[1].message(),
            "If a feature has multiple values, these must be sorted: 'Case=Nom,Acc'"
        );
    }

    #[test]
    fn unknown_pairs_are_reported_from_level_four() {
        let tagsets = || Tagsets::unchecked().with_feats(["Case=Nom"]);
        let input = sentence(&[], &["1 a a NOUN _ Case=Nom|Number=Sing 0 root _ _"]);

        let diagnostics = run_with(FeatureFormatRule, Config::default(), tagsets(), &input);
        assert_eq!(ids(&diagnostics), ["unknown-feature-value"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 1]: [L4 Morpho unknown-feature-value] Unknown feature-value pair \
             Number='Sing'."
        );

        let config = Config {
            level: Level::Three,
            ..Default::default()
        };
        assert!(run_with(FeatureFormatRule, config, tagsets(), &input).is_empty());
    }
}
