//! Module for the validation rules.

use crate::CategorySet;
use crate::Diagnostic;
use crate::Level;
use crate::Visitor;
use crate::util::quoted;

mod character_constraints;
mod column_format;
mod deps_order;
mod empty_values;
mod enhanced_orphan;
mod feature_format;
mod fixed_span;
mod functional_leaves;
mod goeswith_span;
mod graph_structure;
mod head_references;
mod id_sequence;
mod known_tags;
mod left_to_right;
mod lemmas;
mod line_endings;
mod line_structure;
mod misc_attributes;
mod orphan_parent;
mod projective_punctuation;
mod root_relation;
mod sentence_id;
mod single_subject;
mod text_metadata;
mod token_ranges;
mod tree_structure;
mod unicode_normalization;
mod upos_deprel;
mod words_with_spaces;

pub use character_constraints::*;
pub use column_format::*;
pub use deps_order::*;
pub use empty_values::*;
pub use enhanced_orphan::*;
pub use feature_format::*;
pub use fixed_span::*;
pub use functional_leaves::*;
pub use goeswith_span::*;
pub use graph_structure::*;
pub use head_references::*;
pub use id_sequence::*;
pub use known_tags::*;
pub use left_to_right::*;
pub use lemmas::*;
pub use line_endings::*;
pub use line_structure::*;
pub use misc_attributes::*;
pub use orphan_parent::*;
pub use projective_punctuation::*;
pub use root_relation::*;
pub use sentence_id::*;
pub use single_subject::*;
pub use text_metadata::*;
pub use token_ranges::*;
pub use tree_structure::*;
pub use unicode_normalization::*;
pub use upos_deprel::*;
pub use words_with_spaces::*;

/// The diagnostic identifier shared by the sentence-level checks that fail to
/// parse a `DEPS` column.
pub(crate) const INVALID_DEPS_ID: &str = "invalid-deps";

/// Creates the diagnostic for a `DEPS` column that cannot be parsed by a
/// sentence-level check.
pub(crate) fn unparsable_deps(deps: &str, line: usize) -> Diagnostic {
    Diagnostic::format(format!("Failed to parse DEPS: {deps}.", deps = quoted(deps)))
        .with_rule(INVALID_DEPS_ID)
        .with_level(Level::Two)
        .with_line(line)
}

/// A trait implemented by validation rules.
pub trait Rule: Visitor {
    /// The unique identifier for the rule.
    ///
    /// The identifier is required to be pascal case.
    fn id(&self) -> &'static str;

    /// A short, single sentence description of the rule.
    fn description(&self) -> &'static str;

    /// Get the long-form explanation of the rule.
    fn explanation(&self) -> &'static str;

    /// Get the categories of the diagnostics the rule may emit.
    fn categories(&self) -> CategorySet;

    /// Gets the lowest conformance level the rule runs at.
    ///
    /// Parts of a rule may only apply from a higher level.
    fn level(&self) -> Level;

    /// Gets the identifiers of the diagnostics the rule may emit.
    ///
    /// Diagnostic identifiers are kebab case; they are what an `except` list
    /// refers to.
    fn emits(&self) -> &'static [&'static str];
}

/// Gets the default rule set, in the order the rules run.
pub fn rules() -> Vec<Box<dyn Rule>> {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::<LineStructureRule>::default(),
        Box::<ColumnFormatRule>::default(),
        Box::<UnicodeNormalizationRule>::default(),
        Box::<IdSequenceRule>::default(),
        Box::<TokenRangesRule>::default(),
        Box::<LineEndingsRule>::default(),
        Box::<CharacterConstraintsRule>::default(),
        Box::<FeatureFormatRule>::default(),
        Box::<KnownTagsRule>::default(),
        Box::<EmptyValuesRule>::default(),
        Box::<WordsWithSpacesRule>::default(),
        Box::<SentenceIdRule>::default(),
        Box::<TextMetadataRule>::default(),
        Box::<RootRelationRule>::default(),
        Box::<HeadReferencesRule>::default(),
        Box::<DepsOrderRule>::default(),
        Box::<MiscAttributesRule>::default(),
        Box::<TreeStructureRule>::default(),
        Box::<GraphStructureRule>::default(),
        Box::<UposDeprelRule>::default(),
        Box::<LeftToRightRule>::default(),
        Box::<SingleSubjectRule>::default(),
        Box::<OrphanParentRule>::default(),
        Box::<FunctionalLeavesRule>::default(),
        Box::<FixedSpanRule>::default(),
        Box::<GoeswithSpanRule>::default(),
        Box::<ProjectivePunctuationRule>::default(),
        Box::<EnhancedOrphanRule>::default(),
        Box::<AuxiliaryLemmaRule>::default(),
        Box::<CopulaLemmaRule>::default(),
    ];

    // Ensure all the rule ids are unique and pascal case and that no two rules
    // emit the same diagnostic identifier
    #[cfg(debug_assertions)]
    {
        use convert_case::Case;
        use convert_case::Casing;
        let mut set = std::collections::HashSet::new();
        let mut emitted = std::collections::HashMap::new();
        for r in rules.iter() {
            if r.id().to_case(Case::Pascal) != r.id() {
                panic!("rule id `{id}` is not pascal case", id = r.id());
            }

            if !set.insert(r.id()) {
                panic!("duplicate rule id `{id}`", id = r.id());
            }

            for e in r.emits() {
                if e.to_case(Case::Kebab) != *e {
                    panic!("diagnostic id `{e}` of rule `{id}` is not kebab case", id = r.id());
                }

                // The shared `DEPS` parse failure and the reversed interval are
                // reported by more than one rule
                if [INVALID_DEPS_ID, REVERSED_WORD_INTERVAL_ID].contains(e) {
                    continue;
                }

                if let Some(other) = emitted.insert(*e, r.id()) {
                    panic!(
                        "diagnostic id `{e}` is emitted by both `{other}` and `{id}`",
                        id = r.id()
                    );
                }
            }
        }
    }

    rules
}

/// Finds the rule with the given rule identifier or emitted diagnostic
/// identifier, ignoring case.
pub fn find_rule(id: &str) -> Option<Box<dyn Rule>> {
    rules().into_iter().find(|r| {
        r.id().eq_ignore_ascii_case(id) || r.emits().iter().any(|e| e.eq_ignore_ascii_case(id))
    })
}
