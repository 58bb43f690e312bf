//! A rule for the words of `fixed` expressions.

use conllu_grammar::Tree;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;

/// The identifier for the `fixed` span rule.
const ID: &str = "FixedSpan";

/// Reserves the check that `fixed` expressions are contiguous.
///
/// The check is disabled: Swedish and Coptic have discontiguous fixed
/// expressions, so a gap is not an error. The rule stays registered so that
/// its diagnostic identifier remains known to `except` lists and `explain`.
#[derive(Default, Debug, Clone, Copy)]
pub struct FixedSpanRule;

impl Rule for FixedSpanRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Reserved check that `fixed` expressions do not skip words (disabled)."
    }

    fn explanation(&self) -> &'static str {
        "Like `goeswith`, a `fixed` expression should not skip words that are not part of it, \
         although punctuation may intervene. Counterexamples from several languages show that \
         fixed expressions can be discontiguous, so this check currently never reports \
         anything."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Syntax])
    }

    fn level(&self) -> Level {
        Level::Three
    }

    fn emits(&self) -> &'static [&'static str] {
        &["fixed-gap"]
    }
}

impl Visitor for FixedSpanRule {
    fn tree(&mut self, _: &mut Session, _: &Context<'_>, _: &Tree<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::run;
    use crate::rules::testing::sentence;

    #[test]
    fn never_fires() {
        let input = sentence(
            &[],
            &[
                "1 as as ADP _ _ 5 case _ _",
                "2 it it PRON _ _ 5 nsubj _ _",
                "3 well well ADV _ _ 1 fixed _ _",
                "4 were be AUX _ _ 5 cop _ _",
                "5 good good ADJ _ _ 0 root _ _",
            ],
        );
        assert!(run(FixedSpanRule, &input).is_empty());
    }
}
