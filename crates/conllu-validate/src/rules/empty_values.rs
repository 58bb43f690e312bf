//! A rule for columns that must be left empty.

use conllu_grammar::Column;
use conllu_grammar::TokenId;
use conllu_grammar::TokenRow;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the empty values rule.
const ID: &str = "EmptyValues";

/// The columns a multiword token leaves empty.
const MULTIWORD_EMPTY_COLUMNS: [Column; 7] = [
    Column::Lemma,
    Column::Upos,
    Column::Xpos,
    Column::Feats,
    Column::Head,
    Column::Deprel,
    Column::Deps,
];

/// The columns an empty node leaves empty.
const EMPTY_NODE_EMPTY_COLUMNS: [Column; 2] = [Column::Head, Column::Deprel];

/// Detects multiword tokens and empty nodes with values in columns they must
/// leave empty.
#[derive(Default, Debug, Clone, Copy)]
pub struct EmptyValuesRule;

impl Rule for EmptyValuesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that multiword tokens and empty nodes leave their unused columns empty."
    }

    fn explanation(&self) -> &'static str {
        "A multiword token only has a FORM and MISC; all annotation belongs to the words it \
         contains, so LEMMA through DEPS must be `_`. An empty node takes part in the enhanced \
         graph only, so its HEAD and DEPREL must be `_`."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::Two
    }

    fn emits(&self) -> &'static [&'static str] {
        &["mwt-nonempty-field", "empty-node-nonempty-field"]
    }
}

impl Visitor for EmptyValuesRule {
    fn row(&mut self, state: &mut Session, _: &Context<'_>, row: &TokenRow) {
        let (columns, rule, kind): (&[Column], _, _) = match row.id() {
            TokenId::Range(..) => (
                &MULTIWORD_EMPTY_COLUMNS,
                "mwt-nonempty-field",
                "A multi-word token line",
            ),
            TokenId::Empty(..) => (
                &EMPTY_NODE_EMPTY_COLUMNS,
                "empty-node-nonempty-field",
                "An empty node",
            ),
            _ => return,
        };

        let Some(record) = row.record() else {
            return;
        };

        for column in columns {
            let value = record.get(*column);
            if value != "_" {
                state.add(
                    Diagnostic::format(format!(
                        "{kind} must have '_' in the column {column}. Now: {value}.",
                        value = quoted(value)
                    ))
                    .with_rule(rule)
                    .with_level(Level::Two)
                    .with_line(row.line()),
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
    fn reports_annotated_multiword_tokens_and_empty_nodes() {
        let input = sentence(
            &[],
            &[
                "1-2 du de _ _ _ _ _ _ SpaceAfter=No",
                "1 de de ADP _ _ 2 case _ _",
                "2 le le DET _ _ 0 root _ _",
                "2.1 x x X _ _ 2 dep 2:dep _",
            ],
        );
        let diagnostics = run(EmptyValuesRule, &input);
        assert_eq!(
            ids(&diagnostics),
            [
                "mwt-nonempty-field",
                "empty-node-nonempty-field",
                "empty-node-nonempty-field",
            ]
        );
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 1]: [L2 Format mwt-nonempty-field] A multi-word token line must have '_' in \
             the column LEMMA. Now: 'de'."
        );
        assert_eq!(
            diagnostics[2].message(),
            "An empty node must have '_' in the column DEPREL. Now: 'dep'."
        );
    }
}
