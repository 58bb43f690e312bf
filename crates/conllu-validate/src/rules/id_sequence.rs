//! A rule for the sequence of token identifiers within a sentence.

use conllu_grammar::Sentence;
use conllu_grammar::TokenId;
use itertools::Itertools;

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Location;
use crate::Rule;
use crate::Session;
use crate::Visitor;
use crate::util::quoted;

/// The identifier for the identifier sequence rule.
const ID: &str = "IdSequence";

/// The diagnostic identifier for a token interval that ends before it starts.
///
/// This is also reported by the token ranges rule.
pub(crate) const REVERSED_WORD_INTERVAL_ID: &str = "reversed-word-interval";

/// Creates an identifier sequence diagnostic.
fn id_sequence(rule: &'static str, message: String, location: Location) -> Diagnostic {
    Diagnostic::format(message)
        .with_rule(rule)
        .with_level(Level::One)
        .with_location(location)
}

/// A token interval: an explicit multiword token range or the implicit
/// interval of a single word.
#[derive(Debug, Clone, Copy)]
struct Interval {
    /// The first word of the interval.
    begin: u32,
    /// The last word of the interval.
    end: u32,
    /// The line of the multiword token row, if the interval is explicit.
    line: Option<usize>,
}

/// Detects word, multiword token and empty node identifiers out of sequence.
#[derive(Default, Debug, Clone, Copy)]
pub struct IdSequenceRule;

impl Rule for IdSequenceRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that words are numbered 1 to N and that ranges and empty nodes are in place."
    }

    fn explanation(&self) -> &'static str {
        "The syntactic words of a sentence are numbered 1, 2, ..., N in file order. A multiword \
         token range `b-e` must immediately precede its first word and must lie within 1..N. \
         The empty nodes following word `w` are numbered `w.1`, `w.2` and so on; empty nodes \
         before the first word are numbered `0.1`, `0.2`."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::One
    }

    fn emits(&self) -> &'static [&'static str] {
        &[
            "misplaced-word-interval",
            "misplaced-empty-node",
            "word-id-sequence",
            REVERSED_WORD_INTERVAL_ID,
            "word-interval-out",
        ]
    }
}

impl Visitor for IdSequenceRule {
    fn sentence(&mut self, state: &mut Session, _: &Context<'_>, sentence: &Sentence) {
        let mut words: Vec<u32> = Vec::new();
        let mut intervals: Vec<Interval> = Vec::new();
        let mut current_word = 0;
        let mut next_empty = 1;

        for row in sentence.rows() {
            if !row.id().is_empty_node() {
                next_empty = 1;
            }

            match row.id() {
                TokenId::Word(id) => {
                    current_word = id;
                    words.push(id);
                    let covered = intervals
                        .last()
                        .is_some_and(|last| last.begin <= id && last.end >= id);
                    if !covered {
                        intervals.push(Interval {
                            begin: id,
                            end: id,
                            line: None,
                        });
                    }
                }
                TokenId::Range(begin, end) => {
                    let in_place = match words.last() {
                        Some(last) => begin > *last,
                        None => begin >= 1,
                    };
                    if !in_place {
                        state.add(id_sequence(
                            "misplaced-word-interval",
                            "Multiword range not before its first word.".to_string(),
                            Location::Line(row.line()),
                        ));
                        continue;
                    }

                    intervals.push(Interval {
                        begin,
                        end,
                        line: Some(row.line()),
                    });
                }
                TokenId::Empty(word, index) => {
                    if word != current_word || index != next_empty {
                        state.add(id_sequence(
                            "misplaced-empty-node",
                            format!(
                                "Empty node id {id}, expected {current_word}.{next_empty}",
                                id = row.id()
                            ),
                            Location::Line(row.line()),
                        ));
                    }

                    next_empty += 1;
                }
                TokenId::Invalid => {}
            }
        }

        let found = words.iter().join(",");
        let expected = (1..=words.len()).join(",");
        if found != expected {
            state.add(id_sequence(
                "word-id-sequence",
                format!(
                    "Words do not form a sequence. Got {found}. Expected {expected}.",
                    found = quoted(&found),
                    expected = quoted(&expected)
                ),
                state.tree_location(),
            ));
        }

        let count = words.len();
        for interval in intervals {
            let location = interval
                .line
                .map(Location::Line)
                .unwrap_or_else(|| state.tree_location());
            let Interval { begin, end, .. } = interval;
            if end < begin {
                state.add(id_sequence(
                    REVERSED_WORD_INTERVAL_ID,
                    format!("Spurious token interval {begin}-{end}"),
                    location,
                ));
                continue;
            }

            if begin < 1 || usize::try_from(end).map_or(true, |end| end > count) {
                state.add(id_sequence(
                    "word-interval-out",
                    format!("Spurious token interval {begin}-{end} (out of range)"),
                    location,
                ));
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
    fn consecutive_words_pass() {
        let input = sentence(
            &[],
            &[
                "1-2 don't _ _ _ _ _ _ _ _",
                "1 do do AUX _ _ 0 root _ _",
                "2 n't not PART _ _ 1 advmod _ _",
                "2.1 x x X _ _ _ _ 1:dep _",
                "2.2 y y X _ _ _ _ 1:dep _",
                "3 . . PUNCT _ _ 1 punct _ _",
            ],
        );
        assert!(run(IdSequenceRule, &input).is_empty());
    }

    #[test]
    fn reports_a_gap_in_the_words() {
        let input = sentence(
            &[],
            &["1 a a X _ _ 0 root _ _", "3 b b X _ _ 1 dep _ _"],
        );
        let diagnostics = run(IdSequenceRule, &input);
        assert_eq!(ids(&diagnostics), ["word-id-sequence", "word-interval-out"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Tree number 1 on line 1]: [L1 Format word-id-sequence] Words do not form a \
             sequence. Got '1,3'. Expected '1,2'."
        );
    }

    #[test]
    fn reports_misplaced_ranges_and_empty_nodes() {
        let input = sentence(
            &[],
            &[
                "1 a a X _ _ 0 root _ _",
                "1-2 ab _ _ _ _ _ _ _ _",
                "2 b b X _ _ 1 dep _ _",
                "2.2 x x X _ _ _ _ 1:dep _",
                "3-2 c _ _ _ _ _ _ _ _",
                "3 c c X _ _ 1 dep _ _",
            ],
        );
        let diagnostics = run(IdSequenceRule, &input);
        assert_eq!(
            ids(&diagnostics),
            [
                "misplaced-word-interval",
                "misplaced-empty-node",
                "reversed-word-interval"
            ]
        );
        assert_eq!(diagnostics[1].message(), "Empty node id 2.2, expected 2.1");
        assert_eq!(diagnostics[2].location(), &Location::Line(5));
    }

    #[test]
    fn reports_ranges_beyond_the_last_word() {
        let input = sentence(
            &[],
            &["1-2 ab _ _ _ _ _ _ _ _", "1 a a X _ _ 0 root _ _"],
        );
        let diagnostics = run(IdSequenceRule, &input);
        assert_eq!(ids(&diagnostics), ["word-interval-out"]);
        assert_eq!(
            diagnostics[0].message(),
            "Spurious token interval 1-2 (out of range)"
        );
    }
}
