//! A rule for line terminators.

use crate::Category;
use crate::CategorySet;
use crate::Context;
use crate::Diagnostic;
use crate::Level;
use crate::Rule;
use crate::Session;
use crate::StreamEnd;
use crate::Visitor;

/// The identifier for the line endings rule.
const ID: &str = "LineEndings";

/// Creates a "non-unix newline" diagnostic.
fn non_unix_newline(line: usize) -> Diagnostic {
    Diagnostic::format("Only the unix-style LF line terminator is allowed.")
        .with_rule("non-unix-newline")
        .with_level(Level::One)
        .with_line(line)
}

/// Detects line terminators other than `\n`.
#[derive(Default, Debug, Clone, Copy)]
pub struct LineEndingsRule;

impl Rule for LineEndingsRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that every line ends with a unix-style line feed."
    }

    fn explanation(&self) -> &'static str {
        "Lines must be terminated by a single LF character. Files saved with Windows-style CRLF \
         terminators are reported once per input, after the whole input was read."
    }

    fn categories(&self) -> CategorySet {
        CategorySet::new(&[Category::Format])
    }

    fn level(&self) -> Level {
        Level::One
    }

    fn emits(&self) -> &'static [&'static str] {
        &["non-unix-newline"]
    }
}

impl Visitor for LineEndingsRule {
    fn finish(&mut self, state: &mut Session, _: &Context<'_>, end: &StreamEnd) {
        if end.line_endings.has_non_unix() {
            state.add(non_unix_newline(end.lines));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::testing::ids;
    use crate::rules::testing::run;

    #[test]
    fn reports_crlf_once() {
        let input = "# text = a\r\n1\ta\ta\tX\t_\t_\t0\troot\t_\t_\r\n\r\n";
        let diagnostics = run(LineEndingsRule, input);
        assert_eq!(ids(&diagnostics), ["non-unix-newline"]);
        assert_eq!(
            diagnostics[0].to_string(),
            "[Line 3]: [L1 Format non-unix-newline] Only the unix-style LF line terminator is \
             allowed."
        );
    }

    #[test]
    fn lf_passes() {
        let input = "1\ta\ta\tX\t_\t_\t0\troot\t_\t_\n\n";
        assert!(run(LineEndingsRule, input).is_empty());
    }
}
