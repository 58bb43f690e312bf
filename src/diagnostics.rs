//! Utilities for reporting diagnostics to the terminal.

use std::fmt::Write as _;

use colored::Colorize;
use conllu_validate::Diagnostic;
use conllu_validate::Report;
use conllu_validate::Summary;

/// Renders a report delivered while validating.
pub fn render_report(report: Report<'_>, color: bool) -> String {
    match report {
        Report::Diagnostic(diagnostic) => render_diagnostic(diagnostic, color),
        Report::Suppressed(category) => {
            let notice = format!("...suppressing further errors regarding {category}");
            if color {
                notice.dimmed().to_string()
            } else {
                notice
            }
        }
    }
}

/// Renders a diagnostic on one line.
pub fn render_diagnostic(diagnostic: &Diagnostic, color: bool) -> String {
    if !color {
        return diagnostic.to_string();
    }

    format!(
        "[{origin}]: [{classification}] {message}",
        origin = diagnostic.origin().bold(),
        classification = diagnostic.classification().red(),
        message = diagnostic.message()
    )
}

/// Renders the closing summary of a run.
pub fn render_summary(summary: &Summary, color: bool) -> String {
    if summary.passed() {
        let passed = "*** PASSED ***";
        return if color {
            passed.green().bold().to_string()
        } else {
            passed.to_string()
        };
    }

    let mut text = String::new();
    for (category, count) in summary.diagnostics().counts() {
        let _ = writeln!(text, "{category} errors: {count}");
    }

    let total = summary.diagnostics().total();
    let failed = format!(
        "*** FAILED *** with {total} error{s}",
        s = if total == 1 { "" } else { "s" }
    );
    if color {
        text.push_str(&failed.red().bold().to_string());
    } else {
        text.push_str(&failed);
    }

    let missing = summary.missing_resources();
    if !missing.is_empty() {
        text.push_str(
            "\nThe following files are missing and may explain some of the errors above:",
        );
        for location in missing {
            let _ = write!(text, "\n  {location}");
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use conllu_validate::BuiltinLexicon;
    use conllu_validate::Category;
    use conllu_validate::Config;
    use conllu_validate::Tagsets;
    use conllu_validate::Validator;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Validates an input without a reporter.
    fn summarize(input: &str) -> Summary {
        let lexicon = BuiltinLexicon::new().expect("embedded lemma lists should parse");
        let mut validator =
            Validator::new(Config::default(), Tagsets::unchecked(), Box::new(lexicon));
        validator
            .validate(None, input.as_bytes())
            .expect("reading from memory should not fail");
        validator.finish()
    }

    #[test]
    fn renders_suppression_notices() {
        assert_eq!(
            render_report(Report::Suppressed(Category::Syntax), false),
            "...suppressing further errors regarding Syntax"
        );
    }

    #[test]
    fn renders_failures_with_counts() {
        let summary = summarize(
            "# sent_id = 1\n# text = Hi\n1\tHi\thi\tINTJ\t_\t_\t0\troot\t_\tSpaceAfter=No\n",
        );
        assert_eq!(
            render_summary(&summary, false),
            "Format errors: 1\n*** FAILED *** with 1 error"
        );
    }

    #[test]
    fn renders_passes() {
        assert_eq!(render_summary(&summarize(""), false), "*** PASSED ***");
    }
}
