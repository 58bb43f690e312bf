//! Implementation of the `explain` subcommand.

use clap::Parser;
use colored::Colorize;
use conllu_validate::Category;
use conllu_validate::Rule;
use conllu_validate::find_rule;
use conllu_validate::rules;
use strum::VariantArray as _;

/// Arguments for the `explain` subcommand.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = list_all_rules())]
pub struct Args {
    /// The name of the rule or diagnostic to explain.
    #[arg(required = true)]
    pub rule_name: String,
}

/// Lists the rules grouped by the first category they report under.
pub fn list_all_rules() -> String {
    let rules = rules();
    let mut result = "Available rules:".to_owned();
    for category in Category::VARIANTS {
        let mut ids = rules
            .iter()
            .filter(|rule| rule.categories().iter().next() == Some(*category))
            .map(|rule| rule.id())
            .peekable();
        if ids.peek().is_none() {
            continue;
        }

        result.push_str(&format!("\n  {category}:"));
        for id in ids {
            result.push_str(&format!("\n    - {id}"));
        }
    }
    result
}

/// Renders a rule for the terminal.
pub fn pretty_print_rule(rule: &dyn Rule) -> String {
    let mut result = format!("{}", rule.id().bold().underline());
    result = format!("{}\n{}", result, rule.description());
    result = format!(
        "{}\n{}",
        result,
        format!("{} (level {})", rule.categories(), rule.level()).yellow()
    );
    result = format!("{}\n\n{}", result, rule.explanation());
    format!(
        "{}\n\nDiagnostics: {}",
        result,
        rule.emits().join(", ").cyan()
    )
}

/// Performs the `explain` subcommand.
pub fn explain(args: Args) -> anyhow::Result<()> {
    let name = args.rule_name;

    match find_rule(&name) {
        Some(rule) => {
            println!("{}", pretty_print_rule(&*rule));
        }
        None => {
            println!("{}", list_all_rules());
            anyhow::bail!("No rule or diagnostic found with the name '{}'", name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule() {
        let listing = list_all_rules();
        for rule in rules() {
            let entry = format!("- {id}", id = rule.id());
            assert!(listing.lines().any(|line| line.trim() == entry), "{entry}");
        }
    }

    #[test]
    fn prints_the_emitted_diagnostics() {
        colored::control::set_override(false);
        let rule = find_rule("unsorted-deps").expect("the diagnostic should be known");
        let text = pretty_print_rule(&*rule);
        assert!(text.starts_with("DepsOrder\n"));
        assert!(text.contains("[Format, Enhanced] (level 2)"));
        assert!(text.contains("unsorted-deps, unsorted-deps-2, repeated-deps, deps-self-loop"));
    }
}
