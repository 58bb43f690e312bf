//! Implementation of the `check` subcommand.

use std::fs::File;
use std::io::BufReader;
use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use conllu_validate::BuiltinLexicon;
use conllu_validate::Config as ValidatorConfig;
use conllu_validate::DEFAULT_MAX_ERR;
use conllu_validate::DataDir;
use conllu_validate::Level;
use conllu_validate::Tagsets;
use conllu_validate::UNIVERSAL_LANGUAGE;
use conllu_validate::Validator;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::diagnostics::render_report;
use crate::diagnostics::render_summary;

/// The file name that stands for standard input.
const STDIN: &str = "-";

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct CheckArgs {
    /// The CoNLL-U files to validate; `-` or no file reads standard input.
    #[clap(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// The conformance level to validate against (1 to 5).
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<i64>,

    /// The language code of the treebank (such as `cs`).
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Allows more than one word to be attached to the root.
    #[arg(long)]
    pub multiple_roots: bool,

    /// Skips comparing the `# text` comment with the word forms.
    #[arg(long)]
    pub no_tree_text: bool,

    /// Skips reporting missing `SpaceAfter=No` attributes.
    #[arg(long)]
    pub no_space_after: bool,

    /// How many diagnostics of one category are reported; `0` reports all.
    #[arg(long, value_name = "COUNT")]
    pub max_err: Option<usize>,

    /// The directory holding the tag set files.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Excepts (ignores) a diagnostic.
    ///
    /// Repeat the flag multiple times to except multiple diagnostics. This is
    /// additive with exceptions found in config files.
    #[clap(short, long, value_name = "ID",
        action = clap::ArgAction::Append,
        num_args = 1,
    )]
    pub except: Vec<String>,

    /// The configuration file to read instead of `udcheck.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disables color output.
    #[arg(long)]
    pub no_color: bool,

    /// Prints nothing and only reports through the exit status.
    #[arg(long)]
    pub silent: bool,
}

impl CheckArgs {
    /// Applies the configuration from the given config file to the command line
    /// arguments.
    pub fn apply(mut self, config: Config) -> Self {
        self.level = self.level.or(config.check.level);
        self.lang = self.lang.or(config.check.lang);
        self.multiple_roots = self.multiple_roots || config.check.multiple_roots;
        self.no_tree_text = self.no_tree_text || config.check.no_tree_text;
        self.no_space_after = self.no_space_after || config.check.no_space_after;
        self.max_err = self.max_err.or(config.check.max_err);
        self.data_dir = self.data_dir.or(config.common.data_dir);
        self.except = self
            .except
            .into_iter()
            .chain(config.check.except)
            .collect();
        self.no_color = self.no_color || !config.common.color;
        self.silent = self.silent || config.check.silent;
        self
    }

    /// Builds the validator configuration from the arguments.
    pub fn validator_config(&self) -> ValidatorConfig {
        let level = match self.level {
            Some(level) if level < i64::from(Level::MIN.number()) => {
                warn!(requested = level, "raising the level to {min}", min = Level::MIN);
                Level::MIN
            }
            Some(level) => Level::from(level),
            None => Level::default(),
        };

        ValidatorConfig {
            level,
            lang: self
                .lang
                .clone()
                .unwrap_or_else(|| UNIVERSAL_LANGUAGE.to_string()),
            single_root: !self.multiple_roots,
            check_tree_text: !self.no_tree_text,
            check_space_after: !self.no_space_after,
            max_err: self.max_err.unwrap_or(DEFAULT_MAX_ERR),
            except: self.except.iter().cloned().collect(),
        }
    }
}

/// Performs the `check` subcommand.
pub fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let config = Config::load(args.config.as_deref())?;
    let args = args.apply(config);
    let validator_config = args.validator_config().normalize();

    let tagsets = match &args.data_dir {
        Some(dir) => {
            info!(
                dir = %dir.display(),
                lang = %validator_config.lang,
                "loading tag sets"
            );
            Tagsets::load(&DataDir::new(dir), &validator_config.lang).with_context(|| {
                format!(
                    "failed to load tag sets from `{dir}`",
                    dir = dir.display()
                )
            })?
        }
        None => {
            warn!("no data directory was given: tags and relations will not be checked");
            Tagsets::unchecked()
        }
    };
    let lexicon = BuiltinLexicon::new().context("failed to load the built-in lemma lists")?;

    let color = !args.no_color && std::io::stderr().is_terminal();
    let mut validator = Validator::new(validator_config, tagsets, Box::new(lexicon));
    if !args.silent {
        validator = validator.with_reporter(move |report| {
            eprintln!("{}", render_report(report, color));
        });
    }

    let mut files = args.files;
    if files.is_empty() {
        files.push(PathBuf::from(STDIN));
    }

    // Inputs are only named in diagnostics when there are several of them.
    let named = files.len() > 1;
    for file in &files {
        let result = if file.as_os_str() == STDIN {
            validator.validate(None, std::io::stdin().lock())
        } else {
            let f = File::open(file)
                .with_context(|| format!("failed to open `{file}`", file = file.display()))?;
            let name = named.then(|| file.display().to_string());
            validator.validate(name.as_deref(), BufReader::new(f))
        };

        // The failure was recorded by the validator; the remaining files are
        // still checked.
        if let Err(e) = result {
            warn!("stopped reading `{file}`: {e}", file = file.display());
        }
    }

    let summary = validator.finish();
    if !args.silent {
        eprintln!("{}", render_summary(&summary, color));
    }

    Ok(if summary.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::CheckConfig;
    use crate::config::CommonConfig;

    #[test]
    fn arguments_win_over_the_config_file() {
        let args = CheckArgs {
            level: Some(2),
            except: vec!["missing-text".to_string()],
            ..Default::default()
        };
        let config = Config {
            check: CheckConfig {
                level: Some(4),
                lang: Some("cs".to_string()),
                no_tree_text: true,
                except: vec!["unsorted-deps".to_string()],
                ..Default::default()
            },
            common: CommonConfig {
                color: false,
                data_dir: Some(PathBuf::from("data")),
            },
        };

        let args = args.apply(config);
        assert_eq!(args.level, Some(2));
        assert_eq!(args.lang.as_deref(), Some("cs"));
        assert!(args.no_tree_text);
        assert!(args.no_color);
        assert_eq!(args.except, ["missing-text", "unsorted-deps"]);
        assert_eq!(args.data_dir, Some(PathBuf::from("data")));
    }

    #[test]
    fn builds_the_validator_config() {
        let args = CheckArgs {
            level: Some(0),
            multiple_roots: true,
            max_err: Some(0),
            ..Default::default()
        };

        let config = args.validator_config();
        assert_eq!(config.level, Level::One);
        assert_eq!(config.lang, "ud");
        assert!(!config.single_root);
        assert!(config.check_tree_text);
        assert_eq!(config.max_err, 0);

        let config = CheckArgs::default().validator_config();
        assert_eq!(config, ValidatorConfig::default());
    }
}
