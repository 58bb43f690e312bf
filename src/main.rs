//! The udcheck command line tool.

use std::io::IsTerminal;
use std::io::stderr;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use colored::Colorize;
use tracing_log::AsTrace;
use udcheck::commands;

#[derive(Subcommand)]
enum Commands {
    /// Validates CoNLL-U files against a conformance level and reports
    /// diagnostics.
    ///
    /// The exit status is 0 when nothing was reported and 1 otherwise.
    Check(commands::check::CheckArgs),

    /// Explains a rule or one of the diagnostics it reports.
    Explain(commands::explain::Args),
}

#[derive(Parser)]
#[command(author, version, propagate_version = true, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    verbose: Verbosity,
}

fn inner() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_log::LogTracer::init()?;

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(cli.verbose.log_level_filter().as_trace())
        .with_writer(std::io::stderr)
        .with_ansi(stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Check(args) => commands::check::check(args),
        Commands::Explain(args) => commands::explain::explain(args).map(|()| ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    match inner() {
        Ok(code) => code,
        Err(e) => {
            eprintln!(
                "{error}: {e:?}",
                error = if std::io::stderr().is_terminal() {
                    "error".red().bold()
                } else {
                    "error".normal()
                }
            );
            ExitCode::FAILURE
        }
    }
}
