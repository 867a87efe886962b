use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tasklog` binary.
#[derive(Debug, Parser)]
#[command(name = "tasklog", version, about = "tasklog - time-tracked task log and summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the layered config lookup
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::root_commands::StrategyArg;
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["tasklog", "--format", "json", "--verbose", "list"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tasklog", "summarize", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tasklog", "--format", "xml", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn summarize_options_parse() {
        let cli = Cli::try_parse_from([
            "tasklog",
            "summarize",
            "--since",
            "2025-03-04",
            "--threshold",
            "0.8",
            "--strategy",
            "classifier",
        ])
        .expect("cli should parse");

        let Commands::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.query.since.as_deref(), Some("2025-03-04"));
        assert_eq!(args.threshold, Some(0.8));
        assert_eq!(args.strategy, Some(StrategyArg::Classifier));
        assert!(!args.offline);
    }

    #[test]
    fn add_takes_title_and_description() {
        let cli = Cli::try_parse_from(["tasklog", "add", "--title", "Sprint 10", "-d", "fix bug"])
            .expect("cli should parse");

        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.title.as_deref(), Some("Sprint 10"));
        assert_eq!(args.description.as_deref(), Some("fix bug"));
    }
}
