//! score-humanitec CLI library

pub mod commands;
pub mod config;
pub mod error;

pub use error::{Error, Result};

use clap::{Parser, Subcommand};
use tracing::warn;

/// score-humanitec - Translates Score files into Humanitec deployment deltas
#[derive(Parser, Debug)]
#[command(name = "score-humanitec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable diagnostic messages (written to stderr)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate the Score file to a Humanitec deployment delta
    Run(commands::run::RunArgs),
    /// DEPRECATED - use 'run' instead
    Draft(commands::run::RunArgs),
    /// Generate a starter score.yaml
    Generate(commands::generate::GenerateArgs),
}

impl Cli {
    /// Run the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args) => commands::run::run(args),
            Commands::Draft(args) => {
                warn!("'draft' is deprecated, use 'run' instead");
                commands::run::run(args)
            }
            Commands::Generate(args) => commands::generate::run(args),
        }
    }

    /// Default log filter for this invocation
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "score-humanitec",
            "run",
            "--env",
            "development",
            "-f",
            "app/score.yaml",
            "-p",
            "containers.backend.image=nginx",
            "--property",
            "metadata.team=core",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), "debug");
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.env, "development");
        assert_eq!(args.file, std::path::PathBuf::from("app/score.yaml"));
        assert_eq!(args.properties.len(), 2);
        assert!(args.overrides.is_none());
    }

    #[test]
    fn test_env_is_required() {
        assert!(Cli::try_parse_from(["score-humanitec", "run"]).is_err());
    }

    #[test]
    fn test_draft_alias_and_defaults() {
        let cli = Cli::try_parse_from(["score-humanitec", "draft", "--env", "dev"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
        let Commands::Draft(args) = cli.command else {
            panic!("expected draft");
        };
        assert_eq!(args.file, std::path::PathBuf::from(config::DEFAULT_SCORE_FILE));
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "score-humanitec",
            "generate",
            "-m",
            "orders",
            "-e",
            "staging",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.metadata, "orders");
        assert_eq!(args.resource_name, "application");
        assert_eq!(args.environment, "staging");
        assert_eq!(args.output, std::path::PathBuf::from(config::DEFAULT_SCORE_FILE));
    }
}
