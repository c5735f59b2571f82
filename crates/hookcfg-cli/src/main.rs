//! # hookcfg CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hookcfg_cli::validate::{run_validate_config, run_validate_manifest, ValidateArgs};

/// Validate pre-commit hook configs and hook manifests.
#[derive(Parser, Debug)]
#[command(name = "hookcfg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate .pre-commit-config.yaml files.
    ValidateConfig(ValidateArgs),

    /// Validate hooks.yaml manifests.
    ValidateManifest(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::ValidateConfig(args) => run_validate_config(&args),
        Commands::ValidateManifest(args) => run_validate_manifest(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_validate_config_without_files() {
        let cli = Cli::try_parse_from(["hookcfg", "validate-config"]).unwrap();
        match cli.command {
            Commands::ValidateConfig(args) => assert!(args.filenames.is_empty()),
            other => panic!("expected validate-config, got: {other:?}"),
        }
    }

    #[test]
    fn parse_validate_manifest_with_files() {
        let cli =
            Cli::try_parse_from(["hookcfg", "validate-manifest", "a.yaml", "b.yaml"]).unwrap();
        match cli.command {
            Commands::ValidateManifest(args) => assert_eq!(
                args.filenames,
                vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml")]
            ),
            other => panic!("expected validate-manifest, got: {other:?}"),
        }
    }

    #[test]
    fn parse_verbosity_is_global() {
        let cli = Cli::try_parse_from(["hookcfg", "validate-config", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["hookcfg", "install"]).is_err());
    }
}
