//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{
    PurchaseArgs, run_config_show, run_config_validate, run_info, run_purchase, run_quote,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(
    name = "tickets",
    version,
    about = "Cinema ticket purchase CLI",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a purchase, take payment, and reserve seats.
    Purchase(PurchaseArgs),
    /// Validate a purchase and report its totals without side effects.
    Quote(PurchaseArgs),
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show build and version details.
    Info,
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Optional JSON overrides applied on top of the config file.
        #[arg(long)]
        overrides_json: Option<String>,
    },
    /// Validate the effective config.
    Validate {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Optional JSON overrides applied on top of the config file.
        #[arg(long)]
        overrides_json: Option<String>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    init_tracing(mode.verbose);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

/// Install the stderr trace subscriber, warning when one is already set.
fn init_tracing(verbose: bool) {
    if let Err(error) = install_tracing(verbose) {
        let _ = writeln!(io::stderr(), "warning: tracing disabled: {error}");
    }
}

/// `RUST_LOG` wins over `--verbose`.
fn install_tracing(verbose: bool) -> Result<(), TryInitError> {
    let default_directive = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        Commands::Purchase(args) => run_purchase(mode, args),
        Commands::Quote(args) => run_quote(mode, args),
        Commands::Config { command } => match command {
            ConfigCommands::Show {
                path,
                overrides_json,
            } => run_config_show(mode, path.as_deref(), overrides_json.as_deref()),
            ConfigCommands::Validate {
                path,
                overrides_json,
            } => run_config_validate(mode, path.as_deref(), overrides_json.as_deref()),
        },
        Commands::Info => run_info(mode),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn version_flag_is_supported() {
        let result = Cli::command().try_get_matches_from(["tickets", "--version"]);
        let is_version = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::DisplayVersion
        );

        assert!(is_version, "expected clap to render version");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_account_ids_reach_the_validator() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["tickets", "purchase", "--account-id", "-4", "--adult", "1"])?;
        let Commands::Purchase(args) = cli.command else {
            return Err("expected purchase command".into());
        };
        assert_eq!(args.account_id, Some(-4));
        Ok(())
    }

    #[test]
    fn account_id_is_required_without_stdin() {
        let result = Cli::try_parse_from(["tickets", "quote", "--adult", "1"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["tickets", "quote", "--stdin"]);
        assert!(result.is_ok());
    }

    #[test]
    fn output_flag_is_global() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["tickets", "info", "--output", "ndjson"])?;
        assert!(OutputMode::from_args(&cli.output).is_ndjson());
        Ok(())
    }

    #[test]
    fn second_tracing_install_is_reported_not_fatal() {
        let _ = install_tracing(false);
        assert!(install_tracing(true).is_err());
        init_tracing(true);
    }

    #[test]
    fn exit_codes_for_errors() -> Result<(), Box<dyn std::error::Error>> {
        let io_error = CliError::Io(io::Error::other("io"));
        let serialization_error = match serde_json::from_str::<serde_json::Value>("not-json") {
            Ok(_) => return Err("expected serialization error".into()),
            Err(error) => CliError::Serialization(error),
        };

        assert_eq!(io_error.exit_code(), ExitCode::Io);
        assert_eq!(serialization_error.exit_code(), ExitCode::Internal);
        assert_eq!(
            CliError::InvalidInput("bad".to_string()).exit_code(),
            ExitCode::InvalidInput
        );
        Ok(())
    }
}
