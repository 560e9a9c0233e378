//! # mlac CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Logs go to stderr or `--log-file`; stdout carries outbound messages only.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mlac_cli::logging;
use mlac_cli::parse_uri::{run_parse_uri, ParseUriArgs};
use mlac_cli::run::{run_run, RunArgs};

/// ArtifactConsumer harness
///
/// Resolves ML artifact ids to storage connection and path through the ML
/// API, exactly as the com.sap.ml.artifact.consumer.v2 operator does.
#[derive(Parser, Debug)]
#[command(name = "mlac", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    /// Append logs to this file instead of stderr.
    ///
    /// When `run` writes error records to stderr and no log file is given,
    /// logs are off unless -v is passed, in which case both interleave.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run setup and InArtifact over JSON-lines messages.
    Run(RunArgs),

    /// Decompose an artifact URI into scheme, connection id and path.
    ParseUri(ParseUriArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let records_on_stderr = matches!(&cli.command, Commands::Run(args) if args.errors.is_none());
    if let Err(e) = logging::init(
        cli.verbose,
        cli.log_json,
        cli.log_file.as_deref(),
        records_on_stderr,
    ) {
        eprintln!("error: {e:#}");
        return ExitCode::from(1);
    }

    tracing::debug!("mlac CLI starting");

    let result = match cli.command {
        Commands::Run(args) => run_run(&args),
        Commands::ParseUri(args) => run_parse_uri(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            // Logging may be off; fatal errors always reach stderr.
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
