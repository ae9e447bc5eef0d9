//! Celes CLI - command-line driver for the celes transpiler.
//!
//! Parses arguments with clap, initializes logging, and dispatches to the
//! command handlers. All failures print as `error: <message>` on stderr
//! and exit non-zero.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::build::{run_build, BuildArgs};
use error::{CelesError, Result};

/// The celes transpiler.
#[derive(Parser, Debug)]
#[command(name = "celes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The celes transpiler", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "CELES_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the project described by the manifest
    Build(BuildCommand),
}

/// Arguments for the build subcommand.
#[derive(Parser, Debug)]
struct BuildCommand {
    /// Path to the project manifest
    #[arg(short, long, default_value = "Project.toml")]
    manifest: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose).and_then(|()| execute_command(cli.command)) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the logging system.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|err| CelesError::Logging(err.to_string()))?;

    Ok(())
}

/// Execute the selected command.
fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Build(args) => run_build(BuildArgs {
            manifest: args.manifest,
        }),
    }
}
