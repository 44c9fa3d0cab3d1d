//! # npm2deb-cli
//!
//! Tells a Debian packager what has to be packaged before an npm module can
//! enter the archive.
//!
//! This is the main entry point for the npm2deb CLI tool. It handles command
//! parsing, sets up logging and error handling, and dispatches to the
//! appropriate command handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use npm2deb_core::error::{Npm2DebError, Npm2DebResult};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Crates whose logs are shown
const LOG_TARGETS: [&str; 6] = [
    "npm2deb",
    "npm2deb_core",
    "npm2deb_config",
    "npm2deb_registry",
    "npm2deb_archive",
    "npm2deb_resolver",
];

/// Inspect npm modules before packaging them for Debian
#[derive(Parser)]
#[command(
    name = "npm2deb",
    version,
    about = "Inspect npm modules before packaging them for Debian"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set debug level (0-3)
    #[arg(
        short = 'D',
        long = "debug",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    pub debug: Option<u8>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show and resolve the dependencies of a module
    Depends {
        /// Node module available via npm
        module: String,
        /// Look for dependencies of dependencies not yet in Debian
        #[arg(short, long, overrides_with = "no_recursive")]
        recursive: bool,
        /// Stay at the direct dependencies even if the config says recursive
        #[arg(long)]
        no_recursive: bool,
        /// Also look into dependencies already in Debian
        #[arg(short, long, overrides_with = "no_force")]
        force: bool,
        /// Skip packaged dependencies even if the config says force
        #[arg(long)]
        no_force: bool,
        /// Show runtime dependencies
        #[arg(short, long)]
        binary: bool,
        /// Show build dependencies
        #[arg(short = 'B', long)]
        builddep: bool,
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the Debian packages depending on a module
    Rdepends {
        /// Node module available via npm
        module: String,
    },
    /// Look whether a module is already in Debian
    Search {
        /// Node module available via npm
        module: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.debug);
    setup_panic_handler();

    debug!("Starting npm2deb v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Npm2DebResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Npm2DebError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new().await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

/// Log level for the `-v` and `-D` flags; `-D` wins when both are given
fn log_level(verbose: bool, debug: Option<u8>) -> &'static str {
    match debug {
        Some(0) => "warn",
        Some(1) => "info",
        Some(2) => "debug",
        Some(_) => "trace",
        None if verbose => "debug",
        None => "info",
    }
}

fn setup_logging(verbose: bool, debug: Option<u8>) {
    let level = log_level(verbose, debug);
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    // RUST_LOG replaces the flag-derived filter when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("npm2deb encountered an unexpected error: {}", panic_info);
        eprintln!("npm2deb crashed! This is a bug.");
        eprintln!("Please report this at: https://salsa.debian.org/js-team/npm2deb/-/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
