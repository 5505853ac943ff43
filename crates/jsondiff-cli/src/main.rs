//! jsondiff CLI
//!
//! Command-line interface for structural JSON comparison.
//!
//! Exit status follows diff(1): 0 when the inputs are identical, 1 when they
//! differ, 2 on any error.

use clap::{Parser, Subcommand, ValueEnum};
use jsondiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "jsondiff")]
#[command(about = "jsondiff - Structural comparison of JSON documents", long_about = None)]
struct Cli {
    /// Emit structured logs to stderr
    #[arg(long, global = true, value_enum)]
    log_profile: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable, debug level
    Dev,
    /// JSON lines, info level
    Prod,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Dev => Profile::Development,
            LogProfile::Prod => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two JSON documents and print the difference tree
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        init(profile.into());
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
