//! Veritas CLI binary.

use clap::Parser;
use std::process;
use veritas::cli::{args::*, commands::*};

fn main() {
    // Parse command line arguments using clap
    let args = VeritasArgs::parse();

    // Log level follows the CLI verbosity flags.
    let level = match args.verbosity() {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
