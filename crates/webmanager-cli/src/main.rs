//! Web Manager CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use webmanager_cli::cli::Cli;
use webmanager_cli::commands;

fn main() {
    // Load .env.local if it exists (for WEBMANAGER_API_URL etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Logs go to stderr so they do not interleave with rendered output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
