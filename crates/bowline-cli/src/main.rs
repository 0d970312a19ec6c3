//! Bowline CLI - Convert JSON Canvas files into Mermaid.js flowcharts

mod cli;

use clap::Parser;
use bowline::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    // Initialize logging early; run() reinitializes with CLI flags if the
    // environment did not already pin a configuration.
    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::BowlineApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
