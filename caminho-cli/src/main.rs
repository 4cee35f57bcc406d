//! Main entry point for the caminho CLI.
//!
//! This is the command-line interface for the caminho path validation
//! engine. It provides commands for inspecting paths:
//! - `check`: Validate paths and print their mappings
//! - `normalize`: Print normalized forms
//! - `classify`: Print the kind of a path
//! - `check-json`: Validate JSON values read from standard input

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records through the configured logger
    caminho::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_dir: cli.config_dir,
        platform: cli.platform.map(Into::into),
    };

    let result = match cli.command {
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Normalize(cmd) => cmd.execute(&global),
        cli::Command::Classify(cmd) => cmd.execute(&global),
        cli::Command::CheckJson(cmd) => cmd.execute(&global),
        cli::Command::ValidateConfig(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
