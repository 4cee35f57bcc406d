//! Library exports for caminho-cli.
//!
//! This module exports the CLI structure and commands so that integration
//! tests and tooling can drive them without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
