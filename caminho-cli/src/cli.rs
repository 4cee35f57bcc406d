//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckCommand, CheckJsonCommand, ClassifyCommand, CompletionsCommand, NormalizeCommand,
    ValidateConfigCommand,
};
use caminho::config::PlatformSetting;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line tool for validating and classifying filesystem paths.
#[derive(Parser)]
#[command(name = "caminho")]
#[command(version, about = "Validate, normalize and classify paths", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read the user configuration from this directory
    #[arg(long, value_name = "PATH", global = true, env = "CAMINHO_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Path syntax rules to apply
    #[arg(long, value_enum, global = true, ignore_case = true)]
    pub platform: Option<PlatformArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate paths and print what was observed
    Check(CheckCommand),

    /// Print normalized forms without touching the filesystem
    Normalize(NormalizeCommand),

    /// Print the kind of a path
    Classify(ClassifyCommand),

    /// Validate one JSON value per line of standard input
    CheckJson(CheckJsonCommand),

    /// Validate a configuration file
    ValidateConfig(ValidateConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

/// Platform choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PlatformArg {
    /// Follow the host
    Auto,
    /// POSIX rules
    Posix,
    /// Windows rules
    Windows,
}

impl From<PlatformArg> for PlatformSetting {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Auto => PlatformSetting::Auto,
            PlatformArg::Posix => PlatformSetting::Posix,
            PlatformArg::Windows => PlatformSetting::Windows,
        }
    }
}
