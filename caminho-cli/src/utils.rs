//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! configuration loading, validator construction and output formatting.

use crate::error::CliError;
use caminho::config::{Config, ConfigBuilder, PlatformSetting};
use caminho::output::OutputFormat;
use caminho::path::PathValidator;
use clap::ValueEnum;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose/quiet are consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub config_dir: Option<PathBuf>,

    /// Override the platform rules.
    pub platform: Option<PlatformSetting>,
}

/// Output format for commands that print mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Indented JSON
    Json,
    /// One JSON object per line
    Compact,
    /// Human-readable text
    Human,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Compact => OutputFormat::Compact,
            FormatArg::Human => OutputFormat::Human,
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command flags (`overrides`) and global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(dir) = &global.config_dir {
        builder = builder.with_config_dir(dir);
    }
    if global.platform.is_some() {
        builder = builder.with_config(Config {
            platform: global.platform,
            ..Config::default()
        });
    }

    builder
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Build a validator for this process from the effective configuration.
pub fn build_validator(config: &Config) -> Result<PathValidator, CliError> {
    PathValidator::from_config(config).map_err(|e| CliError::Config(e.to_string()))
}

/// Summarize failures, or succeed if there were none.
pub fn check_failures(failed: usize, total: usize) -> Result<(), CliError> {
    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::SemanticFailure(format!(
            "{failed} of {total} inputs failed validation"
        )))
    }
}
