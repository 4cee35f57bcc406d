//! Environment variable handling for configuration overrides.
//!
//! This module provides support for CAMINHO_* environment variables that
//! override configuration file values.

use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, PlatformSetting};
use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::path::LinkMode;
use std::env;

/// Platform override: `auto`, `posix` or `windows`.
pub const PLATFORM_ENV: &str = "CAMINHO_PLATFORM";
/// Home expansion override (boolean).
pub const EXPAND_HOME_ENV: &str = "CAMINHO_EXPAND_HOME";
/// Missing path override (boolean).
pub const ALLOW_MISSING_ENV: &str = "CAMINHO_ALLOW_MISSING";
/// Link mode override: `follow` or `no-follow`.
pub const LINK_MODE_ENV: &str = "CAMINHO_LINK_MODE";
/// Comma-separated URI schemes, added to those from files.
pub const ALLOWED_SCHEMES_ENV: &str = "CAMINHO_ALLOWED_SCHEMES";
/// Output format override: `json`, `compact` or `human`.
pub const OUTPUT_FORMAT_ENV: &str = "CAMINHO_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use caminho::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads all CAMINHO_* environment variables and applies them to the
    /// configuration with higher precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., unknown platform, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(PLATFORM_ENV) {
            config.platform = Some(Self::parse_platform(&val)?);
        }

        if let Ok(val) = env::var(EXPAND_HOME_ENV) {
            config.expand_home = Some(Self::parse_bool(EXPAND_HOME_ENV, &val)?);
        }

        if let Ok(val) = env::var(ALLOW_MISSING_ENV) {
            config.allow_missing = Some(Self::parse_bool(ALLOW_MISSING_ENV, &val)?);
        }

        if let Ok(val) = env::var(LINK_MODE_ENV) {
            config.link_mode = Some(Self::parse_link_mode(&val)?);
        }

        // Schemes accumulate like they do across files
        if let Ok(val) = env::var(ALLOWED_SCHEMES_ENV) {
            ConfigMerger::merge_schemes(&mut config.allowed_schemes, &Self::parse_schemes(&val));
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(Self::parse_output_format(&val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_platform(s: &str) -> Result<PlatformSetting> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(PlatformSetting::Auto),
            "posix" => Ok(PlatformSetting::Posix),
            "windows" => Ok(PlatformSetting::Windows),
            _ => Err(Error::Validation {
                field: PLATFORM_ENV.into(),
                message: format!("Invalid platform: '{s}' (expected auto/posix/windows)"),
            }),
        }
    }

    fn parse_link_mode(s: &str) -> Result<LinkMode> {
        match s.trim().to_lowercase().as_str() {
            "follow" => Ok(LinkMode::Follow),
            "no-follow" | "nofollow" => Ok(LinkMode::NoFollow),
            _ => Err(Error::Validation {
                field: LINK_MODE_ENV.into(),
                message: format!("Invalid link mode: '{s}' (expected follow/no-follow)"),
            }),
        }
    }

    fn parse_output_format(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "compact" => Ok(OutputFormat::Compact),
            "human" => Ok(OutputFormat::Human),
            _ => Err(Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message: format!("Invalid output format: '{s}' (expected json/compact/human)"),
            }),
        }
    }

    /// Parse a comma-separated scheme list, skipping blank entries.
    ///
    /// Syntax is checked later by the config validator.
    fn parse_schemes(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}
