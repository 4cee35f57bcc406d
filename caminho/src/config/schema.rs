//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for caminho:
//! which platform rules apply, how links and missing paths are treated, which
//! URI schemes are accepted and how results are printed.

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::output::OutputFormat;
use crate::path::{LinkMode, Platform};

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; an unset field
/// falls back to the built-in default.
///
/// # Examples
///
/// ```
/// use caminho::config::{Config, PlatformSetting};
///
/// let config: Config = serde_yaml::from_str(
///     "platform: windows\nallow_missing: true\nallowed_schemes: [smb, nfs]\n",
/// )
/// .unwrap();
///
/// assert_eq!(config.platform, Some(PlatformSetting::Windows));
/// assert_eq!(config.allow_missing, Some(true));
/// assert_eq!(config.allowed_schemes.unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path syntax rules (`auto` follows the host).
    pub platform: Option<PlatformSetting>,

    /// Expand a leading `~` to the home directory (default true).
    pub expand_home: Option<bool>,

    /// Report missing paths as absent instead of rejecting them (default false).
    pub allow_missing: Option<bool>,

    /// Whether classification follows symbolic links (default follow).
    pub link_mode: Option<LinkMode>,

    /// URI schemes accepted by the normalizer (default: any).
    pub allowed_schemes: Option<Vec<String>>,

    /// Output format for the command line.
    pub output_format: Option<OutputFormat>,
}

/// Which platform's path rules to apply.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlatformSetting {
    /// The rules of the running host.
    #[default]
    Auto,
    /// POSIX rules.
    Posix,
    /// Windows rules.
    Windows,
}

impl PlatformSetting {
    /// The concrete platform this setting selects.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedPlatform`] for `auto` on a host that
    /// is neither POSIX nor Windows.
    pub fn resolve(self) -> Result<Platform, PathError> {
        match self {
            Self::Auto => Platform::detect(),
            Self::Posix => Ok(Platform::Posix),
            Self::Windows => Ok(Platform::Windows),
        }
    }
}

impl From<Platform> for PlatformSetting {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Posix => Self::Posix,
            Platform::Windows => Self::Windows,
        }
    }
}

impl std::fmt::Display for PlatformSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}
