//! Path syntax families.
//!
//! The normalizer never inspects a process-global OS name at normalization
//! time; it is handed a [`Platform`] explicitly, so both rule sets can be
//! exercised on any host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// The path syntax rules to apply.
///
/// # Examples
///
/// ```
/// use caminho::Platform;
///
/// assert_eq!(Platform::Posix.separator(), '/');
/// assert_eq!(Platform::Windows.separator(), '\\');
/// assert!(Platform::Windows.is_separator('/'));
/// assert!(!Platform::Posix.is_separator('\\'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Single `/` separator, absolute paths start at `/`.
    Posix,
    /// `\` canonical separator (`/` accepted on input), drive letters and UNC shares.
    Windows,
}

impl Platform {
    /// The platform of the running process.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedPlatform`] on hosts that are neither
    /// Unix-like nor Windows.
    pub fn detect() -> Result<Self, PathError> {
        if cfg!(windows) {
            Ok(Self::Windows)
        } else if cfg!(unix) {
            Ok(Self::Posix)
        } else {
            Err(PathError::UnsupportedPlatform {
                detail: std::env::consts::OS.to_string(),
            })
        }
    }

    /// Parses a platform name.
    ///
    /// Accepts `posix`, `unix`, `linux`, `macos` and `windows`
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedPlatform`] for any other name.
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::Platform;
    ///
    /// assert_eq!(Platform::parse("Linux").unwrap(), Platform::Posix);
    /// assert!(Platform::parse("plan9").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, PathError> {
        match name.trim().to_lowercase().as_str() {
            "posix" | "unix" | "linux" | "macos" => Ok(Self::Posix),
            "windows" => Ok(Self::Windows),
            other => Err(PathError::UnsupportedPlatform {
                detail: other.to_string(),
            }),
        }
    }

    /// The canonical separator written into normalized paths.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` separates components on input.
    #[must_use]
    pub const fn is_separator(self, c: char) -> bool {
        match self {
            Self::Posix => c == '/',
            Self::Windows => c == '/' || c == '\\',
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}
