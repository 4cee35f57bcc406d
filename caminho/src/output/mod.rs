//! Output of validated paths.
//!
//! This module turns a [`ValidatedPath`](crate::ValidatedPath) into the
//! stable five-key mapping and renders it as indented JSON, compact JSON or
//! human-readable text.

mod formatters;
mod mapping;

use serde::{Deserialize, Serialize};

use crate::Result;

pub use formatters::{CompactFormatter, HumanFormatter, JsonFormatter};
pub use mapping::{PathMapping, PathSerializer};

/// Trait for rendering a path mapping.
pub trait OutputFormatter {
    /// Format the given mapping into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatting fails.
    fn format(&self, mapping: &PathMapping) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented JSON, one object per path.
    #[default]
    Json,
    /// Single-line JSON, one object per line.
    Compact,
    /// Human-readable format.
    Human,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
            Self::Human => write!(f, "human"),
        }
    }
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Compact => Box::new(CompactFormatter),
            Self::Human => Box::new(HumanFormatter),
        }
    }
}
