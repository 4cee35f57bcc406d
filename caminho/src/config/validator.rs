//! Configuration validation.
//!
//! Serde already rejects unknown keys and unknown enum values; this module
//! checks the constraints the types cannot express.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use caminho::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config {
///     allowed_schemes: Some(vec!["s m b".to_string()]),
///     ..Config::default()
/// };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref schemes) = config.allowed_schemes {
            Self::validate_schemes(schemes)?;
        }

        Ok(())
    }

    /// An allow-list must name at least one scheme, each of them valid.
    fn validate_schemes(schemes: &[String]) -> Result<()> {
        if schemes.is_empty() {
            return Err(Error::Validation {
                field: "allowed_schemes".into(),
                message: "List must not be empty (omit it to allow any scheme)".into(),
            });
        }

        for scheme in schemes {
            Self::validate_scheme(scheme)?;
        }

        Ok(())
    }

    /// A scheme is a letter followed by letters, digits, `+`, `-` or `.`,
    /// at least two characters long.
    fn validate_scheme(scheme: &str) -> Result<()> {
        let mut chars = scheme.chars();
        let valid = scheme.len() >= 2
            && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

        if !valid {
            return Err(Error::Validation {
                field: "allowed_schemes".into(),
                message: format!(
                    "Invalid scheme '{scheme}': must start with a letter, contain only letters, digits, '+', '-' or '.', and be at least two characters long"
                ),
            });
        }

        Ok(())
    }
}
