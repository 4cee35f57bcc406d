//! Error types for the caminho library.
//!
//! Two layers are defined here, both with `thiserror`:
//!
//! - [`PathError`] is the closed taxonomy of reasons a single validation
//!   attempt can fail. Callers branch on its variants, never on message text.
//! - [`Error`] is the library-wide error, wrapping `PathError` together with
//!   configuration, serialization and I/O failures.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a caminho error.
///
/// # Examples
///
/// ```
/// use caminho::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("/tmp")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Why a validation attempt failed.
///
/// Every variant is terminal for the attempt that raised it; nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The input was empty or contained only whitespace.
    #[error("path is empty")]
    Empty,

    /// The input was not a text value.
    #[error("expected a text value, found {found}")]
    WrongType {
        /// Name of the type that was supplied instead.
        found: String,
    },

    /// The normalized path does not resolve to any filesystem entity.
    #[error("path not found: {path}")]
    NotFound {
        /// The normalized path that was looked up.
        path: String,
    },

    /// The process can neither read nor write the entity, or may not query it.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The normalized path that could not be accessed.
        path: String,
    },

    /// The input is not a syntactically valid path for the selected platform.
    #[error("invalid path syntax {input:?}: {reason}")]
    InvalidSyntax {
        /// The offending input, as given.
        input: String,
        /// The reason the input was rejected.
        reason: String,
    },

    /// Neither POSIX nor Windows path rules apply.
    #[error("unsupported platform: {detail}")]
    UnsupportedPlatform {
        /// Description of the platform that was rejected.
        detail: String,
    },
}

impl PathError {
    pub(crate) fn invalid_syntax(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// A stable, machine-readable identifier for the variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::PathError;
    ///
    /// assert_eq!(PathError::Empty.code(), "empty");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::WrongType { .. } => "wrong_type",
            Self::NotFound { .. } => "not_found",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::InvalidSyntax { .. } => "invalid_syntax",
            Self::UnsupportedPlatform { .. } => "unsupported_platform",
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::PathError;
    ///
    /// let err = PathError::NotFound { path: "/nonexistent".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::PathError;
    ///
    /// let err = PathError::PermissionDenied { path: "/restricted".to_string() };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// The main error type for the caminho library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path failed validation.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A mapping could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file the library needed could not be read.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The path that could not be used.
        path: PathBuf,
        /// The reason the path could not be used.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Path(err) if err.is_not_found())
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Path(err) if err.is_permission_denied())
    }
}
