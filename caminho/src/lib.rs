#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # caminho
//!
//! A library for validating, normalizing and classifying filesystem paths.
//!
//! Given an untrusted value, caminho decides whether it names a usable
//! filesystem entity or a well-formed network location, normalizes it, tells
//! what kind of entity it is, and reports existence and permission metadata
//! as a stable mapping.
//!
//! ## Core Types
//!
//! - [`RawInput`]: the untrusted value, text or not
//! - [`ValidatedPath`]: a path that passed validation, with its observations
//! - [`PathKind`], [`PermissionState`], [`Existence`]: what was observed
//! - [`PathError`]: why validation failed
//! - [`PathMapping`]: the serializable five-key record
//! - [`Error`] and [`Result`]: library-wide error handling
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use caminho::{validate, PathKind};
//!
//! let path = validate("~/projects/../Documents").unwrap();
//! assert_eq!(path.kind(), PathKind::Directory);
//! println!("{}", path.to_text().unwrap());
//! ```
//!
//! Every filesystem query goes through a [`MetadataProbe`], so behavior can
//! be checked without touching the disk:
//!
//! ```
//! use caminho::path::{MockMetadataProbe, PathNormalizer, PathValidator};
//! use caminho::{PathError, PermissionState, Platform};
//!
//! let validator = PathValidator::with_parts(
//!     PathNormalizer::new(Platform::Windows).with_working_dir(r"C:\Users\ana"),
//!     MockMetadataProbe::new().with_file(r"C:\Users\ana\notas.txt", PermissionState::FULL),
//! );
//!
//! let run = validator.run(&"notas.txt".into(), &mut Default::default());
//! assert!(run.is_valid());
//!
//! let run = validator.run(&"".into(), &mut Default::default());
//! assert_eq!(run.error(), Some(&PathError::Empty));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod path;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, PathError, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormat, PathMapping, PathSerializer};
pub use path::{
    Existence, LinkMode, MetadataProbe, NormalizedPath, PathKind, PathValidator, PermissionState,
    Platform, RawInput, ValidatedPath,
};

/// Validate `raw` with the host's rules and default settings.
///
/// # Errors
///
/// Returns the [`PathError`] of the first failing stage.
pub fn validate(raw: impl Into<RawInput>) -> std::result::Result<ValidatedPath, PathError> {
    ValidatedPath::new(raw)
}
