//! Path validation, normalization and classification.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Normalization converts raw input to a canonical absolute form without
//! touching the filesystem:
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths
//! - Resolving `.` and `..` components
//! - Rewriting separators to the platform's canonical one
//!
//! UNC shares (`\\host\share`) and URIs (`smb://host/share`) are recognized
//! and kept in their own canonical forms. The rules applied are those of an
//! explicit [`Platform`], never of whatever host the code happens to run on.
//!
//! ## Validation
//!
//! [`PathValidator`] runs normalization, then asks a [`MetadataProbe`]
//! whether the path exists, whether the process may access it and what kind
//! of entity it is. The result is a [`ValidatedPath`] or a [`PathError`]
//! naming the first check that failed.
//!
//! ## Canonicalization
//!
//! Canonicalization follows symlinks to get the "real" path on the
//! filesystem. It is only possible for paths that exist, and is reported
//! next to (never instead of) the normalized form.
//!
//! # Examples
//!
//! ```
//! use caminho::path::{LinkMode, MockMetadataProbe, PathNormalizer, PathValidator};
//! use caminho::{PathKind, PermissionState, Platform};
//! use std::sync::Arc;
//!
//! let probe = Arc::new(
//!     MockMetadataProbe::new()
//!         .with_dir("/srv/app", PermissionState::FULL)
//!         .with_symlink("/srv/current", "/srv/app"),
//! );
//! let validator = PathValidator::with_parts(
//!     PathNormalizer::new(Platform::Posix).with_working_dir("/srv"),
//!     probe,
//! );
//!
//! let path = validator.validate("current").unwrap();
//! assert_eq!(path.kind(), PathKind::Directory);
//! assert_eq!(path.classify(LinkMode::NoFollow), PathKind::Symlink);
//! assert_eq!(path.canonical(), "/srv/app");
//! ```
//!
//! [`PathError`]: crate::PathError

pub mod canonicalize;
pub mod classify;
pub mod entity;
pub mod normalize;
pub mod permission;
pub mod platform;
pub mod probe;
pub mod types;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use classify::PathClassifier;
pub use entity::ValidatedPath;
pub use normalize::PathNormalizer;
pub use permission::PermissionChecker;
pub use platform::Platform;
pub use probe::{EntryType, LinkMode, MetadataProbe, MockMetadataProbe, SystemMetadataProbe};
pub use types::{Existence, NormalizedPath, PathFamily, PathKind, PermissionState, RawInput};
pub use validator::{PathValidator, ValidationOutcome, ValidationRun, ValidationState};
