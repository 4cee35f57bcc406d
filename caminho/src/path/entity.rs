//! The validated path entity.

use std::fmt;

use crate::error::{PathError, Result};
use crate::output::{PathMapping, PathSerializer};
use crate::path::classify::PathClassifier;
use crate::path::permission::PermissionChecker;
use crate::path::probe::{LinkMode, MetadataProbe, SystemMetadataProbe};
use crate::path::types::{Existence, NormalizedPath, PathKind, PermissionState, RawInput};
use crate::path::validator::{PathValidator, ValidationOutcome};

/// A path that passed validation, with everything observed about it.
///
/// The entity is only ever in a valid state. [`revalidate`](Self::revalidate)
/// and [`set_raw`](Self::set_raw) run the pipeline again and replace the
/// state as a whole on success; on failure the previous state is kept and
/// the error is available from [`last_error`](Self::last_error).
///
/// # Examples
///
/// ```no_run
/// use caminho::{PathKind, ValidatedPath};
///
/// let mut path = ValidatedPath::new("~").unwrap();
/// assert_eq!(path.kind(), PathKind::Directory);
/// assert!(path.exists());
///
/// // A failed reassignment keeps the previous state.
/// assert!(path.set_raw("/definitely/not/here").is_err());
/// assert!(path.last_error().unwrap().is_not_found());
/// assert_eq!(path.kind(), PathKind::Directory);
/// ```
#[derive(Debug)]
pub struct ValidatedPath<P = SystemMetadataProbe> {
    raw: RawInput,
    outcome: ValidationOutcome,
    permissions: PermissionChecker,
    last_error: Option<PathError>,
    validator: PathValidator<P>,
}

impl ValidatedPath<SystemMetadataProbe> {
    /// Validate `raw` with the host's rules and default settings.
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] of the first failing stage.
    pub fn new(raw: impl Into<RawInput>) -> std::result::Result<Self, PathError> {
        Self::with_validator(raw, PathValidator::new()?)
    }
}

impl<P: MetadataProbe> ValidatedPath<P> {
    /// Validate `raw` with `validator`, which the entity keeps for later runs.
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] of the first failing stage.
    pub fn with_validator(
        raw: impl Into<RawInput>,
        validator: PathValidator<P>,
    ) -> std::result::Result<Self, PathError> {
        let raw = raw.into();
        let mut permissions = PermissionChecker::new();
        let outcome = validator.run(&raw, &mut permissions).into_result()?;

        Ok(Self {
            raw,
            outcome,
            permissions,
            last_error: None,
            validator,
        })
    }

    /// Run the pipeline again on the current input.
    ///
    /// Permission answers already cached for the same normalized path are
    /// reused.
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] of the first failing stage; the previous
    /// state is kept.
    pub fn revalidate(&mut self) -> std::result::Result<(), PathError> {
        let mut permissions = self.permissions.clone();
        let run = self.validator.run(&self.raw, &mut permissions);
        self.commit(None, run.into_result(), permissions)
    }

    /// Replace the input and validate it with a fresh permission cache.
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] of the first failing stage; the previous
    /// input and state are kept.
    pub fn set_raw(&mut self, raw: impl Into<RawInput>) -> std::result::Result<(), PathError> {
        let raw = raw.into();
        let mut permissions = PermissionChecker::new();
        let run = self.validator.run(&raw, &mut permissions);
        self.commit(Some(raw), run.into_result(), permissions)
    }

    fn commit(
        &mut self,
        raw: Option<RawInput>,
        result: std::result::Result<ValidationOutcome, PathError>,
        permissions: PermissionChecker,
    ) -> std::result::Result<(), PathError> {
        match result {
            Ok(outcome) => {
                if let Some(raw) = raw {
                    self.raw = raw;
                }
                self.outcome = outcome;
                self.permissions = permissions;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                log::debug!("keeping {} after failed validation: {e}", self.outcome.normalized);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// The input as it was given.
    #[must_use]
    pub fn raw(&self) -> &RawInput {
        &self.raw
    }

    /// The normalized path.
    #[must_use]
    pub fn normalized(&self) -> &NormalizedPath {
        &self.outcome.normalized
    }

    /// The normalized path with links resolved (equal to the normalized path
    /// when it could not be resolved).
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.outcome.canonical
    }

    /// The kind observed at validation time.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.outcome.kind
    }

    /// Existence at validation time.
    #[must_use]
    pub fn existence(&self) -> Existence {
        self.outcome.existence
    }

    /// Whether the path existed at validation time.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.outcome.existence.as_bool()
    }

    /// Read and write access, served from the entity's cache.
    ///
    /// Only existing local paths are queried; anything else has
    /// [`PermissionState::NONE`].
    pub fn permissions(&mut self) -> PermissionState {
        if self.outcome.existence != Existence::Present {
            return PermissionState::NONE;
        }
        self.permissions
            .check(&self.outcome.normalized, self.validator.probe())
    }

    /// The access observed during the last successful run.
    #[must_use]
    pub fn permissions_at_validation(&self) -> PermissionState {
        self.outcome.permissions
    }

    /// The entity's permission cache.
    #[must_use]
    pub fn permission_cache(&self) -> &PermissionChecker {
        &self.permissions
    }

    /// Classify the path now, without caching the answer.
    #[must_use]
    pub fn classify(&self, mode: LinkMode) -> PathKind {
        PathClassifier::classify(&self.outcome.normalized, mode, self.validator.probe())
    }

    /// The error of the most recent failed revalidation, if the last attempt
    /// failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&PathError> {
        self.last_error.as_ref()
    }

    /// The validator this entity runs with.
    #[must_use]
    pub fn validator(&self) -> &PathValidator<P> {
        &self.validator
    }

    /// Path segments after the root (host and share included for UNC paths).
    #[must_use]
    pub fn components(&self) -> Vec<&str> {
        self.outcome.normalized.segments()
    }

    /// The final segment.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.outcome.normalized.file_name()
    }

    /// The extension of the final segment, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.outcome.normalized.extension()
    }

    /// The normalized parent path, `None` at a root.
    #[must_use]
    pub fn parent(&self) -> Option<String> {
        self.outcome
            .normalized
            .parent()
            .map(|parent| parent.as_str().to_string())
    }

    /// This path joined with `segment`, normalized but not validated.
    ///
    /// An absolute `segment` replaces this path; see [`NormalizedPath::join`].
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] of normalizing the joined text.
    pub fn join(&self, segment: &str) -> std::result::Result<NormalizedPath, PathError> {
        self.outcome.normalized.join(segment)
    }

    /// The stable mapping of this path.
    #[must_use]
    pub fn to_mapping(&self) -> PathMapping {
        PathSerializer::to_mapping(self)
    }

    /// The mapping encoded as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_text(&self) -> Result<String> {
        PathSerializer::to_text(self)
    }
}

impl<P> fmt::Display for ValidatedPath<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome.normalized)
    }
}

impl<P, Q> PartialEq<ValidatedPath<Q>> for ValidatedPath<P> {
    fn eq(&self, other: &ValidatedPath<Q>) -> bool {
        self.outcome.normalized == other.outcome.normalized
    }
}
