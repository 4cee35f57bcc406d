//! The validation pipeline.
//!
//! This module provides the `PathValidator` type, which is the main interface
//! for turning raw input into a validated path. Every run walks the same
//! states, stopping at the first failure:
//!
//! ```text
//! Unvalidated -> Normalizing -> CheckingExistence -> CheckingPermission
//!             -> Classifying -> Valid
//!                   (any stage may end in Invalid)
//! ```

use std::fmt;
use std::io;

use crate::config::Config;
use crate::error::PathError;
use crate::path::canonicalize::canonical_form;
use crate::path::classify::PathClassifier;
use crate::path::entity::ValidatedPath;
use crate::path::normalize::PathNormalizer;
use crate::path::permission::PermissionChecker;
use crate::path::probe::{EntryType, LinkMode, MetadataProbe, SystemMetadataProbe};
use crate::path::types::{Existence, NormalizedPath, PathKind, PermissionState, RawInput};

/// A stage of the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationState {
    /// Nothing has been checked yet.
    Unvalidated,
    /// Turning the raw input into a normalized path.
    Normalizing,
    /// Asking the filesystem whether the path resolves.
    CheckingExistence,
    /// Asking whether the process may read or write the entity.
    CheckingPermission,
    /// Deciding what kind of entity the path is.
    Classifying,
    /// Every check passed.
    Valid,
    /// A check failed.
    Invalid(PathError),
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unvalidated => write!(f, "unvalidated"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::CheckingExistence => write!(f, "checking existence"),
            Self::CheckingPermission => write!(f, "checking permission"),
            Self::Classifying => write!(f, "classifying"),
            Self::Valid => write!(f, "valid"),
            Self::Invalid(e) => write!(f, "invalid ({e})"),
        }
    }
}

/// Everything a successful run observed about a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// The normalized form of the input.
    pub normalized: NormalizedPath,
    /// The normalized form with links resolved, when the path exists.
    pub canonical: String,
    /// What the path refers to.
    pub kind: PathKind,
    /// Whether the path existed.
    pub existence: Existence,
    /// Access of the current process.
    pub permissions: PermissionState,
}

/// The record of one pass through the pipeline.
///
/// # Examples
///
/// ```
/// use caminho::path::{MockMetadataProbe, PathNormalizer, PathValidator, PermissionChecker};
/// use caminho::path::ValidationState;
/// use caminho::{PathError, Platform, RawInput};
///
/// let validator = PathValidator::with_parts(
///     PathNormalizer::new(Platform::Posix),
///     MockMetadataProbe::new(),
/// );
/// let run = validator.run(&RawInput::from("   "), &mut PermissionChecker::new());
///
/// assert_eq!(
///     run.states(),
///     &[
///         ValidationState::Unvalidated,
///         ValidationState::Normalizing,
///         ValidationState::Invalid(PathError::Empty),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRun {
    states: Vec<ValidationState>,
    result: Result<ValidationOutcome, PathError>,
}

impl ValidationRun {
    fn fail(mut states: Vec<ValidationState>, error: PathError) -> Self {
        log::debug!("validation failed: {error}");
        states.push(ValidationState::Invalid(error.clone()));
        Self {
            states,
            result: Err(error),
        }
    }

    /// Every state visited, in order, ending with the terminal one.
    #[must_use]
    pub fn states(&self) -> &[ValidationState] {
        &self.states
    }

    /// The terminal state: [`ValidationState::Valid`] or [`ValidationState::Invalid`].
    #[must_use]
    pub fn terminal(&self) -> &ValidationState {
        static NOT_STARTED: ValidationState = ValidationState::Unvalidated;
        self.states.last().unwrap_or(&NOT_STARTED)
    }

    /// Whether the run ended in [`ValidationState::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// The observations of a successful run.
    #[must_use]
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.result.as_ref().ok()
    }

    /// The reason a failed run stopped.
    #[must_use]
    pub fn error(&self) -> Option<&PathError> {
        self.result.as_ref().err()
    }

    /// The observed kind, or [`PathKind::Invalid`] if the run failed.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.outcome().map_or(PathKind::Invalid, |outcome| outcome.kind)
    }

    /// Consume the run, keeping only its result.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped a failed run.
    pub fn into_result(self) -> Result<ValidationOutcome, PathError> {
        self.result
    }
}

/// Runs raw input through normalization, existence, permission and
/// classification checks.
///
/// # Examples
///
/// ```
/// use caminho::path::{MockMetadataProbe, PathNormalizer, PathValidator};
/// use caminho::{PathKind, PermissionState, Platform};
/// use std::sync::Arc;
///
/// let probe = Arc::new(MockMetadataProbe::new().with_file("/etc/hosts", PermissionState::FULL));
/// let validator = PathValidator::with_parts(PathNormalizer::new(Platform::Posix), probe);
///
/// let path = validator.validate("/etc/./hosts").unwrap();
/// assert_eq!(path.kind(), PathKind::File);
/// assert_eq!(path.normalized().as_str(), "/etc/hosts");
/// ```
#[derive(Debug, Clone)]
pub struct PathValidator<P = SystemMetadataProbe> {
    normalizer: PathNormalizer,
    probe: P,
    link_mode: LinkMode,
    allow_missing: bool,
}

impl PathValidator<SystemMetadataProbe> {
    /// Create a validator for the running process with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedPlatform`] if the host is neither
    /// POSIX nor Windows.
    pub fn new() -> Result<Self, PathError> {
        Ok(Self::with_parts(PathNormalizer::host()?, SystemMetadataProbe))
    }

    /// Create a validator for the running process from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedPlatform`] if the configured platform
    /// (or, for `auto`, the host) is not supported.
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::config::{Config, PlatformSetting};
    /// use caminho::path::{LinkMode, PathValidator};
    /// use caminho::Platform;
    ///
    /// let config = Config {
    ///     platform: Some(PlatformSetting::Windows),
    ///     link_mode: Some(LinkMode::NoFollow),
    ///     ..Config::default()
    /// };
    /// let validator = PathValidator::from_config(&config).unwrap();
    /// assert_eq!(validator.normalizer().platform(), Platform::Windows);
    /// assert_eq!(validator.link_mode(), LinkMode::NoFollow);
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, PathError> {
        let platform = config.platform.unwrap_or_default().resolve()?;
        let normalizer = PathNormalizer::host()?
            .with_platform(platform)
            .with_home_expansion(config.expand_home.unwrap_or(true))
            .with_allowed_schemes(config.allowed_schemes.clone());

        Ok(Self::with_parts(normalizer, SystemMetadataProbe)
            .with_link_mode(config.link_mode.unwrap_or_default())
            .with_missing_allowed(config.allow_missing.unwrap_or(false)))
    }
}

impl<P: MetadataProbe> PathValidator<P> {
    /// Create a validator from a normalizer and a probe.
    #[must_use]
    pub fn with_parts(normalizer: PathNormalizer, probe: P) -> Self {
        Self {
            normalizer,
            probe,
            link_mode: LinkMode::default(),
            allow_missing: false,
        }
    }

    /// Replace the probe, keeping every other setting.
    #[must_use]
    pub fn with_probe<Q: MetadataProbe>(self, probe: Q) -> PathValidator<Q> {
        PathValidator {
            normalizer: self.normalizer,
            probe,
            link_mode: self.link_mode,
            allow_missing: self.allow_missing,
        }
    }

    /// Replace the normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: PathNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set how links are treated when classifying.
    #[must_use]
    pub fn with_link_mode(mut self, mode: LinkMode) -> Self {
        self.link_mode = mode;
        self
    }

    /// Report missing local paths as [`Existence::Absent`] instead of failing.
    #[must_use]
    pub fn with_missing_allowed(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    /// The normalizer in use.
    #[must_use]
    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    /// The probe in use.
    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// How links are treated when classifying.
    #[must_use]
    pub fn link_mode(&self) -> LinkMode {
        self.link_mode
    }

    /// Whether missing paths are reported instead of rejected.
    #[must_use]
    pub fn allows_missing(&self) -> bool {
        self.allow_missing
    }

    /// Run the pipeline once.
    ///
    /// Permission answers are read from and stored in `permissions`.
    pub fn run(&self, raw: &RawInput, permissions: &mut PermissionChecker) -> ValidationRun {
        let mut states = vec![ValidationState::Unvalidated, ValidationState::Normalizing];

        let normalized = match self.normalizer.normalize(raw) {
            Ok(normalized) => normalized,
            Err(e) => return ValidationRun::fail(states, e),
        };
        log::trace!("normalized {raw:?} to {normalized}");

        states.push(ValidationState::CheckingExistence);
        let entry = match self.check_existence(&normalized) {
            Ok(entry) => entry,
            Err(e) => return ValidationRun::fail(states, e),
        };
        let existence = match (&entry, normalized.is_network()) {
            (_, true) => Existence::Unknown,
            (Some(_), false) => Existence::Present,
            (None, false) => Existence::Absent,
        };

        let mut granted = PermissionState::NONE;
        if existence == Existence::Present {
            states.push(ValidationState::CheckingPermission);
            granted = permissions.check(&normalized, &self.probe);
            if !granted.any() {
                return ValidationRun::fail(
                    states,
                    PathError::PermissionDenied {
                        path: normalized.as_str().to_string(),
                    },
                );
            }
        }

        states.push(ValidationState::Classifying);
        let kind = match (existence, entry) {
            (Existence::Absent, _) => PathKind::Unknown,
            (_, Some(entry)) if self.link_mode == LinkMode::Follow => {
                PathClassifier::kind_of(entry)
            }
            _ => PathClassifier::classify(&normalized, self.link_mode, &self.probe),
        };

        let canonical = if existence == Existence::Present {
            canonical_form(&normalized, &self.probe)
        } else {
            normalized.as_str().to_string()
        };

        log::debug!("validated {normalized} as {kind}");
        states.push(ValidationState::Valid);
        ValidationRun {
            states,
            result: Ok(ValidationOutcome {
                normalized,
                canonical,
                kind,
                existence,
                permissions: granted,
            }),
        }
    }

    /// The entry type of an existing local path, `None` for network paths
    /// and (when allowed) missing ones.
    fn check_existence(&self, path: &NormalizedPath) -> Result<Option<EntryType>, PathError> {
        if path.is_network() {
            log::trace!("{path} is a network path, skipping the filesystem");
            return Ok(None);
        }

        match self.probe.entry_type(&path.to_path_buf(), LinkMode::Follow) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Err(PathError::PermissionDenied {
                    path: path.as_str().to_string(),
                })
            }
            Err(e) if self.allow_missing => {
                log::debug!("{path} does not resolve ({e}), reporting it as absent");
                Ok(None)
            }
            Err(e) => {
                log::debug!("{path} does not resolve: {e}");
                Err(PathError::NotFound {
                    path: path.as_str().to_string(),
                })
            }
        }
    }
}

impl<P: MetadataProbe + Clone> PathValidator<P> {
    /// Validate `raw` into an entity that keeps a copy of this validator.
    ///
    /// # Errors
    ///
    /// Returns the [`PathError`] of the first failing stage.
    pub fn validate(&self, raw: impl Into<RawInput>) -> Result<ValidatedPath<P>, PathError> {
        ValidatedPath::with_validator(raw, self.clone())
    }
}
