//! Memoized permission checks.

use std::collections::HashMap;

use crate::path::probe::MetadataProbe;
use crate::path::types::{NormalizedPath, PermissionState};

/// Answers "may this process read and write the path?", once per path.
///
/// Results are cached per [`NormalizedPath`]. The cache is never invalidated
/// implicitly: the owning entity drops it when its path changes, and callers
/// may [`clear`](Self::clear) it explicitly.
///
/// # Examples
///
/// ```
/// use caminho::path::{MockMetadataProbe, PathNormalizer, PermissionChecker};
/// use caminho::{PermissionState, Platform};
///
/// let probe = MockMetadataProbe::new().with_file("/data.csv", PermissionState::FULL);
/// let path = PathNormalizer::new(Platform::Posix)
///     .normalize_str("/data.csv")
///     .unwrap();
///
/// let mut checker = PermissionChecker::new();
/// assert!(checker.check(&path, &probe).granted());
/// assert!(checker.check(&path, &probe).granted());
/// assert_eq!(checker.queries(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionChecker {
    cache: HashMap<NormalizedPath, PermissionState>,
    queries: usize,
}

impl PermissionChecker {
    /// Create a checker with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The permissions of `path`.
    ///
    /// Never fails: a probe error is reported as [`PermissionState::NONE`]
    /// (and cached like any other answer). Network paths are never probed.
    pub fn check<P: MetadataProbe + ?Sized>(
        &mut self,
        path: &NormalizedPath,
        probe: &P,
    ) -> PermissionState {
        if path.is_network() {
            return PermissionState::NONE;
        }
        if let Some(state) = self.cache.get(path) {
            log::trace!("permission cache hit for {path}");
            return *state;
        }

        self.queries += 1;
        let state = probe.access(&path.to_path_buf()).unwrap_or_else(|e| {
            log::debug!("permission query for {path} failed: {e}");
            PermissionState::NONE
        });
        self.cache.insert(path.clone(), state);
        state
    }

    /// The cached answer for `path`, without querying.
    #[must_use]
    pub fn cached(&self, path: &NormalizedPath) -> Option<PermissionState> {
        self.cache.get(path).copied()
    }

    /// Drop every cached answer. The query count is kept.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of probe queries this checker has made.
    #[must_use]
    pub fn queries(&self) -> usize {
        self.queries
    }
}
