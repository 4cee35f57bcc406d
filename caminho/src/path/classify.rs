//! Path classification.
//!
//! Maps filesystem metadata to a [`PathKind`]. Classification never fails:
//! anything the probe cannot answer is [`PathKind::Unknown`].

use crate::path::probe::{EntryType, LinkMode, MetadataProbe};
use crate::path::types::{NormalizedPath, PathKind};

/// Decides what kind of entity a path refers to.
///
/// # Examples
///
/// ```
/// use caminho::path::{EntryType, LinkMode, MockMetadataProbe, PathClassifier, PathNormalizer};
/// use caminho::{PathKind, PermissionState, Platform};
///
/// assert_eq!(PathClassifier::kind_of(EntryType::Directory), PathKind::Directory);
///
/// let probe = MockMetadataProbe::new()
///     .with_dir("/srv", PermissionState::FULL)
///     .with_symlink("/www", "/srv");
/// let path = PathNormalizer::new(Platform::Posix).normalize_str("/www").unwrap();
///
/// assert_eq!(PathClassifier::classify(&path, LinkMode::Follow, &probe), PathKind::Directory);
/// assert_eq!(PathClassifier::classify(&path, LinkMode::NoFollow, &probe), PathKind::Symlink);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathClassifier;

impl PathClassifier {
    /// The kind corresponding to an entry type.
    #[must_use]
    pub const fn kind_of(entry: EntryType) -> PathKind {
        match entry {
            EntryType::File => PathKind::File,
            EntryType::Directory => PathKind::Directory,
            EntryType::Symlink => PathKind::Symlink,
            EntryType::Other => PathKind::Unknown,
        }
    }

    /// Classify `path`.
    ///
    /// Network paths are [`PathKind::NetworkShare`] without a probe query.
    /// With [`LinkMode::Follow`] a link reports its target's kind; with
    /// [`LinkMode::NoFollow`] it reports [`PathKind::Symlink`].
    pub fn classify<P: MetadataProbe + ?Sized>(
        path: &NormalizedPath,
        mode: LinkMode,
        probe: &P,
    ) -> PathKind {
        if path.is_network() {
            return PathKind::NetworkShare;
        }

        match probe.entry_type(&path.to_path_buf(), mode) {
            Ok(entry) => Self::kind_of(entry),
            Err(e) => {
                log::debug!("cannot classify {path}: {e}");
                PathKind::Unknown
            }
        }
    }
}
