//! Filesystem metadata probing.
//!
//! Every filesystem query the engine makes goes through [`MetadataProbe`].
//! The design uses a trait for testability, allowing both real system
//! queries and an in-memory implementation that counts how often it was asked.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::path::types::PermissionState;

/// Whether symbolic links are followed when querying metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMode {
    /// Report the type of the link's final target.
    #[default]
    Follow,
    /// Report links as links.
    NoFollow,
}

/// The type of a filesystem entry, as reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link (only reported with [`LinkMode::NoFollow`]).
    Symlink,
    /// A fifo, socket, device or anything else.
    Other,
}

impl From<fs::FileType> for EntryType {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Trait for querying filesystem metadata.
///
/// Implementations must be thread-safe so independent entities can be
/// validated on different threads.
///
/// # Examples
///
/// ```
/// use caminho::path::{EntryType, LinkMode, MetadataProbe, SystemMetadataProbe};
/// use std::path::Path;
///
/// let probe = SystemMetadataProbe;
/// let entry = probe.entry_type(Path::new("/"), LinkMode::Follow);
/// # #[cfg(unix)]
/// assert_eq!(entry.unwrap(), EntryType::Directory);
/// ```
pub trait MetadataProbe: Send + Sync {
    /// The type of the entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the entry cannot be queried. With
    /// [`LinkMode::Follow`], a dangling link or a link loop is an error.
    fn entry_type(&self, path: &Path, mode: LinkMode) -> io::Result<EntryType>;

    /// Whether the process may read and write the entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if access cannot be determined.
    fn access(&self, path: &Path) -> io::Result<PermissionState>;

    /// The absolute path with every link resolved.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the path does not resolve.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

impl<P: MetadataProbe + ?Sized> MetadataProbe for Arc<P> {
    fn entry_type(&self, path: &Path, mode: LinkMode) -> io::Result<EntryType> {
        (**self).entry_type(path, mode)
    }

    fn access(&self, path: &Path) -> io::Result<PermissionState> {
        (**self).access(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }
}

/// Production implementation backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMetadataProbe;

impl MetadataProbe for SystemMetadataProbe {
    fn entry_type(&self, path: &Path, mode: LinkMode) -> io::Result<EntryType> {
        let metadata = match mode {
            LinkMode::Follow => fs::metadata(path)?,
            LinkMode::NoFollow => fs::symlink_metadata(path)?,
        };
        Ok(EntryType::from(metadata.file_type()))
    }

    #[cfg(unix)]
    fn access(&self, path: &Path) -> io::Result<PermissionState> {
        use nix::unistd::{access, AccessFlags};

        // Check existence first so a missing entry is an error, not NONE.
        fs::symlink_metadata(path)?;

        Ok(PermissionState {
            readable: access(path, AccessFlags::R_OK).is_ok(),
            writable: access(path, AccessFlags::W_OK).is_ok(),
        })
    }

    #[cfg(not(unix))]
    fn access(&self, path: &Path) -> io::Result<PermissionState> {
        let metadata = fs::metadata(path)?;
        Ok(PermissionState {
            readable: true,
            writable: !metadata.permissions().readonly(),
        })
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        crate::path::canonicalize::canonicalize(path)
    }
}

#[derive(Debug, Clone)]
struct MockEntry {
    entry_type: EntryType,
    permissions: PermissionState,
}

/// In-memory implementation for testing.
///
/// Entries are registered up front; anything else is reported as not found.
/// Every query bumps a counter, so tests can assert how many times the
/// filesystem would have been touched.
///
/// # Examples
///
/// ```
/// use caminho::path::{EntryType, LinkMode, MetadataProbe, MockMetadataProbe};
/// use caminho::PermissionState;
/// use std::path::Path;
///
/// let probe = MockMetadataProbe::new()
///     .with_file("/data/report.txt", PermissionState::FULL)
///     .with_symlink("/data/latest", "/data/report.txt");
///
/// assert_eq!(
///     probe.entry_type(Path::new("/data/latest"), LinkMode::Follow).unwrap(),
///     EntryType::File
/// );
/// assert_eq!(
///     probe.entry_type(Path::new("/data/latest"), LinkMode::NoFollow).unwrap(),
///     EntryType::Symlink
/// );
/// assert_eq!(probe.entry_queries(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockMetadataProbe {
    entries: HashMap<PathBuf, MockEntry>,
    links: HashMap<PathBuf, PathBuf>,
    refused: Vec<PathBuf>,
    entry_queries: AtomicUsize,
    access_queries: AtomicUsize,
}

/// Link resolution gives up after this many hops, like the kernel's ELOOP.
const MAX_LINK_HOPS: usize = 40;

impl MockMetadataProbe {
    /// Create an empty mock probe (nothing exists).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a regular file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, permissions: PermissionState) -> Self {
        self.with_entry(path, EntryType::File, permissions)
    }

    /// Register a directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>, permissions: PermissionState) -> Self {
        self.with_entry(path, EntryType::Directory, permissions)
    }

    /// Register an entry of any type.
    #[must_use]
    pub fn with_entry(
        mut self,
        path: impl Into<PathBuf>,
        entry_type: EntryType,
        permissions: PermissionState,
    ) -> Self {
        self.entries.insert(
            path.into(),
            MockEntry {
                entry_type,
                permissions,
            },
        );
        self
    }

    /// Register a symbolic link. The target need not exist.
    #[must_use]
    pub fn with_symlink(mut self, link: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.links.insert(link.into(), target.into());
        self
    }

    /// Make every query on `path` fail with `PermissionDenied`.
    #[must_use]
    pub fn with_refused(mut self, path: impl Into<PathBuf>) -> Self {
        self.refused.push(path.into());
        self
    }

    /// Number of `entry_type` queries answered so far.
    #[must_use]
    pub fn entry_queries(&self) -> usize {
        self.entry_queries.load(Ordering::SeqCst)
    }

    /// Number of `access` queries answered so far.
    #[must_use]
    pub fn access_queries(&self) -> usize {
        self.access_queries.load(Ordering::SeqCst)
    }

    /// Total number of queries of any kind.
    #[must_use]
    pub fn total_queries(&self) -> usize {
        self.entry_queries() + self.access_queries()
    }

    fn check_refused(&self, path: &Path) -> io::Result<()> {
        if self.refused.iter().any(|refused| refused == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("access to {} refused", path.display()),
            ));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let mut current = path.to_path_buf();
        for _ in 0..MAX_LINK_HOPS {
            self.check_refused(&current)?;
            match self.links.get(&current) {
                Some(target) => current = target.clone(),
                None if self.entries.contains_key(&current) => return Ok(current),
                None => return Err(not_found(&current)),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("too many levels of symbolic links: {}", path.display()),
        ))
    }

    fn entry(&self, path: &Path) -> io::Result<&MockEntry> {
        let resolved = self.resolve(path)?;
        self.entries.get(&resolved).ok_or_else(|| not_found(path))
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl MetadataProbe for MockMetadataProbe {
    fn entry_type(&self, path: &Path, mode: LinkMode) -> io::Result<EntryType> {
        self.entry_queries.fetch_add(1, Ordering::SeqCst);
        if mode == LinkMode::NoFollow && self.links.contains_key(path) {
            self.check_refused(path)?;
            return Ok(EntryType::Symlink);
        }
        self.entry(path).map(|entry| entry.entry_type)
    }

    fn access(&self, path: &Path) -> io::Result<PermissionState> {
        self.access_queries.fetch_add(1, Ordering::SeqCst);
        self.entry(path).map(|entry| entry.permissions)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.resolve(path)
    }
}
