//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the caminho library against a real filesystem and against the in-memory
//! probe.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use caminho::path::{MockMetadataProbe, PathNormalizer, PathValidator, SystemMetadataProbe};
use caminho::Platform;
use tempfile::TempDir;

/// A temporary directory whose path has every link resolved.
///
/// macOS hands out temp dirs under `/var`, a link to `/private/var`; working
/// from the resolved path keeps normalized and canonical forms equal.
pub struct Sandbox {
    _dir: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl Sandbox {
    /// Create an empty sandbox.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        Self { _dir: dir, root }
    }

    /// The resolved sandbox root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `relative` inside the sandbox, as a string.
    pub fn path(&self, relative: &str) -> String {
        self.root.join(relative).to_str().unwrap().to_string()
    }

    /// Create a file with some content and return its path.
    pub fn file(&self, relative: &str) -> String {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "conteúdo").unwrap();
        path.to_str().unwrap().to_string()
    }

    /// Create a directory and return its path.
    pub fn dir(&self, relative: &str) -> String {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).unwrap();
        path.to_str().unwrap().to_string()
    }

    /// Create a symbolic link at `link` pointing to `target` and return the
    /// link's path.
    #[cfg(unix)]
    pub fn symlink(&self, target: &str, link: &str) -> String {
        let link_path = self.root.join(link);
        std::os::unix::fs::symlink(self.root.join(target), &link_path).unwrap();
        link_path.to_str().unwrap().to_string()
    }

    /// A validator that resolves relative input against the sandbox.
    pub fn validator(&self) -> PathValidator {
        PathValidator::with_parts(
            PathNormalizer::new(Platform::detect().unwrap())
                .with_working_dir(self.root.to_str().unwrap())
                .with_home_dir(self.root.to_str().unwrap()),
            SystemMetadataProbe,
        )
    }
}

/// A POSIX validator over an in-memory probe, returned with a handle to the
/// probe for checking query counts.
#[allow(dead_code)]
pub fn mock_validator(
    probe: MockMetadataProbe,
) -> (PathValidator<Arc<MockMetadataProbe>>, Arc<MockMetadataProbe>) {
    let probe = Arc::new(probe);
    let validator = PathValidator::with_parts(
        PathNormalizer::new(Platform::Posix)
            .with_working_dir("/home/ana")
            .with_home_dir("/home/ana"),
        Arc::clone(&probe),
    );
    (validator, probe)
}

/// Whether the tests run as root, which bypasses permission bits.
#[allow(dead_code)]
#[cfg(unix)]
pub fn running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}
