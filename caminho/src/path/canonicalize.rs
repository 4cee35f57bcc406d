//! Path canonicalization.
//!
//! Canonicalization follows symlinks to the real path on the filesystem. It
//! differs from normalization, which is purely syntactic:
//! - Only existing paths can be canonicalized
//! - Every link in the path is resolved
//! - Windows' verbatim `\\?\` prefix is removed from the result

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::path::probe::MetadataProbe;
use crate::path::types::NormalizedPath;

/// Canonicalize a path by following symlinks.
///
/// The path must exist for canonicalization to succeed.
///
/// # Errors
///
/// Returns the underlying I/O error if the path does not resolve (missing,
/// dangling link, link loop) or cannot be queried.
///
/// # Examples
///
/// ```no_run
/// use caminho::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> io::Result<PathBuf> {
    fs::canonicalize(path).map(strip_verbatim)
}

/// The canonical text form of a normalized path.
///
/// Network paths and paths the probe cannot resolve keep their normalized
/// form. A canonical form that is not valid UTF-8 also falls back.
pub fn canonical_form<P: MetadataProbe + ?Sized>(path: &NormalizedPath, probe: &P) -> String {
    if path.is_network() {
        return path.as_str().to_string();
    }

    match probe.canonicalize(&path.to_path_buf()) {
        Ok(canonical) => match canonical.into_os_string().into_string() {
            Ok(text) => text,
            Err(_) => path.as_str().to_string(),
        },
        Err(e) => {
            log::trace!("keeping normalized form of {path}: {e}");
            path.as_str().to_string()
        }
    }
}

/// Remove the `\\?\` prefix Windows adds to canonicalized paths.
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path;
    };
    if let Some(rest) = text.strip_prefix(r"\\?\UNC\") {
        PathBuf::from(format!(r"\\{rest}"))
    } else if let Some(rest) = text.strip_prefix(r"\\?\") {
        PathBuf::from(rest)
    } else {
        path
    }
}
