//! Core types for path handling.
//!
//! This module defines the values that flow through the validation
//! pipeline: the untrusted [`RawInput`], the syntactically canonical
//! [`NormalizedPath`], and the observations made about it ([`PathKind`],
//! [`PermissionState`], [`Existence`]).

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::path::normalize::PathNormalizer;
use crate::path::platform::Platform;

/// The untrusted value a caller asked to validate.
///
/// Values arriving through a dynamically-typed boundary (JSON, FFI, an OS
/// string that is not UTF-8) may not be text at all; those are kept as
/// [`RawInput::NonText`] so validation can reject them with a typed error
/// instead of guessing.
///
/// # Examples
///
/// ```
/// use caminho::RawInput;
///
/// assert_eq!(RawInput::from("/tmp").as_text(), Some("/tmp"));
/// assert_eq!(RawInput::from(&serde_json::json!(12345)).type_name(), "number");
/// assert_eq!(RawInput::from(None::<&str>).type_name(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawInput {
    /// A text value, not yet trimmed or checked.
    Text(String),
    /// Anything that is not text, tagged with the name of its type.
    NonText {
        /// Name of the supplied type, e.g. `number` or `null`.
        type_name: &'static str,
    },
}

impl RawInput {
    /// The text, if this input is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NonText { .. } => None,
        }
    }

    /// Name of the input's type (`string` for text).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::NonText { type_name } => type_name,
        }
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::NonText { type_name } => write!(f, "<{type_name}>"),
        }
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for RawInput {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Option<&str>> for RawInput {
    fn from(text: Option<&str>) -> Self {
        text.map_or(Self::NonText { type_name: "null" }, Self::from)
    }
}

impl From<&OsStr> for RawInput {
    fn from(text: &OsStr) -> Self {
        text.to_str().map_or(
            Self::NonText {
                type_name: "non-UTF-8 OS string",
            },
            Self::from,
        )
    }
}

impl From<&std::path::Path> for RawInput {
    fn from(path: &std::path::Path) -> Self {
        Self::from(path.as_os_str())
    }
}

impl From<&serde_json::Value> for RawInput {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Null => Self::NonText { type_name: "null" },
            Value::Bool(_) => Self::NonText {
                type_name: "boolean",
            },
            Value::Number(_) => Self::NonText {
                type_name: "number",
            },
            Value::Array(_) => Self::NonText { type_name: "array" },
            Value::Object(_) => Self::NonText {
                type_name: "object",
            },
        }
    }
}

impl From<serde_json::Value> for RawInput {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::from(&other),
        }
    }
}

/// The syntactic family a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathFamily {
    /// A path on the local filesystem.
    Local,
    /// A Windows network share, `\\host\share\...`.
    Unc,
    /// A scheme-qualified reference, `scheme://authority/...`.
    Uri,
}

impl PathFamily {
    /// Whether the family names something reached over the network.
    #[must_use]
    pub const fn is_network(self) -> bool {
        matches!(self, Self::Unc | Self::Uri)
    }
}

/// A path in canonical absolute form.
///
/// Instances are only produced by the normalizer, so every value upholds:
/// non-empty, one canonical separator, no `.` segments, no trailing
/// separator except at a root, and no `..` segments for local paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    value: String,
    family: PathFamily,
    platform: Platform,
}

impl NormalizedPath {
    pub(crate) fn new(value: String, family: PathFamily, platform: Platform) -> Self {
        debug_assert!(!value.is_empty());
        Self {
            value,
            family,
            platform,
        }
    }

    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The syntactic family.
    #[must_use]
    pub fn family(&self) -> PathFamily {
        self.family
    }

    /// The platform whose rules produced this path.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether this is a UNC or URI path.
    #[must_use]
    pub fn is_network(&self) -> bool {
        self.family.is_network()
    }

    /// The path as an OS path, for filesystem queries.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.value)
    }

    /// The separator between segments of this path.
    #[must_use]
    pub fn separator(&self) -> char {
        match self.family {
            PathFamily::Local => self.platform.separator(),
            PathFamily::Unc => '\\',
            PathFamily::Uri => '/',
        }
    }

    /// Length in bytes of the root prefix (`/`, `C:\`, `\\`, `scheme://`).
    fn root_len(&self) -> usize {
        match self.family {
            PathFamily::Local => match self.platform {
                Platform::Posix => 1,
                Platform::Windows => 3,
            },
            PathFamily::Unc => 2,
            PathFamily::Uri => self.value.find("://").map_or(0, |idx| idx + 3),
        }
    }

    /// Segments that can be dropped by [`parent`](Self::parent): a share needs
    /// its host and share name, a URI keeps its authority.
    fn fixed_segments(&self) -> usize {
        match self.family {
            PathFamily::Local => 0,
            PathFamily::Unc => 2,
            PathFamily::Uri => usize::from(!self.value[self.root_len()..].starts_with('/')),
        }
    }

    /// The segments after the root prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::path::PathNormalizer;
    /// use caminho::Platform;
    ///
    /// let normalizer = PathNormalizer::new(Platform::Posix).with_working_dir("/");
    /// let path = normalizer.normalize_str("/usr/bin/python").unwrap();
    /// assert_eq!(path.segments(), vec!["usr", "bin", "python"]);
    /// ```
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        let sep = self.separator();
        self.value[self.root_len()..]
            .split(sep)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// The last segment, if it can be removed by [`parent`](Self::parent).
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        let segments = self.segments();
        if segments.len() > self.fixed_segments() {
            segments.last().copied()
        } else {
            None
        }
    }

    /// The extension of [`file_name`](Self::file_name), without the dot.
    ///
    /// Dotfiles such as `.bashrc` have no extension.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// The normalized parent, or `None` at a root.
    #[must_use]
    pub fn parent(&self) -> Option<NormalizedPath> {
        self.file_name()?;
        let root_len = self.root_len();
        let mut cut = self
            .value
            .rfind(self.separator())
            .filter(|&idx| idx >= root_len)
            .unwrap_or(root_len);
        // `file:///tmp` keeps the root slash of its path.
        if cut == root_len
            && self.family == PathFamily::Uri
            && self.value[cut..].starts_with('/')
        {
            cut += 1;
        }
        Some(Self::new(
            self.value[..cut].to_string(),
            self.family,
            self.platform,
        ))
    }
}

impl NormalizedPath {
    /// Join `segment` onto this path and normalize the result.
    ///
    /// An absolute `segment`, a UNC path or a URI replaces this path. A
    /// relative one is resolved beneath it. `~` is an ordinary segment here,
    /// and the filesystem is never touched.
    ///
    /// # Errors
    ///
    /// - [`PathError::Empty`] if `segment` is blank
    /// - [`PathError::InvalidSyntax`] if the joined text is not a valid path
    ///
    /// # Examples
    ///
    /// ```
    /// use caminho::path::PathNormalizer;
    /// use caminho::Platform;
    ///
    /// let normalizer = PathNormalizer::new(Platform::Posix).with_working_dir("/");
    /// let base = normalizer.normalize_str("/srv/dados").unwrap();
    ///
    /// assert_eq!(base.join("logs/../app.log").unwrap().as_str(), "/srv/dados/app.log");
    /// assert_eq!(base.join("/etc").unwrap().as_str(), "/etc");
    /// ```
    pub fn join(&self, segment: &str) -> Result<NormalizedPath, PathError> {
        if segment.trim().is_empty() {
            return Err(PathError::Empty);
        }

        let normalizer = PathNormalizer::new(self.platform).with_home_expansion(false);
        match self.family {
            PathFamily::Local => normalizer
                .with_working_dir(self.value.as_str())
                .normalize_str(segment),
            PathFamily::Unc | PathFamily::Uri => {
                normalizer.normalize_str(segment).or_else(|_| {
                    let joined = format!("{}{}{}", self.value, self.separator(), segment.trim());
                    normalizer.normalize_str(&joined)
                })
            }
        }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// What a path refers to, at the moment it was observed.
///
/// Serialized with the Portuguese labels of the mapping contract.
///
/// # Examples
///
/// ```
/// use caminho::PathKind;
///
/// assert_eq!(PathKind::Directory.label(), "diretório");
/// assert_eq!(PathKind::from_label("link simbólico"), Some(PathKind::Symlink));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// A regular file.
    #[serde(rename = "arquivo")]
    File,
    /// A directory.
    #[serde(rename = "diretório")]
    Directory,
    /// A symbolic link (reported only in no-follow mode).
    #[serde(rename = "link simbólico")]
    Symlink,
    /// A UNC share or URI; never queried on the filesystem.
    #[serde(rename = "compartilhamento de rede")]
    NetworkShare,
    /// Exists, but is none of the above or could not be told apart.
    #[serde(rename = "desconhecido")]
    Unknown,
    /// The path failed validation.
    #[serde(rename = "inválido")]
    Invalid,
}

impl PathKind {
    const ALL: [Self; 6] = [
        Self::File,
        Self::Directory,
        Self::Symlink,
        Self::NetworkShare,
        Self::Unknown,
        Self::Invalid,
    ];

    /// The label used in serialized mappings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "arquivo",
            Self::Directory => "diretório",
            Self::Symlink => "link simbólico",
            Self::NetworkShare => "compartilhamento de rede",
            Self::Unknown => "desconhecido",
            Self::Invalid => "inválido",
        }
    }

    /// Looks a kind up by its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read and write access of the current process to a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermissionState {
    /// Whether the process may read the entity.
    pub readable: bool,
    /// Whether the process may write the entity.
    pub writable: bool,
}

impl PermissionState {
    /// Neither read nor write access.
    pub const NONE: Self = Self {
        readable: false,
        writable: false,
    };

    /// Both read and write access.
    pub const FULL: Self = Self {
        readable: true,
        writable: true,
    };

    /// True only if both read and write are granted.
    #[must_use]
    pub const fn granted(self) -> bool {
        self.readable && self.writable
    }

    /// True if at least one of read or write is granted.
    #[must_use]
    pub const fn any(self) -> bool {
        self.readable || self.writable
    }
}

/// Whether a path existed when it was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Existence {
    /// The path resolved to a filesystem entity.
    Present,
    /// The path did not resolve (only reported when missing paths are allowed).
    Absent,
    /// Reachability was not checked (network shares and URIs).
    Unknown,
}

impl Existence {
    /// `true` only for [`Existence::Present`].
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Present)
    }
}
