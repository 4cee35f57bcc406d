//! Path normalization.
//!
//! Normalization is purely syntactic. It:
//! - Rejects non-text and empty input
//! - Recognizes UNC shares and scheme-qualified URIs and canonicalizes them
//!   without touching the filesystem
//! - Expands tilde (~) to the home directory
//! - Converts relative paths to absolute paths against the working directory
//! - Resolves `.` and `..` components
//! - Rewrites separators to the platform's canonical one

use std::env;

use crate::error::PathError;
use crate::path::platform::Platform;
use crate::path::types::{NormalizedPath, PathFamily, RawInput};

/// Characters Windows forbids inside a path component.
const WINDOWS_RESERVED: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Turns raw input into a [`NormalizedPath`].
///
/// The working and home directories are captured when the normalizer is
/// built, so a given normalizer maps identical input to identical output.
///
/// # Examples
///
/// ```
/// use caminho::path::PathNormalizer;
/// use caminho::Platform;
///
/// let normalizer = PathNormalizer::new(Platform::Posix)
///     .with_working_dir("/home/user")
///     .with_home_dir("/home/user");
///
/// let path = normalizer.normalize_str("projects/../docs/./a.txt").unwrap();
/// assert_eq!(path.as_str(), "/home/user/docs/a.txt");
///
/// let path = normalizer.normalize_str("~/notes").unwrap();
/// assert_eq!(path.as_str(), "/home/user/notes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    platform: Platform,
    working_dir: Option<String>,
    home_dir: Option<String>,
    expand_home: bool,
    allowed_schemes: Option<Vec<String>>,
}

impl PathNormalizer {
    /// Create a normalizer for `platform` with no working or home directory.
    ///
    /// Relative and `~` paths fail until those are provided.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            working_dir: None,
            home_dir: None,
            expand_home: true,
            allowed_schemes: None,
        }
    }

    /// Create a normalizer for the running process.
    ///
    /// Captures the current working directory and the home directory. Either
    /// may be missing (or not valid UTF-8), in which case inputs that need it
    /// fail with [`PathError::InvalidSyntax`].
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedPlatform`] if the host is neither
    /// POSIX nor Windows.
    pub fn host() -> Result<Self, PathError> {
        let platform = Platform::detect()?;
        let working_dir = env::current_dir()
            .ok()
            .and_then(|dir| dir.to_str().map(str::to_string));
        let home_dir = home::home_dir().and_then(|dir| dir.to_str().map(str::to_string));

        Ok(Self {
            working_dir,
            home_dir,
            ..Self::new(platform)
        })
    }

    /// Apply another platform's rules.
    ///
    /// The captured directories are kept as they are, so relative input only
    /// resolves if the working directory is absolute under the new rules.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the directory relative paths are resolved against.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the directory a leading `~` expands to.
    #[must_use]
    pub fn with_home_dir(mut self, dir: impl Into<String>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Enable or disable `~` expansion (enabled by default).
    ///
    /// When disabled, `~` is an ordinary relative segment.
    #[must_use]
    pub fn with_home_expansion(mut self, expand: bool) -> Self {
        self.expand_home = expand;
        self
    }

    /// Restrict the URI schemes that are accepted (`None` accepts any).
    ///
    /// Schemes are compared case-insensitively.
    #[must_use]
    pub fn with_allowed_schemes(mut self, schemes: Option<Vec<String>>) -> Self {
        self.allowed_schemes = schemes;
        self
    }

    /// The platform whose rules this normalizer applies.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The captured working directory, if any.
    #[must_use]
    pub fn working_dir(&self) -> Option<&str> {
        self.working_dir.as_deref()
    }

    /// Normalize a raw input.
    ///
    /// # Errors
    ///
    /// - [`PathError::WrongType`] if the input is not text
    /// - [`PathError::Empty`] if the text is empty after trimming
    /// - [`PathError::InvalidSyntax`] if the text is not a valid path
    pub fn normalize(&self, raw: &RawInput) -> Result<NormalizedPath, PathError> {
        let text = raw.as_text().ok_or_else(|| PathError::WrongType {
            found: raw.type_name().to_string(),
        })?;
        self.normalize_str(text)
    }

    /// Normalize a text input.
    ///
    /// # Errors
    ///
    /// Same as [`normalize`](Self::normalize), minus the type check.
    pub fn normalize_str(&self, text: &str) -> Result<NormalizedPath, PathError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        if trimmed.contains('\0') {
            return Err(PathError::invalid_syntax(
                trimmed,
                "path contains a NUL character",
            ));
        }

        if let Some(body) = self.strip_unc_prefix(trimmed) {
            return normalize_unc(trimmed, body).map(|value| self.build(value, PathFamily::Unc));
        }
        if let Some((scheme, rest)) = split_scheme(trimmed) {
            return self
                .normalize_uri(trimmed, scheme, rest)
                .map(|value| self.build(value, PathFamily::Uri));
        }

        let local = self.strip_verbatim_prefix(trimmed);
        let expanded = self.expand_tilde(local)?;
        let value = match self.platform {
            Platform::Posix => self.normalize_posix(trimmed, &expanded)?,
            Platform::Windows => self.normalize_windows(trimmed, &expanded)?,
        };
        Ok(self.build(value, PathFamily::Local))
    }

    fn build(&self, value: String, family: PathFamily) -> NormalizedPath {
        NormalizedPath::new(value, family, self.platform)
    }

    /// The part after `\\` for UNC input, with Windows' verbatim
    /// `\\?\UNC\` form folded in.
    fn strip_unc_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        if let Some(rest) = self.verbatim_rest(text) {
            let is_sep = |c: char| self.platform.is_separator(c) || c == '\\';
            return rest
                .get(..3)
                .filter(|unc| unc.eq_ignore_ascii_case("UNC"))
                .and_then(|_| rest[3..].strip_prefix(is_sep));
        }
        text.strip_prefix(r"\\").or_else(|| match self.platform {
            Platform::Windows => text.strip_prefix("//"),
            Platform::Posix => None,
        })
    }

    /// What follows a `\\?\` or `\\.\` prefix. Windows also accepts `/`
    /// in any position of the prefix.
    fn verbatim_rest<'a>(&self, text: &'a str) -> Option<&'a str> {
        let is_sep = |b: u8| b == b'\\' || (self.platform == Platform::Windows && b == b'/');
        match text.as_bytes() {
            [a, b, b'?' | b'.', c, ..] if is_sep(*a) && is_sep(*b) && is_sep(*c) => {
                Some(&text[4..])
            }
            _ => None,
        }
    }

    /// Drop Windows' `\\?\` and `\\.\` prefixes from local paths.
    fn strip_verbatim_prefix<'a>(&self, text: &'a str) -> &'a str {
        match self.platform {
            Platform::Windows => self.verbatim_rest(text).unwrap_or(text),
            Platform::Posix => text,
        }
    }

    fn normalize_uri(&self, input: &str, scheme: &str, rest: &str) -> Result<String, PathError> {
        if let Some(allowed) = &self.allowed_schemes {
            if !allowed.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
                return Err(PathError::invalid_syntax(
                    input,
                    format!("scheme '{scheme}' is not allowed"),
                ));
            }
        }

        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        if authority.is_empty() && !scheme.eq_ignore_ascii_case("file") {
            return Err(PathError::invalid_syntax(input, "URI has no host"));
        }

        let mut value = format!("{scheme}://{authority}");
        for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            value.push('/');
            value.push_str(segment);
        }
        // A hostless URI such as `file:///` keeps its root slash.
        if authority.is_empty() && value.ends_with("://") {
            value.push('/');
        }
        Ok(value)
    }

    /// Expand tilde (~) to the home directory.
    ///
    /// Handles `~`, `~/path` and `~\path` but not `~user`.
    fn expand_tilde(&self, text: &str) -> Result<String, PathError> {
        if !self.expand_home || !text.starts_with('~') {
            return Ok(text.to_string());
        }

        let home = self
            .home_dir
            .as_deref()
            .ok_or_else(|| PathError::invalid_syntax(text, "Cannot determine home directory"))?;

        if text == "~" {
            Ok(home.to_string())
        } else if text.starts_with("~/") || text.starts_with("~\\") {
            Ok(format!("{home}{}{}", self.platform.separator(), &text[2..]))
        } else {
            Err(PathError::invalid_syntax(
                text,
                "~user syntax is not supported; use ~ or ~/path",
            ))
        }
    }

    fn normalize_posix(&self, input: &str, text: &str) -> Result<String, PathError> {
        let mut stack = Vec::new();
        if !text.starts_with('/') {
            let cwd = self.require_working_dir(input)?;
            if !cwd.starts_with('/') {
                return Err(PathError::invalid_syntax(
                    input,
                    format!("working directory '{cwd}' is not absolute"),
                ));
            }
            resolve_components(input, cwd.split('/'), &mut stack)?;
        }
        resolve_components(input, text.split('/'), &mut stack)?;

        Ok(format!("/{}", stack.join("/")))
    }

    fn normalize_windows(&self, input: &str, text: &str) -> Result<String, PathError> {
        let is_sep = |c: char| self.platform.is_separator(c);
        let mut stack = Vec::new();

        let drive = if let Some(drive) = drive_letter(text) {
            let rest = &text[2..];
            if !rest.starts_with(is_sep) {
                return Err(PathError::invalid_syntax(
                    input,
                    "drive-relative paths are not supported",
                ));
            }
            resolve_windows_components(input, rest.split(is_sep), &mut stack)?;
            drive
        } else {
            let cwd = self.require_working_dir(input)?;
            let drive = drive_letter(cwd)
                .filter(|_| cwd[2..].starts_with(is_sep))
                .ok_or_else(|| {
                    PathError::invalid_syntax(
                        input,
                        format!("working directory '{cwd}' is not absolute"),
                    )
                })?;
            if !text.starts_with(is_sep) {
                resolve_windows_components(input, cwd[2..].split(is_sep), &mut stack)?;
            }
            resolve_windows_components(input, text.split(is_sep), &mut stack)?;
            drive
        };

        Ok(format!("{drive}:\\{}", stack.join("\\")))
    }

    fn require_working_dir(&self, input: &str) -> Result<&str, PathError> {
        self.working_dir.as_deref().ok_or_else(|| {
            PathError::invalid_syntax(input, "relative path and no working directory is known")
        })
    }
}

/// Resolve `.` and `..` components onto `stack`.
///
/// Empty components (from duplicate separators) and `.` are skipped; `..`
/// pops the last component.
///
/// # Errors
///
/// Returns [`PathError::InvalidSyntax`] if a `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use caminho::path::normalize::resolve_components;
///
/// let mut stack = Vec::new();
/// resolve_components("/a/./b/../c", "/a/./b/../c".split('/'), &mut stack).unwrap();
/// assert_eq!(stack, vec!["a", "c"]);
///
/// let mut stack = Vec::new();
/// assert!(resolve_components("/a/../..", "/a/../..".split('/'), &mut stack).is_err());
/// ```
pub fn resolve_components<'a>(
    input: &str,
    components: impl Iterator<Item = &'a str>,
    stack: &mut Vec<&'a str>,
) -> Result<(), PathError> {
    for component in components {
        match component {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(PathError::invalid_syntax(
                        input,
                        "Path contains too many '..' components (escapes root)",
                    ));
                }
            }
            other => stack.push(other),
        }
    }
    Ok(())
}

/// Like [`resolve_components`], but first rejects any component holding a
/// character Windows forbids, even one a later `..` would remove.
fn resolve_windows_components<'a>(
    input: &str,
    components: impl Iterator<Item = &'a str>,
    stack: &mut Vec<&'a str>,
) -> Result<(), PathError> {
    let components: Vec<&'a str> = components.collect();
    if let Some(bad) = components.iter().find(|component| {
        component
            .chars()
            .any(|c| WINDOWS_RESERVED.contains(&c) || c.is_control())
    }) {
        return Err(PathError::invalid_syntax(
            input,
            format!("component '{bad}' contains a character not allowed on Windows"),
        ));
    }
    resolve_components(input, components.into_iter(), stack)
}

/// Canonicalize the body of a UNC path (the part after `\\`).
fn normalize_unc(input: &str, body: &str) -> Result<String, PathError> {
    let segments: Vec<&str> = body
        .split(['\\', '/'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    match segments.as_slice() {
        [host, share, ..] if !matches!(*host, ".." | "?") && *share != ".." => {
            Ok(format!(r"\\{}", segments.join("\\")))
        }
        _ => Err(PathError::invalid_syntax(
            input,
            "UNC path needs a host and a share",
        )),
    }
}

/// Split `scheme://rest`, if `text` starts with a scheme of two or more
/// characters (so `C://` stays a drive).
fn split_scheme(text: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = text.split_once("://")?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = scheme.len() >= 2
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

/// The upper-cased drive letter of a `X:` prefix.
fn drive_letter(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => {
            Some(letter.to_ascii_uppercase())
        }
        _ => None,
    }
}

/// Normalize a string with the host's rules and the current directories.
///
/// # Errors
///
/// See [`PathNormalizer::normalize_str`].
///
/// # Examples
///
/// ```no_run
/// use caminho::path::normalize::normalize;
///
/// let normalized = normalize("./src").unwrap();
/// assert!(normalized.as_str().len() > 1);
/// ```
pub fn normalize(text: &str) -> Result<NormalizedPath, PathError> {
    PathNormalizer::host()?.normalize_str(text)
}
