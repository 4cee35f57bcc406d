//! The stable mapping of a validated path and its JSON encoding.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::{MetadataProbe, PathKind, ValidatedPath, ValidationOutcome};

/// The five observations about a path, in a fixed key order.
///
/// | key | meaning |
/// |---|---|
/// | `caminho` | normalized path |
/// | `tipo` | kind label |
/// | `existe` | existence at validation time |
/// | `permissao` | read and write both granted |
/// | `normalizado` | canonical form, links resolved |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathMapping {
    /// The normalized path.
    pub caminho: String,
    /// What the path refers to.
    pub tipo: PathKind,
    /// Whether the path existed (`false` when it was not checked).
    pub existe: bool,
    /// Whether both read and write were granted.
    pub permissao: bool,
    /// The canonical form (the normalized path when it does not resolve).
    pub normalizado: String,
}

impl From<&ValidationOutcome> for PathMapping {
    fn from(outcome: &ValidationOutcome) -> Self {
        Self {
            caminho: outcome.normalized.as_str().to_string(),
            tipo: outcome.kind,
            existe: outcome.existence.as_bool(),
            permissao: outcome.permissions.granted(),
            normalizado: outcome.canonical.clone(),
        }
    }
}

/// Converts validated paths to mappings and text.
///
/// # Examples
///
/// ```
/// use caminho::output::PathSerializer;
/// use caminho::path::{MockMetadataProbe, PathNormalizer, PathValidator};
/// use caminho::{PermissionState, Platform};
/// use std::sync::Arc;
///
/// let probe = Arc::new(MockMetadataProbe::new().with_dir("/dados", PermissionState::FULL));
/// let validator = PathValidator::with_parts(PathNormalizer::new(Platform::Posix), probe);
/// let path = validator.validate("/dados/").unwrap();
///
/// let text = PathSerializer::to_text(&path).unwrap();
/// assert_eq!(
///     text,
///     "{\n    \"caminho\": \"/dados\",\n    \"tipo\": \"diretório\",\n    \"existe\": true,\n    \"permissao\": true,\n    \"normalizado\": \"/dados\"\n}"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSerializer;

impl PathSerializer {
    /// The mapping of `path`.
    #[must_use]
    pub fn to_mapping<P: MetadataProbe>(path: &ValidatedPath<P>) -> PathMapping {
        PathMapping {
            caminho: path.normalized().as_str().to_string(),
            tipo: path.kind(),
            existe: path.exists(),
            permissao: path.permissions_at_validation().granted(),
            normalizado: path.canonical().to_string(),
        }
    }

    /// The mapping of `path` as JSON indented by four spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_text<P: MetadataProbe>(path: &ValidatedPath<P>) -> Result<String> {
        Self::mapping_to_text(&Self::to_mapping(path))
    }

    /// Encode a mapping as JSON indented by four spaces.
    ///
    /// Non-ASCII characters are written as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn mapping_to_text(mapping: &PathMapping) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        mapping.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("encoder produced invalid UTF-8: {e}"),
        })
    }

    /// Encode a mapping as single-line JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn mapping_to_compact(mapping: &PathMapping) -> Result<String> {
        Ok(serde_json::to_string(mapping)?)
    }

    /// Decode a mapping from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object with exactly the
    /// five mapping keys.
    pub fn from_text(text: &str) -> Result<PathMapping> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{MockMetadataProbe, PathNormalizer, PathValidator, Platform};
    use crate::PermissionState;
    use std::sync::Arc;

    fn validator(probe: MockMetadataProbe) -> PathValidator<Arc<MockMetadataProbe>> {
        PathValidator::with_parts(PathNormalizer::new(Platform::Posix), Arc::new(probe))
    }

    #[test]
    fn test_keys_in_fixed_order() {
        let v = validator(MockMetadataProbe::new().with_file("/a/b.txt", PermissionState::FULL));
        let text = PathSerializer::to_text(&v.validate("/a/b.txt").unwrap()).unwrap();

        let positions: Vec<usize> = ["caminho", "tipo", "existe", "permissao", "normalizado"]
            .iter()
            .map(|key| text.find(&format!("\"{key}\"")).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(text.contains("\n    \"tipo\": \"arquivo\""));
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let v = validator(MockMetadataProbe::new().with_dir("/relatórios", PermissionState::FULL));
        let text = PathSerializer::to_text(&v.validate("/relatórios").unwrap()).unwrap();

        assert!(text.contains("\"/relatórios\""));
        assert!(text.contains("\"diretório\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_round_trip_through_text() {
        let v = validator(
            MockMetadataProbe::new()
                .with_file("/srv/f", PermissionState::FULL)
                .with_dir("/srv", PermissionState::FULL),
        );
        for raw in ["/srv/f", "/srv"] {
            let mapping = PathSerializer::to_mapping(&v.validate(raw).unwrap());
            let text = PathSerializer::mapping_to_text(&mapping).unwrap();
            assert_eq!(PathSerializer::from_text(&text).unwrap(), mapping);
        }
    }

    #[test]
    fn test_network_mapping() {
        let v = validator(MockMetadataProbe::new());
        let mapping = PathSerializer::to_mapping(&v.validate(r"\\nas\share").unwrap());

        assert_eq!(mapping.tipo, PathKind::NetworkShare);
        assert!(!mapping.existe);
        assert!(!mapping.permissao);
        assert_eq!(mapping.normalizado, mapping.caminho);
    }

    #[test]
    fn test_mapping_from_outcome_matches_entity() {
        let v = validator(MockMetadataProbe::new().with_file("/x", PermissionState::FULL));
        let path = v.validate("/x").unwrap();
        let run = v.run(&"/x".into(), &mut crate::path::PermissionChecker::new());

        assert_eq!(
            PathMapping::from(run.outcome().unwrap()),
            PathSerializer::to_mapping(&path)
        );
    }

    #[test]
    fn test_compact_is_single_line() {
        let v = validator(MockMetadataProbe::new().with_file("/x", PermissionState::FULL));
        let mapping = v.validate("/x").unwrap().to_mapping();
        let compact = PathSerializer::mapping_to_compact(&mapping).unwrap();

        assert!(!compact.contains('\n'));
        assert!(compact.starts_with("{\"caminho\":\"/x\""));
    }

    #[test]
    fn test_from_text_rejects_unknown_keys() {
        let text = r#"{"caminho":"/x","tipo":"arquivo","existe":true,"permissao":true,"normalizado":"/x","extra":1}"#;
        assert!(PathSerializer::from_text(text).is_err());
    }

    #[test]
    fn test_from_text_rejects_unknown_kind() {
        let text = r#"{"caminho":"/x","tipo":"pasta","existe":true,"permissao":true,"normalizado":"/x"}"#;
        assert!(PathSerializer::from_text(text).is_err());
    }
}
