//! Output formatter implementations.

use crate::Result;

use super::{OutputFormatter, PathMapping, PathSerializer};

/// Formatter for JSON output indented by four spaces.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, mapping: &PathMapping) -> Result<String> {
        PathSerializer::mapping_to_text(mapping)
    }
}

/// Formatter for single-line JSON output.
pub struct CompactFormatter;

impl OutputFormatter for CompactFormatter {
    fn format(&self, mapping: &PathMapping) -> Result<String> {
        PathSerializer::mapping_to_compact(mapping)
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

fn yes_no(value: bool) -> &'static str {
    if value {
        "sim"
    } else {
        "não"
    }
}

impl OutputFormatter for HumanFormatter {
    fn format(&self, mapping: &PathMapping) -> Result<String> {
        let mut lines = vec![
            mapping.caminho.clone(),
            format!("  tipo: {}", mapping.tipo),
            format!("  existe: {}", yes_no(mapping.existe)),
            format!("  permissao: {}", yes_no(mapping.permissao)),
        ];
        if mapping.normalizado != mapping.caminho {
            lines.push(format!("  normalizado: {}", mapping.normalizado));
        }

        Ok(lines.join("\n"))
    }
}
