//! JSON interchange format
//!
//! The tree exactly as the renderer and storage layer exchange it: camelCase
//! keys, absent optionals omitted, unknown keys carried through.

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::MindMapRoot;

/// Format implementation for the JSON tree
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Mind-map tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<MindMapRoot, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(format!("Invalid tree JSON: {e}")))
    }

    fn serialize(&self, tree: &MindMapRoot) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tree)
            .map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
    }
}
