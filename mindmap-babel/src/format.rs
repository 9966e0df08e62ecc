//! Format trait definition
//!
//! Every format converts between its textual representation and the
//! [`MindMapRoot`] tree. Formats can support parsing, serialization, or both.

use crate::error::FormatError;
use crate::tree::MindMapRoot;

/// Trait for mind-map formats
///
/// # Examples
///
/// ```ignore
/// struct OutlineFormat;
///
/// impl Format for OutlineFormat {
///     fn name(&self) -> &str {
///         "outline"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, tree: &MindMapRoot) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used for detection from
    /// filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (tree → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a tree
    fn parse(&self, _source: &str) -> Result<MindMapRoot, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a tree into source text
    fn serialize(&self, _tree: &MindMapRoot) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
