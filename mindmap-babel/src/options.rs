//! Knobs for importing Markdown and exporting trees.

use crate::tree::nodes::{ImageSize, PLACEHOLDER_IMAGE_SIZE};

/// Options for Markdown → tree conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// URI scheme used for `((id 'title'))` block references, without `://`.
    pub block_ref_scheme: String,
    /// Size assigned to images until the image pass measures them.
    pub placeholder_image_size: ImageSize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            block_ref_scheme: "siyuan".to_string(),
            placeholder_image_size: PLACEHOLDER_IMAGE_SIZE,
        }
    }
}

impl ImportOptions {
    /// URL a block id resolves to.
    pub fn block_url(&self, id: &str) -> String {
        format!("{}://blocks/{id}", self.block_ref_scheme)
    }
}

/// Options for tree → Markdown conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Deepest level written as a `#` heading; deeper levels become bullets.
    pub max_heading_level: usize,
    /// Indent unit for bullets below the heading levels.
    pub bullet_indent: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            max_heading_level: 6,
            bullet_indent: "   ".to_string(),
        }
    }
}
