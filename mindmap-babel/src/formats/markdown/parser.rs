//! Markdown parsing (Markdown → tree import)
//!
//! Pipeline: Markdown string → comrak AST → `MdNode` AST → mind-map tree

use crate::ast::parse_markdown;
use crate::common::depth_stack::build_tree;
use crate::common::inline::InlineEncoder;
use crate::common::math::{default_math_renderer, MathRenderer};
use crate::error::FormatError;
use crate::options::ImportOptions;
use crate::tree::MindMapRoot;
use tracing::debug;

/// Parse a Markdown string into a mind-map tree
pub fn parse_from_markdown(
    source: &str,
    options: &ImportOptions,
    math: &dyn MathRenderer,
) -> Result<MindMapRoot, FormatError> {
    let document = parse_markdown(source)?;
    let encoder = InlineEncoder::new(options, math);
    let tree = build_tree(&encoder, &document.children);
    debug!(
        blocks = document.children.len(),
        nodes = tree.node_count(),
        "imported markdown"
    );
    Ok(tree)
}

/// Import settings bundled with the math backend they run with.
pub struct MarkdownImporter {
    options: ImportOptions,
    math: Box<dyn MathRenderer>,
}

impl MarkdownImporter {
    pub fn new(options: ImportOptions) -> Self {
        MarkdownImporter {
            options,
            math: default_math_renderer(),
        }
    }

    /// Replace the math backend.
    pub fn with_math_renderer(mut self, math: Box<dyn MathRenderer>) -> Self {
        self.math = math;
        self
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn import(&self, source: &str) -> Result<MindMapRoot, FormatError> {
        parse_from_markdown(source, &self.options, self.math.as_ref())
    }
}

impl Default for MarkdownImporter {
    fn default() -> Self {
        MarkdownImporter::new(ImportOptions::default())
    }
}

impl std::fmt::Debug for MarkdownImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownImporter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
