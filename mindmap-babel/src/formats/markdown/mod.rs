//! Markdown format implementation
//!
//! Bidirectional conversion between CommonMark Markdown and the mind-map
//! tree.
//!
//! # Library Choice
//!
//! Parsing goes through `comrak` (CommonMark with the GFM strikethrough
//! extension), adapted into the closed [`MdNode`](crate::ast::MdNode)
//! vocabulary. Export writes Markdown directly; the output shape is
//! line-oriented and needs no Markdown AST.
//!
//! # Element Mapping Table
//!
//! | Markdown Element        | Tree on import                                | Markdown on export                   |
//! |-------------------------|-----------------------------------------------|--------------------------------------|
//! | Heading (`#`…)          | Node; depth decides nesting                   | Level ≤ 6 → `#` × level              |
//! | Paragraph               | Child node of the current heading             | (as any node)                        |
//! | List / item             | One node per item, nested lists nest          | Level > 6 → indented `*` bullet      |
//! | Image                   | `image`, `imageTitle`, placeholder size       | Dropped                              |
//! | `**`, `*`, `~~`         | `<strong>`, `<em>`, `<del>` in rich text      | Text only                            |
//! | Link                    | `<a href>` in rich text                       | `[text](url)`                        |
//! | `$…$`, `$$…$$`          | Formula span keeping the literal              | `$…$`                                |
//! | `((id 'title'))`        | Title only, or an anchor when embedded        | Anchor → `[title](url)`              |
//! | Node hyperlink          | Not set                                       | ` [🔗](url)`                         |
//! | Generalization          | Not set                                       | ` [text]` per entry                  |
//! | Note                    | Not set                                       | Paragraph after the node             |
//!
//! # Lossy Conversions
//!
//! - Inline styles are dropped on export; only links and math keep syntax
//! - Images are not exported
//! - Display math comes back as inline `$…$`
//! - Code blocks, quotes and tables are skipped on import

pub mod parser;
pub mod serializer;

use crate::common::math::MathRenderer;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{ExportOptions, ImportOptions};
use crate::tree::MindMapRoot;
use parser::MarkdownImporter;

/// Format implementation for Markdown
#[derive(Debug, Default)]
pub struct MarkdownFormat {
    importer: MarkdownImporter,
    export: ExportOptions,
}

impl MarkdownFormat {
    pub fn new(import: ImportOptions, export: ExportOptions) -> Self {
        MarkdownFormat {
            importer: MarkdownImporter::new(import),
            export,
        }
    }

    pub fn with_math_renderer(mut self, math: Box<dyn MathRenderer>) -> Self {
        self.importer = self.importer.with_math_renderer(math);
        self
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown outline"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<MindMapRoot, FormatError> {
        self.importer.import(source)
    }

    fn serialize(&self, tree: &MindMapRoot) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(tree, &self.export)
    }
}
