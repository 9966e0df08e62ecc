//! Markdown bullet-list export
//!
//! Writes the whole tree as one nested `- ` list, two spaces of indent per
//! level, with inline styles rebuilt from the rich text: `**`, `*`, `~~`,
//! `<u>`, links and `$formula$`. Notes, images and generalizations are not
//! written.
//!
//! Export only. There are no file extensions, so it is never auto-detected.

use crate::common::rich_text::html_to_inline_markdown;
use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{MindMapNode, MindMapRoot};

const INDENT: &str = "  ";

/// Format implementation for the bullet-list export
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownListFormat;

impl Format for MarkdownListFormat {
    fn name(&self) -> &str {
        "markdown-list"
    }

    fn description(&self) -> &str {
        "Mind-map tree as a nested Markdown bullet list"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &MindMapRoot) -> Result<String, FormatError> {
        Ok(serialize_to_markdown_list(tree))
    }
}

/// Serialize a tree as a nested bullet list. Top-level nodes are not indented.
pub fn serialize_to_markdown_list(tree: &MindMapRoot) -> String {
    let mut out = String::new();
    for node in &tree.children {
        write_item(node, 0, &mut out);
    }
    out
}

fn write_item(node: &MindMapNode, level: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(level));
    out.push_str("- ");
    out.push_str(&html_to_inline_markdown(&node.data.text));

    if let Some(hyperlink) = node.data.hyperlink.as_deref().filter(|url| !url.is_empty()) {
        out.push_str(&format!(" [🔗]({hyperlink})"));
    }
    out.push('\n');

    for child in &node.children {
        write_item(child, level + 1, out);
    }
}
