//! Markdown serialization (tree → Markdown export)
//!
//! Walks the tree depth-first in preorder. Levels up to the heading ceiling
//! become `#` headings; deeper levels become indented `*` bullets. Every node
//! is followed by a blank line, then by its note (if any) and another blank
//! line.

use crate::common::rich_text::rich_text_to_markdown;
use crate::error::FormatError;
use crate::options::ExportOptions;
use crate::tree::{Generalization, MindMapNode, MindMapRoot, NodeData};

/// Serialize a mind-map tree to Markdown
pub fn serialize_to_markdown(
    tree: &MindMapRoot,
    options: &ExportOptions,
) -> Result<String, FormatError> {
    if options.max_heading_level == 0 {
        return Err(FormatError::SerializationError(
            "heading ceiling must be at least 1".to_string(),
        ));
    }

    let mut out = String::new();
    write_nodes(&tree.children, 1, options, &mut out);
    Ok(out)
}

fn write_nodes(nodes: &[MindMapNode], level: usize, options: &ExportOptions, out: &mut String) {
    for node in nodes {
        write_node(&node.data, level, options, out);
        write_nodes(&node.children, level + 1, options, out);
    }
}

fn write_node(data: &NodeData, level: usize, options: &ExportOptions, out: &mut String) {
    out.push_str(&level_mark(level, options));
    out.push(' ');
    out.push_str(&node_text(data));

    if let Some(hyperlink) = data.hyperlink.as_deref().filter(|url| !url.is_empty()) {
        out.push_str(&format!(" [🔗]({hyperlink})"));
    }

    if let Some(generalization) = &data.generalization {
        // an empty single annotation is a cleared one
        let single = matches!(generalization, Generalization::Single(_));
        for item in generalization.iter().filter(|item| !(single && item.text.is_empty())) {
            out.push_str(&format!(" [{}]", node_text(item)));
        }
    }

    out.push_str("\n\n");

    if let Some(note) = data.note.as_deref().filter(|note| !note.is_empty()) {
        out.push_str(note);
        out.push_str("\n\n");
    }
}

/// `#` × level, or the bullet form below the heading ceiling.
fn level_mark(level: usize, options: &ExportOptions) -> String {
    if level <= options.max_heading_level {
        "#".repeat(level)
    } else {
        let mut mark = options
            .bullet_indent
            .repeat(level - options.max_heading_level);
        mark.push('*');
        mark
    }
}

/// Text of a node as it appears in Markdown.
pub fn node_text(data: &NodeData) -> String {
    if data.rich_text {
        rich_text_to_markdown(&data.text)
    } else {
        data.text.clone()
    }
}
