//! CLI inspect transforms
//!
//! Each transform is a stage + format combination:
//!
//! - `ast-json`: the Markdown AST the tree builder consumes
//! - `tree-json`: the built mind-map tree, as stored
//! - `tree-outline`: the built tree as an indented outline, one node per line
//!
//! Example: `mindmap inspect notes.md tree-outline`

use mindmap_babel::ast::parse_markdown;
use mindmap_babel::formats::markdown::serializer::node_text;
use mindmap_babel::{MarkdownImporter, MindMapRoot};

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ast-json", "tree-json", "tree-outline"];

pub const DEFAULT_TRANSFORM: &str = "tree-outline";

/// Run a transform over Markdown source.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    importer: &MarkdownImporter,
) -> Result<String, String> {
    match transform_name {
        "ast-json" => {
            let doc = parse_markdown(source).map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "tree-json" => {
            let tree = importer
                .import(source)
                .map_err(|e| format!("Transform failed: {e}"))?;
            serde_json::to_string_pretty(&tree)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "tree-outline" => {
            let tree = importer
                .import(source)
                .map_err(|e| format!("Transform failed: {e}"))?;
            Ok(to_outline(&tree))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

/// Two spaces per level; image nodes are tagged with their URL.
fn to_outline(tree: &MindMapRoot) -> String {
    let mut out = String::new();
    tree.walk(|node, level| {
        out.push_str(&"  ".repeat(level - 1));
        out.push_str(&node_text(&node.data).replace('\n', " "));
        if let Some(image) = &node.data.image {
            out.push_str(&format!(" [image: {image}]"));
        }
        out.push('\n');
    });
    out
}
