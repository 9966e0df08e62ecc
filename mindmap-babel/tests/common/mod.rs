//! Helpers shared by the integration tests.

use mindmap_babel::{markdown_to_tree, MindMapNode, MindMapRoot};

pub fn import(md: &str) -> MindMapRoot {
    markdown_to_tree(md).expect("markdown should import")
}

/// Tree shape as `text(children...)`, siblings separated by spaces.
pub fn shape(nodes: &[MindMapNode]) -> String {
    nodes
        .iter()
        .map(|node| {
            if node.children.is_empty() {
                node.data.text.clone()
            } else {
                format!("{}({})", node.data.text, shape(&node.children))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_shape_helper() {
    let root = import("# A\n## B\n");
    assert_eq!(shape(&root.children), "A(B)");
}
