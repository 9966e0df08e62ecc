//! Export tests for Markdown format (tree → Markdown)

use crate::common::import;
use insta::assert_snapshot;
use mindmap_babel::{tree_to_markdown, Generalization, MindMapNode, MindMapRoot, NodeData};

fn node(text: &str, children: Vec<MindMapNode>) -> MindMapNode {
    MindMapNode::with_children(NodeData::plain(text), children)
}

#[test]
fn test_export_outline() {
    let mut topic = NodeData::plain("Topic");
    topic.hyperlink = Some("https://example.com/topic".to_string());
    topic.note = Some("Remember to review.".to_string());
    topic.generalization = Some(Generalization::Single(Box::new(NodeData::plain("summary"))));

    let root = MindMapRoot::new(vec![
        MindMapNode::with_children(topic, vec![node("first", vec![]), node("second", vec![])]),
        node("Other", vec![]),
    ]);

    assert_snapshot!(tree_to_markdown(&root).unwrap(), @r#"
# Topic [🔗](https://example.com/topic) [summary]

Remember to review.

## first

## second

# Other
"#);
}

#[test]
fn test_export_deep_levels_become_bullets() {
    let mut leaf = node("level 8", vec![]);
    for level in (1..8).rev() {
        leaf = node(&format!("level {level}"), vec![leaf]);
    }
    let root = MindMapRoot::new(vec![leaf]);

    assert_snapshot!(tree_to_markdown(&root).unwrap(), @r#"
# level 1

## level 2

### level 3

#### level 4

##### level 5

###### level 6

   * level 7

      * level 8
"#);
}

#[test]
fn test_export_rich_text() {
    let root = import("**Bold** and [link](https://a.b/?x=1&y=2)\n\nMath: $$x<y$$ end\n");

    assert_snapshot!(tree_to_markdown(&root).unwrap(), @r#"
# Bold and [link](https://a.b/?x=1&y=2)

# Math: $x<y$ end
"#);
}

#[test]
fn test_export_embedded_block_reference_as_link() {
    let root = import("see ((abc123 'Intro')) first");
    assert_eq!(
        tree_to_markdown(&root).unwrap(),
        "# see [Intro](siyuan://blocks/abc123) first\n\n"
    );
}

#[test]
fn test_export_generalization_array() {
    let mut data = NodeData::plain("Topic");
    data.generalization = Some(Generalization::Many(vec![
        NodeData::plain("one"),
        NodeData::rich("<strong>two</strong>"),
    ]));
    let root = MindMapRoot::new(vec![MindMapNode::new(data)]);
    assert_eq!(tree_to_markdown(&root).unwrap(), "# Topic [one] [two]\n\n");
}

#[test]
fn test_export_empty_tree() {
    assert_eq!(tree_to_markdown(&MindMapRoot::default()).unwrap(), "");
}
