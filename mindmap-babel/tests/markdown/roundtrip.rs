//! Round-trip and structural properties of import/export.

use crate::common::import;
use mindmap_babel::{tree_to_markdown, MindMapNode, MindMapRoot, NodeData};
use proptest::prelude::*;

fn plain_tree(max_depth: u32) -> impl Strategy<Value = Vec<MindMapNode>> {
    let leaf = "[a-z]{1,8}( [a-z]{1,8})?".prop_map(|text| MindMapNode::new(NodeData::plain(text)));
    let node = leaf.prop_recursive(max_depth - 1, 48, 4, |inner| {
        ("[a-z]{1,8}", prop::collection::vec(inner, 0..4)).prop_map(|(text, children)| {
            MindMapNode::with_children(NodeData::plain(text), children)
        })
    });
    prop::collection::vec(node, 1..4)
}

/// Collect `(text, parent text)` in preorder.
fn parents<'a>(nodes: &'a [MindMapNode], parent: Option<&'a str>, out: &mut Vec<(&'a str, Option<&'a str>)>) {
    for node in nodes {
        out.push((node.data.text.as_str(), parent));
        parents(&node.children, Some(node.data.text.as_str()), out);
    }
}

proptest! {
    #[test]
    fn plain_trees_round_trip(children in plain_tree(6)) {
        let tree = MindMapRoot::new(children);
        let markdown = tree_to_markdown(&tree).unwrap();
        prop_assert_eq!(import(&markdown), tree);
    }

    #[test]
    fn export_is_stable_after_one_round_trip(children in plain_tree(6)) {
        let first = tree_to_markdown(&MindMapRoot::new(children)).unwrap();
        let second = tree_to_markdown(&import(&first)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn headings_nest_under_nearest_shallower(depths in prop::collection::vec(1usize..=6, 1..24)) {
        let markdown: String = depths
            .iter()
            .enumerate()
            .map(|(index, depth)| format!("{} h{index}\n\n", "#".repeat(*depth)))
            .collect();

        let root = import(&markdown);
        let mut actual = Vec::new();
        parents(&root.children, None, &mut actual);

        let expected: Vec<(String, Option<String>)> = depths
            .iter()
            .enumerate()
            .map(|(index, depth)| {
                let parent = depths[..index]
                    .iter()
                    .rposition(|earlier| earlier < depth)
                    .map(|position| format!("h{position}"));
                (format!("h{index}"), parent)
            })
            .collect();

        let actual: Vec<(String, Option<String>)> = actual
            .into_iter()
            .map(|(text, parent)| (text.to_string(), parent.map(str::to_string)))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
