//! Tree transforms applied after a tree is built or loaded.
//!
//! These rewrite a [`MindMapRoot`] in place and never look at Markdown:
//!
//! - [`prune_empty_nodes`]: drop nodes with nothing to show
//! - [`trim_by_level`]: cut everything below a maximum depth
//! - [`apply_auto_number`]: prefix nodes with outline numbers (`1`, `1.2`, `1.2.3`)
//!
//! [`TreeTransforms`] bundles them and runs them in that order. Levels count
//! from 1 for the root's children, as in [`MindMapRoot::walk`].

use crate::tree::{MindMapNode, MindMapRoot, NodeData};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\s").expect("valid numbering regex"));

const ENVELOPE_OPEN: &str = "<p><span>";

/// Which transforms to run. The default runs none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeTransforms {
    pub prune_empty: bool,
    /// Deepest level kept; 0 keeps every level.
    pub max_level: usize,
    pub auto_number: bool,
}

impl TreeTransforms {
    pub fn is_noop(&self) -> bool {
        !self.prune_empty && self.max_level == 0 && !self.auto_number
    }

    /// Prune, trim, then number.
    pub fn apply(&self, tree: &mut MindMapRoot) {
        if self.prune_empty {
            let removed = prune_empty_nodes(tree);
            debug!(removed, "pruned empty nodes");
        }
        if self.max_level > 0 {
            let removed = trim_by_level(tree, self.max_level);
            debug!(removed, max_level = self.max_level, "trimmed tree");
        }
        if self.auto_number {
            apply_auto_number(tree);
        }
    }
}

/// Remove nodes whose text is blank and that carry no image, hyperlink or
/// note. Text counts as blank once tags and zero-width characters are
/// stripped. Children are pruned first; a node that still has children is
/// kept. Returns the number of removed nodes.
pub fn prune_empty_nodes(tree: &mut MindMapRoot) -> usize {
    prune_nodes(&mut tree.children)
}

fn prune_nodes(nodes: &mut Vec<MindMapNode>) -> usize {
    let mut removed = 0;
    for node in nodes.iter_mut() {
        removed += prune_nodes(&mut node.children);
    }

    let before = nodes.len();
    nodes.retain(|node| !node.children.is_empty() || has_content(&node.data));
    removed + before - nodes.len()
}

fn has_content(data: &NodeData) -> bool {
    let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    if filled(&data.image) || filled(&data.hyperlink) || filled(&data.note) {
        return true;
    }

    TAG.replace_all(&data.text, "")
        .chars()
        .any(|c| !c.is_whitespace() && !is_zero_width(c))
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Drop the children of every node at `max_level`, so no node sits deeper.
/// A `max_level` of 0 leaves the tree untouched. Returns the number of
/// removed nodes.
pub fn trim_by_level(tree: &mut MindMapRoot, max_level: usize) -> usize {
    if max_level == 0 {
        return 0;
    }
    trim_nodes(&mut tree.children, 1, max_level)
}

fn trim_nodes(nodes: &mut [MindMapNode], level: usize, max_level: usize) -> usize {
    let mut removed = 0;
    for node in nodes {
        if level >= max_level {
            removed += subtree_size(&node.children);
            node.children.clear();
        } else {
            removed += trim_nodes(&mut node.children, level + 1, max_level);
        }
    }
    removed
}

fn subtree_size(nodes: &[MindMapNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + subtree_size(&node.children))
        .sum()
}

/// Prefix every node with its outline number: `1`, `2` for the root's
/// children, `1.1`, `1.2` below them, and so on.
///
/// A node whose text already starts with a number (`3 `, `2.1 `) keeps its
/// text, but its children are still numbered from the computed position.
/// Rich text is numbered inside its envelope.
pub fn apply_auto_number(tree: &mut MindMapRoot) {
    number_nodes(&mut tree.children, "");
}

fn number_nodes(nodes: &mut [MindMapNode], prefix: &str) {
    for (index, node) in nodes.iter_mut().enumerate() {
        let number = if prefix.is_empty() {
            (index + 1).to_string()
        } else {
            format!("{prefix}.{}", index + 1)
        };
        prefix_number(&mut node.data, &number);
        number_nodes(&mut node.children, &number);
    }
}

fn prefix_number(data: &mut NodeData, number: &str) {
    let split = if data.rich_text && data.text.starts_with(ENVELOPE_OPEN) {
        ENVELOPE_OPEN.len()
    } else {
        0
    };

    if NUMBERED.is_match(&data.text[split..]) {
        return;
    }
    data.text.insert_str(split, &format!("{number} "));
}
