//! Flattening Markdown lists into mind-map nodes.
//!
//! Every list item becomes one node whose text comes from the item's first
//! paragraph. Later blocks of the item are folded in as follows:
//!
//! - a paragraph becomes a child node, unless it carries an image and the
//!   item has none yet, in which case the image is claimed by the item;
//! - a nested list directly after the first paragraph nests under the item;
//! - a nested list directly after a later paragraph nests under that
//!   paragraph's node, so continuation text keeps its own sub-points;
//! - any other nested list nests under the item.
//!
//! A paragraph can be reached twice (at its own index, and as the paragraph
//! preceding a list). The visited map below makes sure it lands in the tree
//! only once.

use crate::ast::MdNode;
use crate::common::inline::{first_image, InlineEncoder};
use crate::tree::{MindMapNode, NodeData};
use std::collections::HashMap;
use tracing::debug;

/// Convert a `list` node into one mind-map node per item.
pub fn flatten_list(encoder: &InlineEncoder<'_>, list: &MdNode) -> Vec<MindMapNode> {
    let mut nodes = Vec::new();
    flatten_list_into(encoder, list, &mut nodes);
    nodes
}

/// Like [`flatten_list`], appending to an existing sibling list.
pub fn flatten_list_into(encoder: &InlineEncoder<'_>, list: &MdNode, out: &mut Vec<MindMapNode>) {
    for item in list.children() {
        out.push(ItemBuilder::new(encoder, item).build());
    }
}

/// Where a processed paragraph went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Consumed {
    /// Materialized as the item's child at this position
    Child(usize),
    /// Its image was claimed by the item
    Image,
}

struct ItemBuilder<'e, 'a, 'n> {
    encoder: &'e InlineEncoder<'a>,
    parts: &'n [MdNode],
    node: MindMapNode,
    visited: HashMap<usize, Consumed>,
}

impl<'e, 'a, 'n> ItemBuilder<'e, 'a, 'n> {
    fn new(encoder: &'e InlineEncoder<'a>, item: &'n MdNode) -> Self {
        let parts = item.children();

        let data = match parts.first() {
            Some(first) if first.is_paragraph() => {
                let mut data = encoder.node_data(first);
                if let Some(image) = first_image(first) {
                    data.set_image(
                        image.url,
                        image.alt,
                        encoder.options().placeholder_image_size,
                    );
                }
                data
            }
            _ => NodeData::plain(""),
        };

        ItemBuilder {
            encoder,
            parts,
            node: MindMapNode::new(data),
            visited: HashMap::new(),
        }
    }

    fn build(mut self) -> MindMapNode {
        let parts = self.parts;
        for (index, part) in parts.iter().enumerate().skip(1) {
            if part.is_list() {
                self.nest_list(index, part);
            } else if part.is_paragraph() {
                self.consume_paragraph(index);
            }
        }
        self.node
    }

    fn nest_list(&mut self, index: usize, list: &MdNode) {
        let previous = index - 1;
        let target = if previous != 0 && self.parts[previous].is_paragraph() {
            match self.consume_paragraph(previous) {
                Consumed::Child(position) => Some(position),
                Consumed::Image => None,
            }
        } else {
            None
        };

        match target {
            Some(position) => {
                flatten_list_into(self.encoder, list, &mut self.node.children[position].children)
            }
            None => flatten_list_into(self.encoder, list, &mut self.node.children),
        }
    }

    /// Claim or materialize the paragraph at `index`, once.
    fn consume_paragraph(&mut self, index: usize) -> Consumed {
        if let Some(consumed) = self.visited.get(&index) {
            return *consumed;
        }

        let parts = self.parts;
        let paragraph = &parts[index];
        let consumed = match first_image(paragraph) {
            Some(image) if !self.node.data.has_image() => {
                debug!(url = image.url, "list item claims image from a later paragraph");
                self.node.data.set_image(
                    image.url,
                    image.alt,
                    self.encoder.options().placeholder_image_size,
                );
                Consumed::Image
            }
            _ => {
                let data = self.encoder.node_data(paragraph);
                self.node.children.push(MindMapNode::new(data));
                Consumed::Child(self.node.children.len() - 1)
            }
        };

        self.visited.insert(index, consumed);
        consumed
    }
}
