//! Core data structures for the mind-map tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Size used for images whose real dimensions are not known yet.
pub const PLACEHOLDER_IMAGE_SIZE: ImageSize = ImageSize {
    width: 100,
    height: 100,
};

/// The synthetic root of a mind-map. It carries no data of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapRoot {
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

/// A node of the mind-map tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub data: NodeData,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

/// Display data attached to a node.
///
/// When `rich_text` is set, `text` holds the `<p><span>…</span></p>` envelope;
/// otherwise it is HTML-escaped plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rich_text: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generalization: Option<Generalization>,
    /// Keys owned by other collaborators (uid, expand state, styles, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pixel dimensions of a node image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        PLACEHOLDER_IMAGE_SIZE
    }
}

/// Summary annotation(s) attached to a node.
///
/// Stored documents use both a single object and an array, so both shapes
/// are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Generalization {
    Many(Vec<NodeData>),
    Single(Box<NodeData>),
}

impl Generalization {
    /// Iterate over the annotations regardless of the stored shape.
    pub fn iter(&self) -> impl Iterator<Item = &NodeData> {
        let slice: &[NodeData] = match self {
            Generalization::Many(items) => items,
            Generalization::Single(item) => std::slice::from_ref(item.as_ref()),
        };
        slice.iter()
    }
}

impl NodeData {
    /// Plain (already escaped) text.
    pub fn plain(text: impl Into<String>) -> Self {
        NodeData {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Rich text; `inner` is wrapped in the paragraph/span envelope.
    pub fn rich(inner: &str) -> Self {
        NodeData {
            text: format!("<p><span>{inner}</span></p>"),
            rich_text: true,
            ..Default::default()
        }
    }

    /// Attach an image with placeholder dimensions.
    pub fn set_image(&mut self, url: impl Into<String>, title: impl Into<String>, size: ImageSize) {
        self.image = Some(url.into());
        self.image_title = Some(title.into());
        self.image_size = Some(size);
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

impl MindMapNode {
    pub fn new(data: NodeData) -> Self {
        MindMapNode {
            data,
            children: Vec::new(),
        }
    }

    pub fn with_children(data: NodeData, children: Vec<MindMapNode>) -> Self {
        MindMapNode { data, children }
    }
}

impl MindMapRoot {
    pub fn new(children: Vec<MindMapNode>) -> Self {
        MindMapRoot { children }
    }

    /// Visit every node in preorder. `level` is 1 for the root's children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&MindMapNode, usize),
    {
        fn walk_nodes<F: FnMut(&MindMapNode, usize)>(
            nodes: &[MindMapNode],
            level: usize,
            visit: &mut F,
        ) {
            for node in nodes {
                visit(node, level);
                walk_nodes(&node.children, level + 1, visit);
            }
        }
        walk_nodes(&self.children, 1, &mut visit);
    }

    /// Total number of nodes below the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_, _| count += 1);
        count
    }

    /// Mutable access to every node's data, in preorder.
    ///
    /// The borrows are disjoint, so callers may hand them to independent
    /// tasks.
    pub fn data_mut(&mut self) -> Vec<&mut NodeData> {
        fn collect<'a>(nodes: &'a mut [MindMapNode], out: &mut Vec<&'a mut NodeData>) {
            for node in nodes {
                let MindMapNode { data, children } = node;
                out.push(data);
                collect(children, out);
            }
        }
        let mut out = Vec::new();
        collect(&mut self.children, &mut out);
        out
    }
}
