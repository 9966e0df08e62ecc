//! The Markdown node vocabulary consumed by the tree builder.

use serde::Serialize;

/// Top-level blocks of a parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MdDocument {
    pub children: Vec<MdNode>,
}

/// A Markdown AST node.
///
/// The set is closed: anything the tree builder has no use for (code blocks,
/// quotes, tables, ...) is kept as [`MdNode::Other`] with its children so
/// inline text inside it can still be extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MdNode {
    Heading {
        depth: u8,
        children: Vec<MdNode>,
    },
    Paragraph {
        children: Vec<MdNode>,
    },
    List {
        ordered: bool,
        children: Vec<MdNode>,
    },
    ListItem {
        children: Vec<MdNode>,
    },
    Text {
        value: String,
    },
    Emphasis {
        children: Vec<MdNode>,
    },
    Strong {
        children: Vec<MdNode>,
    },
    Delete {
        children: Vec<MdNode>,
    },
    Link {
        url: String,
        title: String,
        children: Vec<MdNode>,
    },
    Image {
        url: String,
        alt: String,
        title: String,
    },
    InlineCode {
        value: String,
    },
    Html {
        value: String,
    },
    Other {
        kind: String,
        children: Vec<MdNode>,
    },
}

impl MdNode {
    /// Child nodes; leaves return an empty slice.
    pub fn children(&self) -> &[MdNode] {
        match self {
            MdNode::Heading { children, .. }
            | MdNode::Paragraph { children }
            | MdNode::List { children, .. }
            | MdNode::ListItem { children }
            | MdNode::Emphasis { children }
            | MdNode::Strong { children }
            | MdNode::Delete { children }
            | MdNode::Link { children, .. }
            | MdNode::Other { children, .. } => children,
            MdNode::Text { .. }
            | MdNode::Image { .. }
            | MdNode::InlineCode { .. }
            | MdNode::Html { .. } => &[],
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, MdNode::Paragraph { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, MdNode::List { .. })
    }

    /// Short type name, as shown by `inspect` and in log output.
    pub fn kind(&self) -> &str {
        match self {
            MdNode::Heading { .. } => "heading",
            MdNode::Paragraph { .. } => "paragraph",
            MdNode::List { .. } => "list",
            MdNode::ListItem { .. } => "listItem",
            MdNode::Text { .. } => "text",
            MdNode::Emphasis { .. } => "emphasis",
            MdNode::Strong { .. } => "strong",
            MdNode::Delete { .. } => "delete",
            MdNode::Link { .. } => "link",
            MdNode::Image { .. } => "image",
            MdNode::InlineCode { .. } => "inlineCode",
            MdNode::Html { .. } => "html",
            MdNode::Other { kind, .. } => kind,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        MdNode::Text {
            value: value.into(),
        }
    }
}
