//! Mind-map tree model.
//!
//! This is the interchange shape shared with renderers, clipboard handlers and
//! storage: a synthetic root holding a forest of nodes, each node carrying its
//! display data and an ordered list of children. The JSON encoding produced by
//! serde matches the keys those collaborators expect (`richText`, `imageSize`,
//! ...), and fields this crate does not know about are carried through as-is.

pub mod nodes;

pub use nodes::{Generalization, ImageSize, MindMapNode, MindMapRoot, NodeData};
