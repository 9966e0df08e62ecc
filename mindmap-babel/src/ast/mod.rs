//! Markdown AST consumed by the tree builder.
//!
//! The parser itself is comrak; [`from_comrak`] adapts its arena tree into the
//! owned [`nodes::MdNode`] vocabulary (heading, paragraph, list, list item and
//! the inline kinds) so the rest of the crate works on a closed sum type.

pub mod from_comrak;
pub mod nodes;

pub use from_comrak::parse_markdown;
pub use nodes::{MdDocument, MdNode};
