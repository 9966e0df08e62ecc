//! Building blocks shared by the Markdown importer and exporter.

pub mod block_ref;
pub mod depth_stack;
pub mod escape;
pub mod inline;
pub mod list_flatten;
pub mod math;
pub mod rich_text;
