//! Conversion between Markdown outlines and mind-map trees
//!
//!     Markdown is a flat sequence of blocks where hierarchy is implied by heading depth and
//!     list nesting. A mind-map is a strict n-ary tree. This crate folds the former into the
//!     latter on import and unfolds it again on export, keeping inline formatting along the way
//!     in a small HTML envelope stored on each node.
//!
//!     This is a pure lib: it powers mindmap-cli but makes no assumption about a shell. Nothing
//!     in here prints, reads environment variables or installs a logger; diagnostics go through
//!     `tracing` and the host decides where they land.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError, ImageError, MathError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── options.rs              # Import / export knobs
//!     ├── images.rs               # Async image resolution pass
//!     ├── transforms.rs           # Prune, depth cut and auto-numbering
//!     ├── tree                    # The mind-map node model (serde)
//!     ├── ast                     # comrak → MdNode adapter
//!     ├── common                  # Import/export algorithms
//!     └── formats
//!         ├── markdown            # parser.rs + serializer.rs
//!         ├── markdown_list       # Nested bullet-list export
//!         └── json                # Tree interchange
//!
//! Core Algorithms
//!
//!     Import (see ./common/depth_stack.rs) walks the top-level blocks once, keeping a stack of
//!     open headings keyed by depth. Lists are flattened item by item (./common/list_flatten.rs),
//!     and every block's inline content is encoded by ./common/inline.rs, which also recognizes
//!     block references and math.
//!
//!     Export is a preorder walk (./formats/markdown/serializer.rs) that writes headings up to
//!     level six, bullets below, and reduces rich text back to Markdown (./common/rich_text.rs).
//!
//!     The round trip is lossy by nature: inline styles other than links and math, images and
//!     code blocks do not survive it. Plain outlines of up to six levels do. The bullet-list
//!     export (./formats/markdown_list) keeps emphasis, strikethrough and underline as well.
//!
//!     Built trees can be post-processed by ./transforms.rs: empty nodes pruned, depth cut,
//!     outline numbers added.
//!
//! Images
//!
//!     Import never does I/O. Images are recorded with a placeholder size; the async pass in
//!     ./images.rs fetches them concurrently, embeds them as data URLs and measures them.
//!
//! Testing
//!     tests
//!     ├── markdown                # import, export, round trip
//!     ├── json
//!     └── images
//!
//!     Rust does not discover tests in subdirectories, so tests/lib.rs includes them.

pub mod ast;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod images;
pub mod options;
pub mod registry;
pub mod transforms;
pub mod tree;

pub use error::{FormatError, ImageError, MathError};
pub use format::Format;
pub use formats::markdown::parser::MarkdownImporter;
pub use images::{
    import_with_images, resolve_images, HttpImageResolver, ImagePassSummary, ImageResolver,
    ImageResolverOptions, ResolvedImage,
};
pub use options::{ExportOptions, ImportOptions};
pub use registry::FormatRegistry;
pub use transforms::TreeTransforms;
pub use tree::{Generalization, ImageSize, MindMapNode, MindMapRoot, NodeData};

/// Import Markdown with default options.
pub fn markdown_to_tree(source: &str) -> Result<MindMapRoot, FormatError> {
    MarkdownImporter::default().import(source)
}

/// Export a tree to Markdown with default options.
pub fn tree_to_markdown(tree: &MindMapRoot) -> Result<String, FormatError> {
    formats::markdown::serializer::serialize_to_markdown(tree, &ExportOptions::default())
}
