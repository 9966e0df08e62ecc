//! Format implementations
//!
//! Each format converts between the mind-map tree and a text representation.

pub mod json;
pub mod markdown;
pub mod markdown_list;

pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use markdown_list::MarkdownListFormat;
