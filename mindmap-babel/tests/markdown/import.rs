//! Import tests for Markdown format (Markdown → tree)

use crate::common::{import, shape};
use mindmap_babel::format::Format;
use mindmap_babel::formats::markdown::MarkdownFormat;
use mindmap_babel::{ExportOptions, ImageSize, ImportOptions};

#[test]
fn test_single_heading() {
    let root = import("# Title");
    assert_eq!(root.children.len(), 1);

    let data = &root.children[0].data;
    assert_eq!(data.text, "Title");
    assert!(!data.rich_text);
    assert!(root.children[0].children.is_empty());
}

#[test]
fn test_bold_paragraph() {
    let root = import("**Bold**");
    let data = &root.children[0].data;
    assert!(data.rich_text);
    assert_eq!(data.text, "<p><span><strong>Bold</strong></span></p>");
}

#[test]
fn test_nested_list() {
    let root = import("- A\n  - B");
    assert_eq!(shape(&root.children), "A(B)");
}

#[test]
fn test_display_math() {
    let root = import("Math: $$x=y$$ end");
    let data = &root.children[0].data;
    assert!(data.rich_text);
    assert!(data.text.starts_with("<p><span>Math: <span class=\"ql-formula\" data-value=\"x=y\">"));
    assert!(data.text.ends_with("</span> end</span></p>"));
}

#[test]
fn test_list_item_with_image_then_text() {
    let root = import("- ![diagram](assets/d.png)\n\n  explains the flow\n");
    assert_eq!(root.children.len(), 1);

    let item = &root.children[0];
    assert_eq!(item.data.image.as_deref(), Some("assets/d.png"));
    assert_eq!(item.data.image_title.as_deref(), Some("diagram"));
    assert_eq!(item.data.image_size, Some(ImageSize { width: 100, height: 100 }));
    assert_eq!(item.children.len(), 1);
    assert_eq!(item.children[0].data.text, "explains the flow");
}

#[test]
fn test_pure_block_reference() {
    let root = import("((abc123 'My Title'))");
    let data = &root.children[0].data;
    assert_eq!(data.text, "My Title");
    assert!(!data.rich_text);
    assert!(data.hyperlink.is_none());
}

#[test]
fn test_embedded_block_reference() {
    let root = import("see ((abc123 \"Intro\")) first");
    let data = &root.children[0].data;
    assert!(data.rich_text);
    assert!(data.text.contains(r#"<a href="siyuan://blocks/abc123" target="_blank" rel="noopener noreferrer">Intro</a>"#));
}

#[test]
fn test_kbd_tags() {
    let root = import("Use <kbd>Ctrl</kbd>+<kbd>C</kbd>");
    let data = &root.children[0].data;
    assert_eq!(data.text, "Use Ctrl+C");
    assert!(!data.rich_text);
}

#[test]
fn test_document_outline() {
    let md = "\
# Project

Goals for the quarter.

## Research

- papers
  - survey
- interviews

## Build

### Backend

### Frontend

# Notes
";
    let root = import(md);
    assert_eq!(
        shape(&root.children),
        "Project(Goals for the quarter. Research(papers(survey) interviews) Build(Backend Frontend)) Notes"
    );
}

#[test]
fn test_unsupported_blocks_are_skipped() {
    let md = "# A\n\n> quoted\n\n---\n\n```rust\nfn main() {}\n```\n\nkept\n";
    let root = import(md);
    assert_eq!(shape(&root.children), "A(kept)");
}

#[test]
fn test_custom_block_ref_scheme() {
    let format = MarkdownFormat::new(
        ImportOptions {
            block_ref_scheme: "notes".to_string(),
            ..Default::default()
        },
        ExportOptions::default(),
    );
    let root = format.parse("x ((id-1 'T'))").unwrap();
    assert!(root.children[0].data.text.contains("notes://blocks/id-1"));
}

#[test]
fn test_custom_placeholder_size() {
    let format = MarkdownFormat::new(
        ImportOptions {
            placeholder_image_size: ImageSize { width: 32, height: 24 },
            ..Default::default()
        },
        ExportOptions::default(),
    );
    let root = format.parse("![a](a.png)\n").unwrap();
    assert_eq!(
        root.children[0].data.image_size,
        Some(ImageSize { width: 32, height: 24 })
    );
}

#[test]
fn test_list_after_skipped_empty_heading() {
    let root = import("intro\n\n#\n\n- x\n");
    assert_eq!(shape(&root.children), "intro x");
}
