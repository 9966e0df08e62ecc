//! Comrak AST → [`MdNode`] adapter.
//!
//! Pipeline: Markdown string → Comrak arena AST → owned `MdNode` tree.
//!
//! Comrak is the only parser in the crate. Its arena nodes borrow from the
//! arena, so the adapter copies what the tree builder needs into an owned
//! tree; the builder then never touches comrak types.

use super::nodes::{MdDocument, MdNode};
use crate::error::FormatError;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse Markdown into the adapted AST.
pub fn parse_markdown(source: &str) -> Result<MdDocument, FormatError> {
    if source.contains('\0') {
        // comrak swaps NUL for U+FFFD; refuse it as a broken input
        return Err(FormatError::ParseError(
            "input contains a NUL byte".to_string(),
        ));
    }

    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    Ok(MdDocument {
        children: convert_children(root),
    })
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    // `$` must reach the math recognizer as plain text
    options.extension.math_dollars = false;
    options
}

fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<MdNode> {
    let mut out: Vec<MdNode> = Vec::new();
    for child in node.children() {
        let converted = convert_node(child);
        // Comrak may split a run of text at delimiter characters; the
        // recognizers need whole runs.
        if let MdNode::Text { value } = &converted {
            if let Some(MdNode::Text { value: previous }) = out.last_mut() {
                previous.push_str(value);
                continue;
            }
        }
        out.push(converted);
    }
    out
}

fn convert_node<'a>(node: &'a AstNode<'a>) -> MdNode {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Heading(heading) => MdNode::Heading {
            depth: heading.level,
            children: convert_children(node),
        },

        NodeValue::Paragraph => MdNode::Paragraph {
            children: convert_children(node),
        },

        NodeValue::List(list) => MdNode::List {
            ordered: matches!(list.list_type, comrak::nodes::ListType::Ordered),
            children: convert_children(node),
        },

        NodeValue::Item(_) | NodeValue::TaskItem(_) => MdNode::ListItem {
            children: convert_children(node),
        },

        NodeValue::Text(text) => MdNode::text(text.clone()),

        NodeValue::SoftBreak | NodeValue::LineBreak => MdNode::text("\n"),

        NodeValue::Emph => MdNode::Emphasis {
            children: convert_children(node),
        },

        NodeValue::Strong => MdNode::Strong {
            children: convert_children(node),
        },

        NodeValue::Strikethrough => MdNode::Delete {
            children: convert_children(node),
        },

        NodeValue::Link(link) => MdNode::Link {
            url: link.url.clone(),
            title: link.title.clone(),
            children: convert_children(node),
        },

        NodeValue::Image(link) => {
            let mut alt = String::new();
            for child in node.children() {
                collect_text_content(child, &mut alt);
            }
            MdNode::Image {
                url: link.url.clone(),
                alt,
                title: link.title.clone(),
            }
        }

        NodeValue::Code(code) => MdNode::InlineCode {
            value: code.literal.clone(),
        },

        NodeValue::HtmlInline(html) => MdNode::Html {
            value: html.clone(),
        },

        NodeValue::HtmlBlock(html) => MdNode::Html {
            value: html.literal.clone(),
        },

        NodeValue::CodeBlock(code_block) => MdNode::Other {
            kind: "code".to_string(),
            children: vec![MdNode::text(code_block.literal.clone())],
        },

        other => MdNode::Other {
            kind: other_kind(other).to_string(),
            children: convert_children(node),
        },
    }
}

fn other_kind(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::Document => "root",
        NodeValue::BlockQuote => "blockquote",
        NodeValue::ThematicBreak => "thematicBreak",
        NodeValue::Table(_) => "table",
        NodeValue::TableRow(_) => "tableRow",
        NodeValue::TableCell => "tableCell",
        NodeValue::FootnoteDefinition(_) => "footnoteDefinition",
        NodeValue::FootnoteReference(_) => "footnoteReference",
        NodeValue::FrontMatter(_) => "yaml",
        _ => "unknown",
    }
}

/// Collect the plain text below a node (used for image alt text)
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
