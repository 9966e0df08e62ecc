//! Inline rich-text encoding.
//!
//! Converts the inline children of a block into the HTML fragment stored in
//! [`NodeData::text`], tracking whether any formatting was produced. Plain
//! runs stay escaped text; as soon as one construct needs markup the caller
//! wraps the whole fragment in the `<p><span>…</span></p>` envelope.

use crate::ast::MdNode;
use crate::common::block_ref::{parse_pure_block_ref, replace_block_refs};
use crate::common::escape::{escape_attr, escape_html};
use crate::common::math::MathRenderer;
use crate::options::ImportOptions;
use crate::tree::NodeData;
use once_cell::sync::Lazy;
use regex::Regex;

static KBD_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^</?kbd\s*>$").expect("valid kbd marker regex"));

static KBD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<kbd\s*>(.*?)</kbd\s*>").expect("valid kbd span regex"));

static UNDERLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^<u>(.*)</u>$").expect("valid underline regex"));

/// Result of encoding a run of inline nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedText {
    pub text: String,
    pub has_rich_text: bool,
}

impl EncodedText {
    fn push(&mut self, other: EncodedText) {
        self.text.push_str(&other.text);
        self.has_rich_text |= other.has_rich_text;
    }

    fn push_rich(&mut self, html: &str) {
        self.text.push_str(html);
        self.has_rich_text = true;
    }

    /// Build node data, applying the rich-text envelope when needed.
    pub fn into_node_data(self) -> NodeData {
        if self.has_rich_text {
            NodeData::rich(&self.text)
        } else {
            NodeData::plain(self.text)
        }
    }
}

/// A link target pulled out of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLink {
    pub url: String,
    pub title: String,
}

/// Encodes inline nodes with a fixed set of options and a math backend.
pub struct InlineEncoder<'a> {
    options: &'a ImportOptions,
    math: &'a dyn MathRenderer,
}

impl<'a> InlineEncoder<'a> {
    pub fn new(options: &'a ImportOptions, math: &'a dyn MathRenderer) -> Self {
        InlineEncoder { options, math }
    }

    pub fn options(&self) -> &ImportOptions {
        self.options
    }

    /// Encode the children of `node`.
    pub fn encode(&self, node: &MdNode) -> EncodedText {
        if node.is_list() {
            return EncodedText::default();
        }

        let mut out = EncodedText::default();
        for child in node.children() {
            match child {
                MdNode::Text { value } => out.push(self.encode_text(value)),
                MdNode::InlineCode { value } => out.text.push_str(&escape_html(value)),
                MdNode::Emphasis { .. } => out.push_rich(&self.wrap("em", child)),
                MdNode::Strong { .. } => out.push_rich(&self.wrap("strong", child)),
                MdNode::Delete { .. } => out.push_rich(&self.wrap("del", child)),
                MdNode::Link { url, .. } => {
                    let inner = self.encode(child);
                    out.push_rich(&format!(
                        r#"<a href="{}" target="_blank">{}</a>"#,
                        escape_attr(url),
                        inner.text
                    ));
                }
                MdNode::Html { value } => out.push(encode_html(value)),
                MdNode::List { .. } => {
                    // lists never add inline text; they become child nodes
                }
                MdNode::Image { .. } => {}
                _ => out.push(self.encode(child)),
            }
        }
        out
    }

    /// Encode a block straight into node data.
    pub fn node_data(&self, node: &MdNode) -> NodeData {
        self.encode(node).into_node_data()
    }

    fn wrap(&self, tag: &str, node: &MdNode) -> String {
        format!("<{tag}>{}</{tag}>", self.encode(node).text)
    }

    fn encode_text(&self, value: &str) -> EncodedText {
        // A run that is only a reference keeps its title and drops the link.
        if let Some(block_ref) = parse_pure_block_ref(value) {
            return EncodedText {
                text: escape_html(&block_ref.title),
                has_rich_text: false,
            };
        }

        let (text, has_rich_text) = replace_block_refs(value, self.options, self.math);
        EncodedText {
            text,
            has_rich_text,
        }
    }

    /// Extract a single link (or pure block reference) standing alone in a
    /// block.
    ///
    /// The tree builder does not use this for `hyperlink`; a pure reference
    /// imports as its plain title.
    pub fn extract_node_link(&self, node: &MdNode) -> Option<NodeLink> {
        let mut meaningful = node.children().iter().filter(|child| match child {
            MdNode::Text { value } => !value.trim().is_empty(),
            _ => true,
        });
        let only = meaningful.next()?;
        if meaningful.next().is_some() {
            return None;
        }

        match only {
            MdNode::Link { url, .. } => Some(NodeLink {
                url: url.clone(),
                title: plain_text(only),
            }),
            MdNode::Text { value } => {
                let block_ref = parse_pure_block_ref(value)?;
                Some(NodeLink {
                    url: self.options.block_url(&block_ref.id),
                    title: block_ref.title,
                })
            }
            _ => None,
        }
    }
}

fn encode_html(value: &str) -> EncodedText {
    let trimmed = value.trim();
    if trimmed.is_empty() || KBD_MARKER.is_match(trimmed) {
        // the key label is the neighbouring text node
        return EncodedText::default();
    }

    if let Some(caps) = UNDERLINE.captures(trimmed) {
        return EncodedText {
            text: format!("<u>{}</u>", escape_html(&caps[1])),
            has_rich_text: true,
        };
    }

    let text = KBD_SPAN
        .replace_all(value, |caps: &regex::Captures<'_>| escape_html(&caps[1]))
        .into_owned();
    let has_rich_text = text.contains('<');
    EncodedText {
        text,
        has_rich_text,
    }
}

/// Unformatted text below a node, without escaping.
pub fn plain_text(node: &MdNode) -> String {
    let mut out = String::new();
    collect_plain_text(node, &mut out);
    out
}

fn collect_plain_text(node: &MdNode, out: &mut String) {
    match node {
        MdNode::Text { value } | MdNode::InlineCode { value } => out.push_str(value),
        MdNode::Image { alt, .. } => out.push_str(alt),
        _ => {
            for child in node.children() {
                collect_plain_text(child, out);
            }
        }
    }
}

/// An image found in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundImage<'n> {
    pub url: &'n str,
    pub alt: &'n str,
}

/// First image below `node`, depth-first.
pub fn first_image(node: &MdNode) -> Option<FoundImage<'_>> {
    for child in node.children() {
        if let MdNode::Image { url, alt, .. } = child {
            return Some(FoundImage { url, alt });
        }
        if let Some(found) = first_image(child) {
            return Some(found);
        }
    }
    None
}

/// True when a paragraph holds an image and nothing but whitespace besides.
pub fn is_image_only(node: &MdNode) -> bool {
    let mut has_image = false;
    for child in node.children() {
        match child {
            MdNode::Image { .. } => has_image = true,
            MdNode::Text { value } if value.trim().is_empty() => {}
            _ => return false,
        }
    }
    has_image
}
