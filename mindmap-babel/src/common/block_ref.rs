//! Block-reference recognition.
//!
//! Notes exported from the outliner cite other blocks as `((id 'title'))` or
//! `((id "title"))`. A text run that is nothing but a reference collapses to
//! its title; references embedded in longer text become anchors pointing at
//! `<scheme>://blocks/<id>`. The text between references goes through the
//! math pass.

use crate::common::escape::{escape_attr, escape_html};
use crate::common::math::{replace_math, MathRenderer};
use crate::options::ImportOptions;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PURE_BLOCK_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\(\(([a-zA-Z0-9-]+)\s+(?:'(.*?)'|"(.*?)")\)\)$"#)
        .expect("valid block reference regex")
});

static BLOCK_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\(\(([a-zA-Z0-9-]+)\s+(?:'(.*?)'|"(.*?)")\)\)"#)
        .expect("valid block reference regex")
});

/// A `((id 'title'))` citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRef {
    pub id: String,
    pub title: String,
}

impl BlockRef {
    fn from_captures(caps: &Captures<'_>) -> Option<BlockRef> {
        let title = caps.get(2).or_else(|| caps.get(3))?.as_str();
        if title.contains("))") {
            return None;
        }
        Some(BlockRef {
            id: caps[1].to_string(),
            title: title.to_string(),
        })
    }
}

/// Match a text that consists of exactly one reference (surrounding
/// whitespace ignored).
pub fn parse_pure_block_ref(text: &str) -> Option<BlockRef> {
    let caps = PURE_BLOCK_REF.captures(text.trim())?;
    BlockRef::from_captures(&caps)
}

/// Rewrite embedded references into anchors and run the math pass over the
/// remaining segments.
///
/// Returns the HTML and whether any markup was produced.
pub fn replace_block_refs(
    text: &str,
    options: &ImportOptions,
    math: &dyn MathRenderer,
) -> (String, bool) {
    let mut html = String::with_capacity(text.len());
    let mut replaced = false;
    let mut last = 0;

    for caps in BLOCK_REF.captures_iter(text) {
        let Some(block_ref) = BlockRef::from_captures(&caps) else {
            continue;
        };
        let whole = caps.get(0).expect("group 0 always matches");

        let (segment, segment_replaced) = replace_math(&text[last..whole.start()], math);
        html.push_str(&segment);
        replaced |= segment_replaced;

        html.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_attr(&options.block_url(&block_ref.id)),
            escape_html(&block_ref.title)
        ));
        replaced = true;
        last = whole.end();
    }

    let (tail, tail_replaced) = replace_math(&text[last..], math);
    html.push_str(&tail);
    (html, replaced || tail_replaced)
}
