//! Reducing rich node text back to Markdown-flavoured plain text.
//!
//! Export runs three steps over an enveloped `text`:
//!
//! 1. formula spans collapse to `$expr$`, using the literal kept in
//!    `data-value` (the rendered markup inside is discarded);
//! 2. anchors become `[label](href)`;
//! 3. what is left is parsed as an HTML document and reduced to its text:
//!    every `<p>` ends with a newline, other tags vanish, entities decode.
//!
//! Steps 1 and 2 emit HTML-escaped text, so step 3 decodes them exactly once.
//!
//! The bullet-list export keeps inline styles instead: [`html_to_inline_markdown`]
//! walks the same DOM and writes `**`, `*`, `~~`, `<u>`, links and `$formula$`
//! back out.

use crate::common::escape::{escape_html, unescape_attr};
use crate::common::math::FORMULA_CLASS;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s+href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid anchor regex")
});

static FORMULA_OPEN: Lazy<String> =
    Lazy::new(|| format!(r#"<span class="{FORMULA_CLASS}" data-value=""#));

const SPAN_OPEN: &str = "<span";
const SPAN_CLOSE: &str = "</span>";

/// Full export reduction of an enveloped rich text.
pub fn rich_text_to_markdown(html: &str) -> String {
    let html = reverse_formulas(html);
    let html = reverse_links(&html);
    html_to_text(&html)
}

/// Replace every formula span with `$expr$`.
///
/// The rendered markup nests further spans, so the end of a formula is found
/// by balancing `<span` against `</span>` rather than by pattern matching.
/// A formula without a matching close is left as is.
pub fn reverse_formulas(html: &str) -> String {
    let open = FORMULA_OPEN.as_str();
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let span = &rest[start..];

        let value_start = open.len();
        let parsed = span[value_start..].find('"').and_then(|quote| {
            let end = matching_span_end(span)?;
            Some((&span[value_start..value_start + quote], end))
        });

        match parsed {
            Some((value, end)) => {
                out.push('$');
                out.push_str(&escape_html(&unescape_attr(value)));
                out.push('$');
                rest = &span[end..];
            }
            None => {
                out.push_str(span);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Byte offset just past the `</span>` closing the span `html` starts with.
fn matching_span_end(html: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = 0;

    loop {
        let rest = &html[pos..];
        let close = rest.find(SPAN_CLOSE)?;
        match rest.find(SPAN_OPEN) {
            Some(open) if open < close => {
                depth += 1;
                pos += open + SPAN_OPEN.len();
            }
            _ => {
                depth = depth.checked_sub(1)?;
                pos += close + SPAN_CLOSE.len();
                if depth == 0 {
                    return Some(pos);
                }
            }
        }
    }
}

/// Rewrite `<a href="U">T</a>` as `[T](U)`. Both parts stay escaped.
pub fn reverse_links(html: &str) -> String {
    ANCHOR.replace_all(html, "[$2]($1)").into_owned()
}

/// Text content of an HTML fragment, one line per `<p>`.
pub fn html_to_text(html: &str) -> String {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(html.as_bytes());

    let mut text = String::new();
    if let Some(body) = find_element(&dom.document, "body") {
        for child in body.children.borrow().iter() {
            match child.data {
                NodeData::Element { ref name, .. } => {
                    collect_text(child, &mut text);
                    if name.local.as_ref() == "p" {
                        text.push('\n');
                    }
                }
                NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
                _ => {}
            }
        }
    }

    if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Inline Markdown for a node text, rebuilding the styles the encoder
/// produces. Plain (escaped) text goes through the same walk and comes out
/// decoded.
pub fn html_to_inline_markdown(html: &str) -> String {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(html.as_bytes());

    let mut out = String::new();
    if let Some(body) = find_element(&dom.document, "body") {
        write_inline_children(&body, &mut out);
    }
    out
}

fn write_inline_children(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        write_inline(child, out);
    }
}

fn write_inline(handle: &Handle, out: &mut String) {
    let (name, attrs) = match handle.data {
        NodeData::Text { ref contents } => {
            out.push_str(&contents.borrow());
            return;
        }
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => (name, attrs),
        _ => return,
    };

    let attr = |key: &str| {
        attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == key)
            .map(|a| a.value.to_string())
    };

    let tag = name.local.as_ref();
    let is_formula = tag == "span"
        && attr("class").is_some_and(|class| class.split_whitespace().any(|c| c == FORMULA_CLASS));
    if is_formula {
        // the parser has already decoded the attribute value
        out.push('$');
        out.push_str(&attr("data-value").unwrap_or_default());
        out.push('$');
        return;
    }

    let mut inner = String::new();
    match tag {
        "a" => {
            write_inline_children(handle, &mut inner);
            out.push_str(&format!("[{inner}]({})", attr("href").unwrap_or_default()));
        }
        tag @ ("strong" | "b" | "em" | "i" | "s" | "del" | "u") => {
            write_inline_children(handle, &mut inner);
            let (open, close) = match tag {
                "strong" | "b" => ("**", "**"),
                "em" | "i" => ("*", "*"),
                "s" | "del" => ("~~", "~~"),
                _ => ("<u>", "</u>"),
            };
            out.push_str(open);
            out.push_str(&inner);
            out.push_str(close);
        }
        _ => write_inline_children(handle, out),
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn collect_text(handle: &Handle, out: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::math::{formula_span, LiteralMathRenderer, MathRenderer};

    #[test]
    fn test_envelope_reduces_to_text() {
        assert_eq!(
            html_to_text("<p><span><strong>Bold</strong> &amp; more</span></p>"),
            "Bold & more"
        );
    }

    #[test]
    fn test_each_paragraph_is_a_line() {
        assert_eq!(html_to_text("<p>one</p><p>two</p>"), "one\ntwo");
    }

    #[test]
    fn test_bare_text_is_kept() {
        assert_eq!(html_to_text("just <em>text</em>"), "just text");
    }

    #[test]
    fn test_formula_reversal() {
        let rendered = LiteralMathRenderer.render("a<b", false).unwrap();
        let html = format!("<p><span>x {} y</span></p>", formula_span("a<b", &rendered));
        assert_eq!(reverse_formulas(&html), "<p><span>x $a&lt;b$ y</span></p>");
        assert_eq!(rich_text_to_markdown(&html), "x $a<b$ y");
    }

    #[test]
    fn test_nested_spans_inside_formula() {
        let html = r#"<span class="ql-formula" data-value="x"><span><span>x</span></span></span> tail"#;
        assert_eq!(reverse_formulas(html), "$x$ tail");
    }

    #[test]
    fn test_unterminated_formula_is_untouched() {
        let html = r#"<span class="ql-formula" data-value="x"><span>x"#;
        assert_eq!(reverse_formulas(html), html);
    }

    #[test]
    fn test_link_reversal() {
        let html = r#"<p><span>see <a href="https://x.org/?a=1&amp;b=2" target="_blank"><strong>docs</strong></a></span></p>"#;
        assert_eq!(rich_text_to_markdown(html), "see [docs](https://x.org/?a=1&b=2)");
    }

    #[test]
    fn test_inline_markdown_rebuilds_styles() {
        let html = "<p><span><strong>B</strong> <em>i</em> <del>s</del> <u>u</u></span></p>";
        assert_eq!(html_to_inline_markdown(html), "**B** *i* ~~s~~ <u>u</u>");
    }

    #[test]
    fn test_inline_markdown_link_and_formula() {
        let rendered = LiteralMathRenderer.render("a<b", false).unwrap();
        let html = format!(
            r#"<p><span><a href="https://x.org/?a=1&amp;b=2" target="_blank">docs</a> {}</span></p>"#,
            formula_span("a<b", &rendered)
        );
        assert_eq!(html_to_inline_markdown(&html), "[docs](https://x.org/?a=1&b=2) $a<b$");
    }

    #[test]
    fn test_inline_markdown_decodes_plain_text() {
        assert_eq!(html_to_inline_markdown("a &lt; b &amp; c"), "a < b & c");
    }
}
