//! Inline and display math inside text runs.
//!
//! A segment containing `$` is first scanned for display math (`$$…$$`). If
//! that finds anything, only the display pass runs over the segment; the
//! inline `$…$` pass is used only when no display math is present. Each match
//! is rendered by a [`MathRenderer`] and wrapped in a formula span whose
//! `data-value` keeps the literal expression, which is what the Markdown
//! serializer reads back.

use crate::common::escape::{escape_attr, escape_html};
use crate::error::MathError;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Class of the span wrapping a rendered expression.
pub const FORMULA_CLASS: &str = "ql-formula";

static DISPLAY_MATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("valid display math regex"));

// No whitespace just inside the delimiters, so prices like "$5 and $6" stay text.
static INLINE_MATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([^\s$](?:[^$\n]*?[^\s$])?)\$").expect("valid inline math regex")
});

/// Renders a TeX expression to inline HTML.
pub trait MathRenderer: Send + Sync {
    fn render(&self, expr: &str, display: bool) -> Result<String, MathError>;
}

/// Renders the expression as its escaped source text.
///
/// Used when no typesetting backend is compiled in; the formula span still
/// carries the literal, so export is unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralMathRenderer;

impl MathRenderer for LiteralMathRenderer {
    fn render(&self, expr: &str, _display: bool) -> Result<String, MathError> {
        Ok(format!(
            r#"<span contenteditable="false">{}</span>"#,
            escape_html(expr)
        ))
    }
}

/// MathML output through `latex2mathml`.
#[cfg(feature = "mathml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MathMlRenderer;

#[cfg(feature = "mathml")]
impl MathRenderer for MathMlRenderer {
    fn render(&self, expr: &str, display: bool) -> Result<String, MathError> {
        let style = if display {
            latex2mathml::DisplayStyle::Block
        } else {
            latex2mathml::DisplayStyle::Inline
        };
        latex2mathml::latex_to_mathml(expr, style).map_err(|e| MathError(e.to_string()))
    }
}

/// The renderer used when the caller does not pick one.
pub fn default_math_renderer() -> Box<dyn MathRenderer> {
    #[cfg(feature = "mathml")]
    {
        Box::new(MathMlRenderer)
    }
    #[cfg(not(feature = "mathml"))]
    {
        Box::new(LiteralMathRenderer)
    }
}

/// Escape a text segment, replacing math expressions with formula spans.
///
/// Returns the HTML and whether at least one expression was rendered.
pub fn replace_math(segment: &str, renderer: &dyn MathRenderer) -> (String, bool) {
    if !segment.contains('$') {
        return (escape_html(segment), false);
    }

    if DISPLAY_MATH.is_match(segment) {
        render_matches(segment, &DISPLAY_MATH, true, renderer)
    } else if INLINE_MATH.is_match(segment) {
        render_matches(segment, &INLINE_MATH, false, renderer)
    } else {
        (escape_html(segment), false)
    }
}

fn render_matches(
    segment: &str,
    pattern: &Regex,
    display: bool,
    renderer: &dyn MathRenderer,
) -> (String, bool) {
    let mut html = String::with_capacity(segment.len());
    let mut replaced = false;
    let mut last = 0;

    for caps in pattern.captures_iter(segment) {
        let whole = caps.get(0).expect("group 0 always matches");
        html.push_str(&escape_html(&segment[last..whole.start()]));

        let expr = caps[1].trim();
        match renderer.render(expr, display) {
            Ok(rendered) => {
                html.push_str(&formula_span(expr, &rendered));
                replaced = true;
            }
            Err(err) => {
                debug!(expr, %err, "math rendering failed, keeping the literal");
                html.push_str(&escape_html(whole.as_str()));
            }
        }
        last = whole.end();
    }

    html.push_str(&escape_html(&segment[last..]));
    (html, replaced)
}

/// Wrap rendered math so the literal survives the round trip.
pub fn formula_span(expr: &str, rendered: &str) -> String {
    format!(
        r#"<span class="{FORMULA_CLASS}" data-value="{}">{rendered}</span>"#,
        escape_attr(expr)
    )
}
