use std::fmt::Write;

use super::Span;

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Render `source` with each span wrapped in a classed `<span>`.
///
/// `spans` must be sorted and non-overlapping.
pub fn render(source: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(source.len() + spans.len() * 32);
    let mut cursor = 0;
    for span in spans {
        escape_into(&mut out, &source[cursor..span.range.start]);
        let _ = write!(out, "<span class=\"{}\">", span.class.css_class());
        escape_into(&mut out, &source[span.range.clone()]);
        out.push_str("</span>");
        cursor = span.range.end;
    }
    escape_into(&mut out, &source[cursor..]);
    out
}
