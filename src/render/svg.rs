use std::borrow::Cow;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Resolved parameters of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// Root width in user units.
    pub width: f64,
    /// Root height in user units.
    pub height: f64,
    /// Text drawn into the image, unescaped.
    pub message: String,
}

/// SVG layouts the render service can produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SvgTemplate {
    /// Dark background with a large cyan caption.
    #[default]
    Banner,
    /// Light pipeline frame: caption plus a pulsing accent circle.
    Frame,
}

impl SvgTemplate {
    /// Name used in configuration files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SvgTemplate::Banner => "banner",
            SvgTemplate::Frame => "frame",
        }
    }

    /// Produce the SVG document for `params`.
    pub fn render(self, params: &RenderParams) -> String {
        match self {
            SvgTemplate::Banner => render_banner(params),
            SvgTemplate::Frame => render_frame(params),
        }
    }
}

/// Escape `s` for use in XML text and attribute values.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn open_root(out: &mut String, p: &RenderParams, background: &str) {
    let (w, h) = (p.width, p.height);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="{background}"/>"#
    );
}

fn render_banner(p: &RenderParams) -> String {
    let mut out = String::with_capacity(256 + p.message.len());
    open_root(&mut out, p, "#111");
    let _ = writeln!(
        out,
        r##"  <text x="50" y="100" fill="#0ff" font-size="48">{}</text>"##,
        escape_xml(&p.message)
    );
    out.push_str("</svg>\n");
    out
}

fn render_frame(p: &RenderParams) -> String {
    let cx = p.width / 2.0;
    let cy = (p.height - 60.0).max(0.0);
    let mut out = String::with_capacity(384 + p.message.len());
    open_root(&mut out, p, "#f0f2f5");
    let _ = writeln!(
        out,
        r##"  <text x="20" y="80" fill="#333">{}</text>"##,
        escape_xml(&p.message)
    );
    let _ = writeln!(out, r##"  <circle cx="{cx}" cy="{cy}" r="20" fill="#333">"##);
    out.push_str(
        r#"    <animate attributeName="r" values="20;30;20" dur="1.5s" repeatCount="indefinite"/>"#,
    );
    out.push_str("\n  </circle>\n</svg>\n");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
