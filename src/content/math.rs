// exam-export-service/src/content/math.rs

use crate::renderers::{MathRenderer, RenderParams};
use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

pub const ERROR_SPAN: &str = r#"<span style="color:red; font-weight:bold;">[Math Error]</span>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathStyle {
    /// `\[ ... \]`, centered and scaled by the page CSS.
    Block,
    /// `## ... ##`, fitted to the text line height.
    Inline,
}

impl MathStyle {
    pub fn params(&self) -> RenderParams {
        match self {
            MathStyle::Block => RenderParams {
                font_size_pt: 13,
                dpi: 110,
            },
            MathStyle::Inline => RenderParams {
                font_size_pt: 16,
                dpi: 150,
            },
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MathStyle::Block => "latex-block",
            MathStyle::Inline => "latex-inline",
        }
    }
}

/// Outcome of rendering one marker. Both variants produce markup, so a bad
/// expression never stops the surrounding document.
#[derive(Debug, Clone, PartialEq)]
pub enum MathFragment {
    Image { style: MathStyle, png_base64: String },
    Failed { expression: String, diagnostic: String },
}

impl MathFragment {
    pub fn to_html(&self) -> String {
        match self {
            MathFragment::Image { style, png_base64 } => format!(
                r#"<img src="data:image/png;base64,{}" class="{}" />"#,
                png_base64,
                style.css_class()
            ),
            MathFragment::Failed { .. } => ERROR_SPAN.to_string(),
        }
    }
}

/// Undoes the editor's entity encoding and non-breaking spaces.
pub fn clean_expression(raw: &str) -> String {
    html_escape::decode_html_entities(raw).replace('\u{a0}', " ")
}

pub fn render_fragment(renderer: &dyn MathRenderer, raw: &str, style: MathStyle) -> MathFragment {
    let expression = clean_expression(raw);

    match renderer.render_png(&expression, &style.params()) {
        Ok(png) => {
            debug!(style = ?style, size_bytes = png.len(), "Rendered math expression");
            MathFragment::Image {
                style,
                png_base64: general_purpose::STANDARD.encode(png),
            }
        }
        Err(e) => MathFragment::Failed {
            expression: raw.to_string(),
            diagnostic: e.to_string(),
        },
    }
}
