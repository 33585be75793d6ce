// exam-export-service/src/content/mod.rs

//! Turns a stored rich-text body into self-contained HTML for the PDF engine.

mod markers;
mod math;
mod media;

pub use math::{MathFragment, MathStyle};
pub use media::MediaPaths;

use crate::renderers::MathRenderer;
use markers::{replace_markers, BLOCK, INLINE};
use math::render_fragment;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ContentTransformer {
    media: MediaPaths,
    renderer: Arc<dyn MathRenderer>,
}

impl ContentTransformer {
    pub fn new(media: MediaPaths, renderer: Arc<dyn MathRenderer>) -> Self {
        Self { media, renderer }
    }

    /// Media rewrite, then block math, then inline math. Markers are rendered
    /// one after another in document order.
    pub fn transform(&self, body: &str) -> String {
        if body.is_empty() {
            return String::new();
        }

        let html = self.media.rewrite(body);
        let html = replace_markers(&html, &BLOCK, |inner| {
            self.render_marker(inner, MathStyle::Block)
        });
        let html = replace_markers(&html, &INLINE, |inner| {
            self.render_marker(inner, MathStyle::Inline)
        });

        debug!(input_bytes = body.len(), output_bytes = html.len(), "Transformed content");

        html
    }

    fn render_marker(&self, inner: &str, style: MathStyle) -> String {
        let fragment = render_fragment(self.renderer.as_ref(), inner, style);
        if let MathFragment::Failed {
            expression,
            diagnostic,
        } = &fragment
        {
            warn!(error = %diagnostic, expression = %expression, "Failed to render math expression");
        }
        fragment.to_html()
    }
}
