// exam-export-service/src/layouts/mod.rs

mod exam;
mod simple;

use crate::config::ExamConfig;
use crate::content::ContentTransformer;
use crate::error::Result;
use crate::models::{LayoutKind, Post};
use handlebars::Handlebars;
use serde_json::Value;
use tracing::info;

pub use exam::ExamLayout;
pub use simple::SimpleLayout;

const SIMPLE_TEMPLATE: &str = include_str!("../../templates/simple.html.hbs");
const EXAM_TEMPLATE: &str = include_str!("../../templates/exam.html.hbs");

/// A page layout: which template to use and how posts feed its context.
pub trait Layout: Send + Sync {
    fn template_name(&self) -> &'static str;

    fn context(&self, posts: &[Post], transformer: &ContentTransformer) -> Value;
}

pub fn create_layout(kind: LayoutKind, exam: &ExamConfig) -> Box<dyn Layout> {
    match kind {
        LayoutKind::Simple => Box::new(SimpleLayout::new()),
        LayoutKind::Exam => Box::new(ExamLayout::new(exam.clone())),
    }
}

/// Builds complete standalone HTML documents from posts.
pub struct DocumentAssembler {
    handlebars: Handlebars<'static>,
    transformer: ContentTransformer,
    exam: ExamConfig,
}

impl DocumentAssembler {
    pub fn new(transformer: ContentTransformer, exam: ExamConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_template_string(simple::TEMPLATE_NAME, SIMPLE_TEMPLATE)?;
        handlebars.register_template_string(exam::TEMPLATE_NAME, EXAM_TEMPLATE)?;

        Ok(Self {
            handlebars,
            transformer,
            exam,
        })
    }

    pub fn assemble(&self, posts: &[Post], kind: LayoutKind) -> Result<String> {
        let layout = create_layout(kind, &self.exam);
        let context = layout.context(posts, &self.transformer);
        let rendered = self.handlebars.render(layout.template_name(), &context)?;

        info!(
            layout = ?kind,
            posts = posts.len(),
            size_bytes = rendered.len(),
            "Document assembled"
        );

        Ok(rendered)
    }
}
