// exam-export-service/src/layouts/exam.rs

use crate::config::ExamConfig;
use crate::content::ContentTransformer;
use crate::layouts::Layout;
use crate::models::Post;
use serde_json::{json, Value};

pub(super) const TEMPLATE_NAME: &str = "exam";

pub const NO_AREA_LABEL: &str = "Sem Área";

/// Two-column exam paper grouped by knowledge area.
pub struct ExamLayout {
    config: ExamConfig,
}

impl ExamLayout {
    pub fn new(config: ExamConfig) -> Self {
        Self { config }
    }
}

/// Sorted by area name, then id. Posts without an area sort under
/// [`NO_AREA_LABEL`] as if it were an area name, not first or last.
pub fn exam_order(posts: &[Post]) -> Vec<&Post> {
    let mut ordered: Vec<&Post> = posts.iter().collect();
    ordered.sort_by(|a, b| {
        let a_area = a.area_name().unwrap_or(NO_AREA_LABEL);
        let b_area = b.area_name().unwrap_or(NO_AREA_LABEL);
        a_area.cmp(b_area).then(a.id.cmp(&b.id))
    });
    ordered
}

impl Layout for ExamLayout {
    fn template_name(&self) -> &'static str {
        TEMPLATE_NAME
    }

    fn context(&self, posts: &[Post], transformer: &ContentTransformer) -> Value {
        let mut questions = Vec::with_capacity(posts.len());
        let mut current_area: Option<Option<u64>> = None;

        for (index, post) in exam_order(posts).into_iter().enumerate() {
            let area_id = post.area.as_ref().map(|area| area.id);
            let banner = if current_area != Some(area_id) {
                current_area = Some(area_id);
                Some(post.area_name().unwrap_or(NO_AREA_LABEL))
            } else {
                None
            };

            questions.push(json!({
                "banner": banner,
                "number": format!("{:02}", index + 1),
                "body": transformer.transform(post.body()),
            }));
        }

        json!({
            "header_title": self.config.header_title,
            "edition_label": self.config.edition_label,
            "footer_label": self.config.footer_label,
            "questions": questions,
        })
    }
}
