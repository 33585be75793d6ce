// exam-export-service/src/layouts/simple.rs

use crate::content::ContentTransformer;
use crate::layouts::Layout;
use crate::models::Post;
use chrono::{DateTime, Datelike, Utc};
use serde_json::{json, Value};

pub(super) const TEMPLATE_NAME: &str = "simple";

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// ABNT-style document: one titled, dated post per page.
pub struct SimpleLayout;

impl SimpleLayout {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for SimpleLayout {
    fn template_name(&self) -> &'static str {
        TEMPLATE_NAME
    }

    fn context(&self, posts: &[Post], transformer: &ContentTransformer) -> Value {
        let posts: Vec<Value> = posts
            .iter()
            .map(|post| {
                json!({
                    "title": post.title,
                    "date": format_long_date(&post.created_at),
                    "body": transformer.transform(post.body()),
                })
            })
            .collect();

        json!({ "posts": posts })
    }
}

/// `07 de março de 2025`
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}
