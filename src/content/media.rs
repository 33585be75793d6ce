// exam-export-service/src/content/media.rs

use crate::config::MediaConfig;

/// Maps public media URLs onto the local media root so the PDF engine can
/// read images from disk.
#[derive(Debug, Clone)]
pub struct MediaPaths {
    url_prefix: String,
    file_base: String,
}

impl MediaPaths {
    pub fn new(url_prefix: impl Into<String>, media_root: &str) -> Self {
        let root = media_root.replace('\\', "/");
        let mut file_base = format!("file://{}/", root);
        if file_base.ends_with("//") {
            file_base.pop();
        }

        Self {
            url_prefix: url_prefix.into(),
            file_base,
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(config.url.clone(), &config.root)
    }

    /// Rewrites `src="<prefix>...` and `src='<prefix>...` attributes.
    pub fn rewrite(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        if self.url_prefix.is_empty() || !html.contains(&self.url_prefix) {
            return html.to_string();
        }

        html.replace(
            &format!("src=\"{}", self.url_prefix),
            &format!("src=\"{}", self.file_base),
        )
        .replace(
            &format!("src='{}", self.url_prefix),
            &format!("src='{}", self.file_base),
        )
    }
}
