use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::RawPost;

pub const DIARY_MARKER: &str = "#Diary";

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ,!]+").expect("separator regex should compile"));

pub trait DiaryExtractor: Send + Sync {
    /// Returns the normalized diary body, or `None` when the post is not a diary entry.
    fn extract(&self, post: &RawPost) -> Option<String>;
}

/// Accepts top-level posts whose plain text starts with a literal marker.
///
/// Normalization order matters:
/// - markup is stripped,
/// - the marker is removed and the rest trimmed,
/// - runs of spaces, commas and exclamation marks collapse to one space,
/// - HTML entities left in the text are decoded last.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    marker: String,
}

impl MarkerExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for MarkerExtractor {
    fn default() -> Self {
        Self::new(DIARY_MARKER)
    }
}

impl DiaryExtractor for MarkerExtractor {
    fn extract(&self, post: &RawPost) -> Option<String> {
        if post.is_reply() {
            return None;
        }
        let content = post.content.trim();
        if content.is_empty() {
            return None;
        }

        let text = strip_markup(content);
        // No leading whitespace is tolerated before the marker.
        let body = text.strip_prefix(self.marker.as_str())?;
        let collapsed = SEPARATOR_RUN.replace_all(body.trim(), " ");
        let normalized = collapsed.trim();

        let decoded = html_escape::decode_html_entities(normalized);
        let decoded = decoded.trim();
        if decoded.is_empty() {
            None
        } else {
            Some(decoded.to_string())
        }
    }
}

/// Removes all tags and concatenates the text nodes of an HTML fragment.
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}
