use serde::Serialize;

use super::detail::ContentDetail;

/// Opaque server-issued identifier for one content bundle.
pub type ContentId = String;

/// One successfully resolved item of a day's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub id: ContentId,
    pub title: String,
    pub body: String,
    pub progressive_sources: Vec<String>,
    pub conservative_sources: Vec<String>,
}

impl FeedEntry {
    /// Shape a fetched detail into a feed entry.
    ///
    /// The body is the full-article summary, or the core issue when that
    /// summary is empty. Source lists are copied verbatim from the media summary.
    pub fn from_detail(id: impl Into<ContentId>, detail: &ContentDetail) -> Self {
        let body = if detail.full_article_summary.is_empty() {
            detail.core_issue.clone()
        } else {
            detail.full_article_summary.clone()
        };

        Self {
            id: id.into(),
            title: detail.content_title.clone(),
            body,
            progressive_sources: detail.media_summary.progressive.clone(),
            conservative_sources: detail.media_summary.conservative.clone(),
        }
    }
}
