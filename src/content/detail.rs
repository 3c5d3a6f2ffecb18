use serde::{Deserialize, Serialize};

// ============================================================================
// Detail Document
// ============================================================================

/// Full decoded document for one content item.
///
/// Decoded from `GET /api/contents/{id}`. Keys are snake_case on the wire.
/// Every field is required; a document missing any of them fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetail {
    #[serde(rename = "_id")]
    pub content_id: ContentStamp,
    pub topic: String,
    /// Plain `YYYY-MM-DD` publication day.
    pub date: String,
    pub background_summary: String,
    pub conservative_media_stance: String,
    pub content_title: String,
    pub core_issue: String,
    pub full_article_summary: String,
    pub glossary: Vec<GlossaryItem>,
    pub media_summary: MediaSummary,
    pub progressive_media_stance: String,
    pub reporting_volume_compare: VolumeCompare,
    pub source_articles: Vec<SourceArticle>,
}

/// Object-id stamp the server embeds under `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStamp {
    pub timestamp: i64,
    /// ISO-8601 instant, e.g. `2025-08-17T01:33:02.000+00:00`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub term: String,
    pub definition: String,
}

/// Outlets whose coverage was classified as progressive or conservative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSummary {
    pub progressive: Vec<String>,
    pub conservative: Vec<String>,
}

/// Fractional split of coverage volume (fractions, not percentages).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeCompare {
    pub progressive: f64,
    pub conservative: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceArticle {
    pub title: String,
    pub url: String,
    pub media: String,
    pub political_leaning: String,
}

// ============================================================================
// Leaning Classification
// ============================================================================

/// Political leaning of a single outlet's coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leaning {
    Progressive,
    Conservative,
    Unknown,
}

impl Leaning {
    /// Parse a server leaning tag. Only exact lowercase tags are recognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "progressive" => Some(Leaning::Progressive),
            "conservative" => Some(Leaning::Conservative),
            "unknown" => Some(Leaning::Unknown),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Leaning::Progressive => "progressive",
            Leaning::Conservative => "conservative",
            Leaning::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Leaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source article with its leaning resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSource {
    pub title: String,
    pub press: String,
    pub url: String,
    pub leaning: Leaning,
}

impl ContentDetail {
    /// Resolve the leaning of every source article, preserving order.
    ///
    /// The article's own `political_leaning` tag wins when it is recognized.
    /// Otherwise the outlet is looked up in the media summary, progressive
    /// list first, and falls back to [`Leaning::Unknown`].
    pub fn classified_sources(&self) -> Vec<ClassifiedSource> {
        self.source_articles
            .iter()
            .map(|sa| {
                let leaning = Leaning::from_tag(&sa.political_leaning)
                    .unwrap_or_else(|| self.media_summary.leaning_of(&sa.media));
                ClassifiedSource {
                    title: sa.title.clone(),
                    press: sa.media.clone(),
                    url: sa.url.clone(),
                    leaning,
                }
            })
            .collect()
    }

    /// Look up a glossary definition by exact term.
    pub fn glossary_term(&self, term: &str) -> Option<&GlossaryItem> {
        self.glossary.iter().find(|g| g.term == term)
    }
}

impl MediaSummary {
    /// Leaning of an outlet according to this summary.
    pub fn leaning_of(&self, media: &str) -> Leaning {
        if self.progressive.iter().any(|m| m == media) {
            Leaning::Progressive
        } else if self.conservative.iter().any(|m| m == media) {
            Leaning::Conservative
        } else {
            Leaning::Unknown
        }
    }
}

impl VolumeCompare {
    /// Rounded integer percentages as `(progressive, conservative)`.
    pub fn percentages(&self) -> (i64, i64) {
        (
            (self.progressive * 100.0).round() as i64,
            (self.conservative * 100.0).round() as i64,
        )
    }

    /// Label shown next to the coverage bar, e.g. `진보 62% · 보수 38%`.
    pub fn volume_label(&self) -> String {
        let (p, c) = self.percentages();
        format!("진보 {}% · 보수 {}%", p, c)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) const DETAIL_JSON: &str = r#"{
        "_id": {"timestamp": 1755394382, "date": "2025-08-17T01:33:02.000+00:00"},
        "topic": "politics",
        "date": "2025-08-17",
        "background_summary": "Background text",
        "conservative_media_stance": "Conservative stance",
        "content_title": "Ministries brief the new administration",
        "core_issue": "Core issue text",
        "full_article_summary": "Full summary text",
        "glossary": [{"term": "업무보고", "definition": "A formal policy briefing"}],
        "media_summary": {"progressive": ["Hankyoreh", "Kyunghyang"], "conservative": ["Chosun"]},
        "progressive_media_stance": "Progressive stance",
        "reporting_volume_compare": {"progressive": 0.625, "conservative": 0.375},
        "source_articles": [
            {"title": "A", "url": "https://a.example/1", "media": "Hankyoreh", "political_leaning": "progressive"},
            {"title": "B", "url": "https://b.example/2", "media": "Chosun", "political_leaning": ""},
            {"title": "C", "url": "https://c.example/3", "media": "Yonhap", "political_leaning": "centrist"},
            {"title": "D", "url": "https://d.example/4", "media": "Kyunghyang", "political_leaning": "conservative"}
        ]
    }"#;

    pub(crate) fn sample_detail() -> ContentDetail {
        serde_json::from_str(DETAIL_JSON).unwrap()
    }

    #[test]
    fn test_decode_snake_case_document() {
        let detail = sample_detail();
        assert_eq!(detail.content_id.timestamp, 1755394382);
        assert_eq!(detail.content_title, "Ministries brief the new administration");
        assert_eq!(detail.media_summary.progressive, vec!["Hankyoreh", "Kyunghyang"]);
        assert_eq!(detail.reporting_volume_compare.progressive, 0.625);
        assert_eq!(detail.source_articles.len(), 4);
    }

    #[test]
    fn test_missing_field_fails() {
        let mut value: serde_json::Value = serde_json::from_str(DETAIL_JSON).unwrap();
        value.as_object_mut().unwrap().remove("core_issue");
        assert!(serde_json::from_value::<ContentDetail>(value).is_err());
    }

    #[test]
    fn test_classified_sources_tag_then_summary_fallback() {
        let leanings: Vec<Leaning> = sample_detail()
            .classified_sources()
            .into_iter()
            .map(|s| s.leaning)
            .collect();
        assert_eq!(
            leanings,
            vec![
                Leaning::Progressive,  // explicit tag
                Leaning::Conservative, // empty tag, outlet in conservative list
                Leaning::Unknown,      // unrecognized tag, outlet in neither list
                Leaning::Conservative, // explicit tag beats summary membership
            ]
        );
    }

    #[test]
    fn test_volume_label_rounds() {
        let volume = VolumeCompare {
            progressive: 0.625,
            conservative: 0.375,
        };
        assert_eq!(volume.percentages(), (63, 38));
        assert_eq!(volume.volume_label(), "진보 63% · 보수 38%");
    }

    #[test]
    fn test_glossary_lookup() {
        let detail = sample_detail();
        assert!(detail.glossary_term("업무보고").is_some());
        assert!(detail.glossary_term("missing").is_none());
    }
}
