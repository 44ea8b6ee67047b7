use chrono::SecondsFormat;
use serde::Deserialize;

use crate::common::{is_missing_url, Article, UNKNOWN_PUBLISHED};

/// A news item as returned by the Hacker News item endpoint.
#[derive(Debug, Deserialize)]
pub struct JsonNewsItem {
    id: i64,
    title: Option<String>,
    url: Option<String>,
    score: Option<u32>,
    time: Option<i64>,
}

impl JsonNewsItem {
    /// Normalize into the canonical article shape. Self-posts carry no
    /// outbound URL; the comments page stands in so title and URL are always
    /// present. Items without a title are dropped.
    pub fn as_article(&self) -> Option<Article> {
        let title = self.title.clone().filter(|t| !t.trim().is_empty())?;
        let url = self
            .url
            .clone()
            .filter(|u| !is_missing_url(u))
            .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", self.id));

        Some(Article {
            title,
            url,
            source_name: String::from("Hacker News"),
            published_at: self
                .time
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map_or_else(
                    || UNKNOWN_PUBLISHED.to_string(),
                    |dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
            excerpt: String::new(),
            body: String::new(),
            popularity_score: self.score.unwrap_or(0),
            image_url: None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::JsonNewsItem;

    #[test]
    fn test_self_post_falls_back_to_comments_page() {
        let item: JsonNewsItem = serde_json::from_str(
            r#"{"id": 42, "title": "Ask HN: Anyone shipping agents?", "score": 17, "time": 1736904177}"#,
        )
        .unwrap();
        let article = item.as_article().unwrap();
        assert_eq!(article.url, "https://news.ycombinator.com/item?id=42");
        assert_eq!(article.popularity_score, 17);
        assert_eq!(article.published_at, "2025-01-15T01:22:57Z");
        assert_eq!(article.source_name, "Hacker News");
    }

    #[test]
    fn test_untitled_item_is_dropped() {
        let item: JsonNewsItem =
            serde_json::from_str(r#"{"id": 43, "url": "https://example.com"}"#).unwrap();
        assert!(item.as_article().is_none());
    }

    #[test]
    fn test_missing_time_becomes_unknown() {
        let item: JsonNewsItem =
            serde_json::from_str(r#"{"id": 44, "title": "No timestamp", "url": "https://example.com"}"#)
                .unwrap();
        assert_eq!(item.as_article().unwrap().published_at, "Unknown");
    }
}
