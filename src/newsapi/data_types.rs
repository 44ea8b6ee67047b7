use serde::Deserialize;

use crate::common::{is_absolute_url, Article, UNKNOWN_PUBLISHED};

/// Envelope returned by both the `everything` and `top-headlines` endpoints.
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<JsonArticle>,
}

#[derive(Debug, Deserialize)]
pub struct JsonArticle {
    pub source: JsonSource,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JsonSource {
    pub name: Option<String>,
}

impl JsonArticle {
    /// Normalize one payload item. Items that cannot produce both a title
    /// and a URL are dropped here, not downstream.
    pub fn as_article(&self) -> Option<Article> {
        let title = self.title.clone().filter(|t| !t.trim().is_empty())?;
        let url = self.url.clone().filter(|u| is_absolute_url(u))?;

        Some(Article {
            title,
            url,
            source_name: self
                .source
                .name
                .clone()
                .unwrap_or_else(|| String::from("NewsAPI")),
            published_at: self
                .published_at
                .clone()
                .unwrap_or_else(|| UNKNOWN_PUBLISHED.to_string()),
            excerpt: self.description.clone().unwrap_or_default(),
            body: self.content.clone().unwrap_or_default(),
            // NewsAPI has no native ranking signal
            popularity_score: 0,
            image_url: self.url_to_image.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::JsonArticle;

    #[test]
    fn test_item_without_url_is_dropped() {
        let item: JsonArticle = serde_json::from_str(
            r#"{"source": {"name": "Wired"}, "title": "A headline", "url": null}"#,
        )
        .unwrap();
        assert!(item.as_article().is_none());
    }

    #[test]
    fn test_relative_url_is_dropped() {
        let item: JsonArticle = serde_json::from_str(
            r#"{"source": {"name": "Wired"}, "title": "A headline", "url": "/2024/a-headline"}"#,
        )
        .unwrap();
        assert!(item.as_article().is_none());
    }

    #[test]
    fn test_item_without_title_is_dropped() {
        let item: JsonArticle = serde_json::from_str(
            r#"{"source": {"name": "Wired"}, "title": "  ", "url": "https://example.com/a"}"#,
        )
        .unwrap();
        assert!(item.as_article().is_none());
    }

    #[test]
    fn test_normalization_defaults() {
        let item: JsonArticle = serde_json::from_str(
            r#"{
                "source": {"name": null},
                "title": "A headline",
                "url": "https://example.com/a"
            }"#,
        )
        .unwrap();
        let article = item.as_article().unwrap();
        assert_eq!(article.source_name, "NewsAPI");
        assert_eq!(article.published_at, "Unknown");
        assert_eq!(article.popularity_score, 0);
        assert!(article.excerpt.is_empty());
        assert!(article.image_url.is_none());
    }
}
