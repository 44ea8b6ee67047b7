use chrono::SecondsFormat;

use crate::common::{is_absolute_url, Article, UNKNOWN_PUBLISHED};

#[derive(Clone)]
pub struct FeedItem {
    pub title: String,
    pub url: String,
    pub published_at: String,
    pub excerpt: String,
    pub body: String,
}

impl FeedItem {
    /// Build from one channel item. Items without a title or link yield
    /// `None` and are dropped. Feed publish dates arrive as RFC 2822 and are
    /// normalized to RFC 3339; anything unparseable becomes the sentinel.
    pub fn from(item: &rss::Item) -> Option<FeedItem> {
        let title = item.title().filter(|t| !t.trim().is_empty())?;
        let url = item.link().filter(|l| is_absolute_url(l))?;

        let published_at = item
            .pub_date()
            .and_then(|raw| chrono::DateTime::parse_from_rfc2822(raw).ok())
            .map_or_else(
                || UNKNOWN_PUBLISHED.to_string(),
                |dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            );

        Some(Self {
            title: title.to_string(),
            url: url.to_string(),
            published_at,
            excerpt: item.description().unwrap_or("").to_string(),
            body: item.content().unwrap_or("").to_string(),
        })
    }

    pub fn as_article(&self, source_name: &str) -> Article {
        Article {
            title: self.title.clone(),
            url: self.url.clone(),
            source_name: source_name.to_string(),
            published_at: self.published_at.clone(),
            excerpt: self.excerpt.clone(),
            body: self.body.clone(),
            // feeds carry no native ranking signal
            popularity_score: 0,
            image_url: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::FeedItem;

    fn item(title: Option<&str>, link: Option<&str>, pub_date: Option<&str>) -> rss::Item {
        let mut item = rss::Item::default();
        item.set_title(title.map(String::from));
        item.set_link(link.map(String::from));
        item.set_pub_date(pub_date.map(String::from));
        item
    }

    #[test]
    fn test_rfc2822_date_is_normalized() {
        let feed_item = FeedItem::from(&item(
            Some("Robots, now with hands"),
            Some("https://example.com/robots"),
            Some("Wed, 01 May 2024 12:30:00 GMT"),
        ))
        .unwrap();
        assert_eq!(feed_item.published_at, "2024-05-01T12:30:00Z");
    }

    #[test]
    fn test_bad_date_becomes_unknown() {
        let feed_item = FeedItem::from(&item(
            Some("Undated"),
            Some("https://example.com/undated"),
            Some("yesterday-ish"),
        ))
        .unwrap();
        assert_eq!(feed_item.published_at, "Unknown");
    }

    #[test]
    fn test_items_missing_identity_are_dropped() {
        assert!(FeedItem::from(&item(None, Some("https://example.com"), None)).is_none());
        assert!(FeedItem::from(&item(Some("No link"), None, None)).is_none());
    }
}
