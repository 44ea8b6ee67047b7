use crate::common::Article;

/// Order articles by popularity score (descending), then by publish time
/// (descending, plain lexical comparison - correct for zero-padded RFC 3339
/// values only). The sort is stable, so equal keys keep their post-dedup
/// relative order. Among equal scores the `"Unknown"` sentinel orders ahead
/// of RFC 3339 timestamps (`'U' > '2'`).
#[must_use]
pub fn rank(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by(|left, right| {
        right
            .popularity_score
            .cmp(&left.popularity_score)
            .then_with(|| right.published_at.cmp(&left.published_at))
    });
    articles
}

#[cfg(test)]
mod test {
    use super::rank;
    use crate::common::{Article, UNKNOWN_PUBLISHED};

    fn article(title: &str, score: u32, published_at: &str) -> Article {
        Article {
            title: title.to_string(),
            url: "https://example.com".to_string(),
            source_name: "Test".to_string(),
            published_at: published_at.to_string(),
            excerpt: String::new(),
            body: String::new(),
            popularity_score: score,
            image_url: None,
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_score_dominates_recency() {
        let ranked = rank(vec![
            article("old but loved", 120, "2023-06-01T00:00:00Z"),
            article("fresh but unscored", 0, "2024-05-01T00:00:00Z"),
            article("middling", 50, "2024-01-01T00:00:00Z"),
        ]);
        assert_eq!(
            titles(&ranked),
            vec!["old but loved", "middling", "fresh but unscored"],
        );
    }

    #[test]
    fn test_equal_scores_sort_by_published_desc() {
        let ranked = rank(vec![
            article("older", 10, "2024-01-01T08:00:00Z"),
            article("newer", 10, "2024-01-02T08:00:00Z"),
        ]);
        assert_eq!(titles(&ranked), vec!["newer", "older"]);
    }

    #[test]
    fn test_stable_on_equal_keys() {
        // Equal score, descending publish dates fed in order: lexical
        // comparison of the strings leaves them untouched.
        let ranked = rank(vec![
            article("first in", 50, "2024-01-02"),
            article("second in", 50, "2024-01-01"),
        ]);
        assert_eq!(titles(&ranked), vec!["first in", "second in"]);

        // Fully equal keys preserve insertion order (stable sort).
        let ranked = rank(vec![
            article("a", 7, "2024-03-01T00:00:00Z"),
            article("b", 7, "2024-03-01T00:00:00Z"),
            article("c", 7, "2024-03-01T00:00:00Z"),
        ]);
        assert_eq!(titles(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_sentinel_orders_ahead_within_equal_score() {
        let ranked = rank(vec![
            article("dated", 5, "2024-04-01T00:00:00Z"),
            article("undated", 5, UNKNOWN_PUBLISHED),
        ]);
        assert_eq!(titles(&ranked), vec!["undated", "dated"]);
    }
}
