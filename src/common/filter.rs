use crate::common::Article;

/// Keyword exclusion list, compiled once from the raw comma-separated string
/// the caller supplies ("crypto, trump, sports"). Terms are lowercased and
/// trimmed; blank terms are dropped.
pub struct ExcludeFilter {
    terms: Vec<String>,
}

impl ExcludeFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let terms = raw
            .split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    /// An article is excluded when any term is a substring of its lowercased
    /// title or its lowercased excerpt.
    fn matches(&self, article: &Article) -> bool {
        let title = article.title.to_lowercase();
        let excerpt = article.excerpt.to_lowercase();
        self.terms
            .iter()
            .any(|term| title.contains(term) || excerpt.contains(term))
    }

    /// Drop matching articles, preserving the order of the rest.
    #[must_use]
    pub fn apply(&self, articles: Vec<Article>) -> Vec<Article> {
        if self.terms.is_empty() {
            return articles;
        }
        articles
            .into_iter()
            .filter(|article| !self.matches(article))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::ExcludeFilter;
    use crate::common::{Article, UNKNOWN_PUBLISHED};

    fn article(title: &str, excerpt: &str) -> Article {
        Article {
            title: title.to_string(),
            url: "https://example.com".to_string(),
            source_name: "Test".to_string(),
            published_at: UNKNOWN_PUBLISHED.to_string(),
            excerpt: excerpt.to_string(),
            body: String::new(),
            popularity_score: 0,
            image_url: None,
        }
    }

    #[test]
    fn test_parse_drops_blank_terms() {
        let filter = ExcludeFilter::parse(" Crypto, , sports ,");
        assert_eq!(filter.terms, vec!["crypto", "sports"]);

        assert!(ExcludeFilter::parse("").terms.is_empty());
        assert!(ExcludeFilter::parse(" , ,").terms.is_empty());
    }

    #[test]
    fn test_excludes_by_title_or_excerpt() {
        let filter = ExcludeFilter::parse("crypto");
        let articles = vec![
            article("Bitcoin and AI convergence", "Crypto markets react"),
            article("New transformer architecture", "Attention is still all you need"),
        ];

        let kept = filter.apply(articles);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "New transformer architecture");
    }

    #[test]
    fn test_matches_excerpt_only() {
        let filter = ExcludeFilter::parse("lawsuit");
        let articles = vec![
            article("Model release roundup", "Vendor faces a lawsuit over training data"),
            article("Model release roundup II", ""),
        ];

        let kept = filter.apply(articles);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Model release roundup II");
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let filter = ExcludeFilter::parse("war, sports");
        let articles = vec![
            article("AI in sports broadcasting", ""),
            article("Compilers for tensor programs", ""),
            article("Chip export wars continue", ""),
        ];

        let once = filter.apply(articles);
        let titles_once: Vec<String> = once.iter().map(|a| a.title.clone()).collect();
        let twice = filter.apply(once);
        let titles_twice: Vec<String> = twice.iter().map(|a| a.title.clone()).collect();
        assert_eq!(titles_once, titles_twice);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = ExcludeFilter::parse("");
        let articles = vec![article("Anything goes", "")];
        assert_eq!(filter.apply(articles).len(), 1);
    }
}
