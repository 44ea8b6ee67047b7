use strsim::normalized_levenshtein;

/// Duplicate-detection sensitivity used when the caller supplies none.
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 80;

use crate::common::Article;

/// Normalized title similarity in [0, 100]; 100 means the titles are equal
/// ignoring case. Levenshtein-based, so reordered clauses, added punctuation
/// and outlet-specific prefixes still score high.
fn similarity(left: &str, right: &str) -> f64 {
    normalized_levenshtein(&left.to_lowercase(), &right.to_lowercase()) * 100.0
}

/// A candidate whose similarity to an already accepted title reaches the
/// threshold is a duplicate. The boundary is inclusive: similarity exactly at
/// the threshold counts. Pinned by `test_threshold_boundary_is_inclusive`.
fn is_duplicate(ratio: f64, threshold: u8) -> bool {
    ratio >= f64::from(threshold)
}

/// Collapse near-duplicate titles across sources. Articles are processed in
/// input order and compared against every previously accepted title, so the
/// first occurrence wins and later duplicates are dropped.
#[must_use]
pub fn deduplicate(articles: Vec<Article>, threshold: u8) -> Vec<Article> {
    let mut unique_articles: Vec<Article> = Vec::new();
    let mut seen_titles: Vec<String> = Vec::new();

    for article in articles {
        let duplicate = seen_titles
            .iter()
            .any(|seen| is_duplicate(similarity(seen, &article.title), threshold));
        if !duplicate {
            seen_titles.push(article.title.clone());
            unique_articles.push(article);
        }
    }

    unique_articles
}
