use std::collections::HashMap;

use crate::common::Article;

/// Thumbnail lookup capability. `try_fetch` surfaces an image already known
/// for the article; `fallback` must always produce something displayable.
pub trait ImageSource {
    fn try_fetch(&self, article: &Article) -> Option<String>;
    fn fallback(&self, article: &Article) -> String;
}

/// Resolve an image through the capability chain.
pub fn resolve_image<P: ImageSource>(provider: &P, article: &Article) -> String {
    provider
        .try_fetch(article)
        .unwrap_or_else(|| provider.fallback(article))
}

/// Deterministic placeholder provider: reuses the image a source already
/// delivered, otherwise builds a source-themed placeholder URL labeled with
/// the leading title words. No network involved.
pub struct PlaceholderImages;

impl PlaceholderImages {
    /// Background/foreground hex pair per source family.
    fn theme(source_name: &str) -> (&'static str, &'static str) {
        match source_name {
            "Hacker News" => ("ff6600", "ffffff"),
            name if name.contains("TechCrunch") => ("0a9e01", "ffffff"),
            _ => ("667eea", "ffffff"),
        }
    }

    fn label(title: &str) -> String {
        title
            .split_whitespace()
            .take(3)
            .collect::<Vec<&str>>()
            .join("+")
    }
}

impl ImageSource for PlaceholderImages {
    fn try_fetch(&self, article: &Article) -> Option<String> {
        article.image_url.clone()
    }

    fn fallback(&self, article: &Article) -> String {
        let (background, foreground) = Self::theme(&article.source_name);
        format!(
            "https://placehold.co/600x400/{background}/{foreground}?text={}",
            Self::label(&article.title),
        )
    }
}

/// Summarization capability: title + excerpt + body in, short text out.
/// LLM-backed implementations live outside this crate; `fallback` keeps the
/// digest usable without one.
pub trait Summarizer {
    fn try_summarize(&self, article: &Article) -> Option<String>;
    fn fallback(&self, article: &Article) -> String;
}

/// Instruction handed to external LLM-backed summarizer implementations.
#[allow(dead_code)]
pub const SUMMARY_PROMPT: &str = "Summarize this news article in 2-3 short bullet points. \
    Lead with the key insight, keep each bullet under 15 words, and skip background filler.";

const SUMMARY_MAX_CHARS: usize = 280;

/// Fallback-only summarizer that trims the excerpt (or body) to a readable
/// length at a word boundary.
pub struct ExcerptSummarizer;

impl Summarizer for ExcerptSummarizer {
    fn try_summarize(&self, _article: &Article) -> Option<String> {
        None
    }

    fn fallback(&self, article: &Article) -> String {
        let text = if article.excerpt.is_empty() {
            &article.body
        } else {
            &article.excerpt
        };
        truncate_on_word(text, SUMMARY_MAX_CHARS)
    }
}

pub fn summarize<S: Summarizer>(provider: &S, article: &Article) -> String {
    provider
        .try_summarize(article)
        .unwrap_or_else(|| provider.fallback(article))
}

/// Trim to at most `max_chars`, cutting at the last word boundary and
/// marking the cut. Multi-byte text is safe: the cut happens on whitespace.
pub fn truncate_on_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    let cut = prefix.rfind(char::is_whitespace).unwrap_or(prefix.len());
    format!("{}...", prefix[..cut].trim_end())
}

/// Caller-owned side table for resolved enrichment values, keyed by the
/// article URL. One table per capability; the pipeline itself never sees it,
/// so re-resolving an image cannot re-trigger deduplication.
#[derive(Default)]
pub struct SideTable {
    entries: HashMap<String, String>,
}

#[allow(dead_code)]
impl SideTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_image(&mut self, provider: &impl ImageSource, article: &Article) -> String {
        self.entries
            .entry(article.url.clone())
            .or_insert_with(|| resolve_image(provider, article))
            .clone()
    }

    pub fn resolve_summary(&mut self, provider: &impl Summarizer, article: &Article) -> String {
        self.entries
            .entry(article.url.clone())
            .or_insert_with(|| summarize(provider, article))
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
