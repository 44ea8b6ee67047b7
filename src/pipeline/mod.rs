use tracing::{info, warn};

use crate::common::prelude::{deduplicate, rank, Article, ExcludeFilter};
use crate::config::AppConfig;
use crate::feeds::prelude::RssFetcher;
use crate::hackernews::prelude::HNFetcher;
use crate::newsapi::prelude::{NewsApiFetcher, QueryMode};

/// Per-source result cap used when neither the CLI nor the config sets one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The subset of sources a run pulls from.
#[derive(Clone, Debug)]
pub struct SourceSelection {
    pub newsapi: bool,
    pub hackernews: bool,
    pub feeds: bool,
}

impl SourceSelection {
    /// Parse a comma-separated source list ("newsapi,hackernews,feeds").
    /// Unknown names are ignored.
    #[must_use]
    pub fn from_list(raw: &str) -> SourceSelection {
        let names: Vec<String> = raw
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .collect();
        Self {
            newsapi: names.iter().any(|n| n == "newsapi"),
            hackernews: names.iter().any(|n| n == "hackernews"),
            feeds: names.iter().any(|n| n == "feeds"),
        }
    }
}

/// Everything a single pipeline run needs; owned by the caller and never
/// mutated by the pipeline.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub sources: SourceSelection,
    pub mode: QueryMode,
    pub query: String,
    pub page_size: usize,
    pub exclude_keywords: String,
    pub similarity_threshold: u8,
}

/// Per-run counters reported next to the ranked collection.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    pub newsapi_count: usize,
    pub hackernews_count: usize,
    pub feeds_count: usize,
    pub removed_by_keyword: usize,
    pub removed_duplicates: usize,
}

impl RunStats {
    #[must_use]
    pub fn total_fetched(&self) -> usize {
        self.newsapi_count + self.hackernews_count + self.feeds_count
    }
}

/// Composes the source adapters with the filter, deduplication and ranking
/// stages. A pure function of its options: adapter failures are absorbed at
/// the adapter boundary and a run never mutates caller state.
pub struct Pipeline {
    newsapi: Option<NewsApiFetcher>,
    hackernews: HNFetcher,
    feeds: RssFetcher,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: &AppConfig) -> Pipeline {
        // A missing API key downgrades the source instead of failing the run.
        let newsapi = match NewsApiFetcher::new(config) {
            Ok(fetcher) => Some(fetcher),
            Err(e) => {
                warn!("NewsAPI source unavailable: {e}");
                None
            }
        };
        Self {
            newsapi,
            hackernews: HNFetcher::new(),
            feeds: RssFetcher::new(config),
        }
    }

    /// Run the full aggregation: fetch from the selected sources, then
    /// keyword-filter, deduplicate and rank the union.
    pub async fn run(&self, options: &PipelineOptions) -> (Vec<Article>, RunStats) {
        let mut stats = RunStats::default();
        let mut all_articles: Vec<Article> = Vec::new();

        if options.sources.newsapi {
            if let Some(fetcher) = &self.newsapi {
                let mut batch = fetcher
                    .fetch(&options.mode, &options.query, options.page_size)
                    .await;
                stats.newsapi_count = batch.len();
                all_articles.append(&mut batch);
            } else {
                warn!("NewsAPI selected but unavailable, skipping");
            }
        }

        if options.sources.hackernews {
            let mut batch = self.hackernews.fetch(options.page_size).await;
            stats.hackernews_count = batch.len();
            all_articles.append(&mut batch);
        }

        if options.sources.feeds {
            let mut batch = self.feeds.fetch(options.page_size).await;
            stats.feeds_count = batch.len();
            all_articles.append(&mut batch);
        }

        info!("fetched {} articles", stats.total_fetched());
        if all_articles.is_empty() {
            return (all_articles, stats);
        }

        let fetched = all_articles.len();
        let kept = ExcludeFilter::parse(&options.exclude_keywords).apply(all_articles);
        stats.removed_by_keyword = fetched - kept.len();

        let before_dedup = kept.len();
        let unique = deduplicate(kept, options.similarity_threshold);
        stats.removed_duplicates = before_dedup - unique.len();

        info!(
            "{} unique articles ({} duplicates, {} keyword-filtered)",
            unique.len(),
            stats.removed_duplicates,
            stats.removed_by_keyword,
        );

        (rank(unique), stats)
    }
}
