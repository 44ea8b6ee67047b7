use std::time::Duration;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::common::Article;

use super::prelude::JsonNewsItem;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stories are pulled from a bounded prefix of the top-stories list; beyond
/// that the source is considered exhausted for the run.
const CANDIDATE_CAP: usize = 100;

/// Titles must match one of these to count as on-topic. Comma-separated,
/// compiled case-insensitively; short tokens are word-boundary anchored so
/// "ai" does not match "email".
const TOPIC_KEYWORDS: &str = "\\bai\\b,artificial intelligence,machine learning,deep learning,\
                              \\bgpt,\\bllms?\\b,openai,chatgpt,anthropic,claude,gemini,deepmind,\
                              mistral,neural,transformer";

pub struct HNFetcher {
    client: reqwest::Client,
    api_base_url: String,
    topic_filters: Vec<Regex>,
}

impl HNFetcher {
    #[must_use]
    /// Create a new fetcher. The source needs no credentials.
    pub fn new() -> HNFetcher {
        const API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_base_url: API_BASE_URL.to_string(),
            topic_filters: compile_topic_filters(),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn with_base_url(&mut self, base_url: String) -> &mut Self {
        self.api_base_url = base_url;
        self
    }

    /// Fetch up to `limit` on-topic stories. Never fails: transport errors
    /// are logged and yield an empty batch; a single bad item is skipped
    /// without aborting the batch.
    pub async fn fetch(&self, limit: usize) -> Vec<Article> {
        match self.try_fetch(limit).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Hacker News fetch failed: {e}");
                Vec::new()
            }
        }
    }

    /// Pull the top-stories IDs, then items one by one, keeping on-topic
    /// stories until `limit` matches are found or the candidate set is
    /// exhausted.
    async fn try_fetch(&self, limit: usize) -> Result<Vec<Article>, Box<dyn std::error::Error>> {
        let mut articles: Vec<Article> = Vec::new();

        let prefetched = self.prefetch().await?;
        for id in prefetched.into_iter().take(CANDIDATE_CAP) {
            if articles.len() >= limit {
                break;
            }

            let news_item = match self.fetch_news_item(id).await {
                Ok(item) => item,
                Err(e) => {
                    warn!("skipping Hacker News item {id}: {e}");
                    continue;
                }
            };

            match news_item.as_article() {
                Some(article) if self.is_on_topic(&article.title) => articles.push(article),
                _ => {}
            }
        }

        Ok(articles)
    }

    /// Fetch the top stories' IDs from the API
    async fn prefetch(&self) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
        let result = self
            .client
            .get(format!("{}/topstories.json", self.api_base_url))
            .send()
            .await?
            .json::<Vec<i64>>()
            .await?;

        Ok(result)
    }

    /// Fetch a single news item by its ID
    async fn fetch_news_item(&self, id: i64) -> Result<JsonNewsItem, Box<dyn std::error::Error>> {
        let result = self
            .client
            .get(format!("{}/item/{id}.json", self.api_base_url))
            .send()
            .await?
            .json::<JsonNewsItem>()
            .await?;

        Ok(result)
    }

    fn is_on_topic(&self, title: &str) -> bool {
        self.topic_filters.iter().any(|filter| filter.is_match(title))
    }
}

impl Default for HNFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_topic_filters() -> Vec<Regex> {
    let mut filters: Vec<Regex> = Vec::new();
    for keyword in TOPIC_KEYWORDS.split(',') {
        match RegexBuilder::new(keyword).case_insensitive(true).build() {
            Ok(re) => filters.push(re),
            Err(e) => warn!("Error creating topic filter: {e}"),
        }
    }
    filters
}
