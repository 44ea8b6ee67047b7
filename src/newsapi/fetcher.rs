use std::time::Duration;

use tracing::warn;

use crate::common::Article;
use crate::config::AppConfig;

use super::prelude::{JsonArticle, NewsApiResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Query mode for the paginated news API.
#[derive(Clone, Debug)]
pub enum QueryMode {
    /// Everything matching a free-text query, sorted by recency.
    Everything,
    /// Breaking-news headlines only.
    TopHeadlines,
}

pub struct NewsApiFetcher {
    client: reqwest::Client,
    api_key: String,
    api_base_url: String,
}

impl NewsApiFetcher {
    /// Create a new fetcher with the given configuration. Missing credentials
    /// surface here, once, as a recoverable "source unavailable" error - the
    /// caller logs it and runs without this source.
    pub fn new(config: &AppConfig) -> Result<NewsApiFetcher, Box<dyn std::error::Error>> {
        const API_BASE_URL: &str = "https://newsapi.org/v2";
        let api_key = match &config.newsapi {
            Some(newsapi) if !newsapi.api_key.trim().is_empty() => newsapi.api_key.clone(),
            _ => return Err("no NewsAPI key configured".into()),
        };
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
            api_key,
            api_base_url: API_BASE_URL.to_string(),
        })
    }

    #[allow(dead_code)]
    pub(crate) fn with_base_url(&mut self, base_url: String) -> &mut Self {
        self.api_base_url = base_url;
        self
    }

    /// Fetch and normalize articles. Never fails: transport and payload
    /// errors are logged and yield an empty batch so one broken source
    /// cannot abort a run.
    pub async fn fetch(&self, mode: &QueryMode, query: &str, page_size: usize) -> Vec<Article> {
        match self.try_fetch(mode, query, page_size).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("NewsAPI fetch failed: {e}");
                Vec::new()
            }
        }
    }

    async fn try_fetch(
        &self,
        mode: &QueryMode,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<Article>, Box<dyn std::error::Error>> {
        let page_size_param = page_size.to_string();
        let request = match mode {
            QueryMode::Everything => self
                .client
                .get(format!("{}/everything", self.api_base_url))
                .query(&[
                    ("q", query),
                    ("language", "en"),
                    ("sortBy", "publishedAt"),
                    ("pageSize", page_size_param.as_str()),
                ]),
            QueryMode::TopHeadlines => self
                .client
                .get(format!("{}/top-headlines", self.api_base_url))
                .query(&[
                    ("q", query),
                    ("language", "en"),
                    ("pageSize", page_size_param.as_str()),
                ]),
        };

        let response = request
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<NewsApiResponse>()
            .await?;

        if response.status != "ok" {
            return Err(format!("NewsAPI returned status {}", response.status).into());
        }

        // Skip malformed items individually; the page size is enforced again
        // locally in case the server ignores the parameter.
        Ok(response
            .articles
            .iter()
            .filter_map(JsonArticle::as_article)
            .take(page_size)
            .collect())
    }
}
