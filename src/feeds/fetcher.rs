use std::time::Duration;

use rss::Channel;
use tracing::{debug, warn};

use crate::common::Article;
use crate::config::{AppConfig, RssSource};

use super::prelude::FeedItem;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RssFetcher {
    client: reqwest::Client,
    sources: Vec<RssSource>,
}

impl RssFetcher {
    /// Create a new RssFetcher over the configured feed list
    #[must_use]
    pub fn new(config: &AppConfig) -> RssFetcher {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            sources: config.get_rss_sources(),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn with_sources(&mut self, sources: Vec<RssSource>) -> &mut Self {
        self.sources = sources;
        self
    }

    /// Fetch every configured feed, capping entries per feed. Never fails:
    /// each feed is pulled independently, so a parse or transport failure on
    /// one feed cannot block the others.
    pub async fn fetch(&self, per_feed_cap: usize) -> Vec<Article> {
        let mut articles = Vec::new();

        for source in &self.sources {
            match self.pull_feed_items(source, per_feed_cap).await {
                Ok(mut items) => {
                    debug!("{}: {} entries kept", source.name, items.len());
                    articles.append(&mut items);
                }
                Err(e) => warn!("Error fetching RSS from {}: {e}", source.url),
            }
        }

        articles
    }

    async fn pull_feed_items(
        &self,
        source: &RssSource,
        per_feed_cap: usize,
    ) -> Result<Vec<Article>, Box<dyn std::error::Error>> {
        let content = self.client.get(&source.url).send().await?.bytes().await?;
        let channel = Channel::read_from(&content[..])?;

        // The channel's own title names the outlet; the configured name is
        // the fallback.
        let source_name = if channel.title().trim().is_empty() {
            source.name.clone()
        } else {
            channel.title().to_string()
        };

        let items = channel
            .items()
            .iter()
            .filter_map(FeedItem::from)
            .take(per_feed_cap)
            .map(|item| item.as_article(&source_name))
            .collect();

        Ok(items)
    }
}
