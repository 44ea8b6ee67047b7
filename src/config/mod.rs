use serde::Deserialize;

use crate::sender::{DummySender, Sender, SlackSender};

#[derive(Clone, Deserialize)]
pub struct NewsApiConfig {
    pub api_key: String,
}

#[derive(Clone, Deserialize)]
pub struct SlackConfig {
    pub token: String,
    pub channel: String,
}

#[derive(Clone, Deserialize)]
pub struct RssSource {
    pub url: String,
    pub name: String,
}

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub newsapi: Option<NewsApiConfig>,
    pub rss_sources: Option<Vec<RssSource>>,
    pub slack: Option<SlackConfig>,
    /// Raw comma-separated exclusion terms, parsed by the keyword filter.
    #[serde(default)]
    pub exclude_keywords: String,
    pub similarity_threshold: Option<u8>,
    pub page_size: Option<usize>,
}

impl AppConfig {
    pub fn from_file(file_name: &String) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(file_name)?;
        let config: AppConfig = serde_json::from_str(&contents)?;

        Ok(config)
    }

    #[allow(dead_code)]
    pub fn from_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: AppConfig = serde_json::from_str(contents)?;

        Ok(config)
    }

    pub fn get_sender(&self) -> Sender {
        if let Some(config) = &self.slack {
            Sender::Slack(SlackSender::new(config))
        } else {
            Sender::Dummy(DummySender {})
        }
    }

    /// Configured feed list, or the stock trio of AI-heavy feeds.
    pub fn get_rss_sources(&self) -> Vec<RssSource> {
        self.rss_sources
            .clone()
            .unwrap_or_else(default_rss_sources)
    }
}

fn default_rss_sources() -> Vec<RssSource> {
    [
        (
            "Google News",
            "https://news.google.com/rss/search?q=artificial+intelligence",
        ),
        ("TechCrunch", "https://techcrunch.com/feed/"),
        (
            "Ars Technica",
            "https://feeds.arstechnica.com/arstechnica/index",
        ),
    ]
    .iter()
    .map(|(name, url)| RssSource {
        name: (*name).to_string(),
        url: (*url).to_string(),
    })
    .collect()
}
