use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::common::Article;
use crate::config::SlackConfig;
use crate::enrich::{resolve_image, summarize, truncate_on_word, ExcerptSummarizer, PlaceholderImages};
use crate::pipeline::RunStats;

/// Slack message ceiling; the ranked collection is already ordered, so the
/// head of it is the digest.
const MAX_ARTICLES_PER_MESSAGE: usize = 10;

const EXCERPT_MAX_CHARS: usize = 200;

pub enum Sender {
    Dummy(DummySender),
    Slack(SlackSender),
}

impl Sender {
    pub async fn send_digest(
        &self,
        digest: &[Article],
        stats: &RunStats,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Sender::Dummy(sender) => sender.send_digest(digest, stats).await,
            Sender::Slack(sender) => sender.send_digest(digest, stats).await,
        }
    }
}

pub trait DigestSender {
    async fn send_digest(
        &self,
        digest: &[Article],
        stats: &RunStats,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct DummySender {}

pub struct SlackSender {
    config: SlackConfig,
    client: reqwest::Client,
    api_base_url: String,
}

#[derive(Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackSender {
    #[must_use]
    pub fn new(config: &SlackConfig) -> Self {
        const API_BASE_URL: &str = "https://slack.com/api";
        Self {
            config: config.clone(),
            client: reqwest::Client::new(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }

    #[allow(dead_code)]
    fn with_base_url(&mut self, base_url: String) -> &mut Self {
        self.api_base_url = base_url;
        self
    }

    fn article_block(article: &Article) -> serde_json::Value {
        let mut meta = format!(
            "{} | {}",
            article.source_name,
            published_day(&article.published_at),
        );
        if article.popularity_score > 0 {
            meta.push_str(&format!(" | {} pts", article.popularity_score));
        }

        let mut text = format!("*<{}|{}>*\n{meta}", article.url, article.title);
        if !article.excerpt.is_empty() {
            text.push('\n');
            text.push_str(&format!(
                "_{}_",
                truncate_on_word(&article.excerpt, EXCERPT_MAX_CHARS),
            ));
        }

        json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": text},
            "accessory": {
                "type": "image",
                "image_url": resolve_image(&PlaceholderImages, article),
                "alt_text": article.title,
            },
        })
    }

    fn build_payload(&self, digest: &[Article], stats: &RunStats) -> serde_json::Value {
        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {"type": "plain_text", "text": "Daily AI News Digest"},
            }),
            json!({
                "type": "context",
                "elements": [{"type": "mrkdwn", "text": format!(
                    "NewsAPI: {} | Hacker News: {} | Feeds: {} | {} duplicates removed | {} keyword-filtered",
                    stats.newsapi_count,
                    stats.hackernews_count,
                    stats.feeds_count,
                    stats.removed_duplicates,
                    stats.removed_by_keyword,
                )}],
            }),
        ];
        blocks.extend(
            digest
                .iter()
                .take(MAX_ARTICLES_PER_MESSAGE)
                .map(Self::article_block),
        );

        json!({
            "channel": self.config.channel,
            "text": format!("Daily AI News Digest: {} articles", digest.len()),
            "blocks": blocks,
            "unfurl_links": false,
            "unfurl_media": false,
        })
    }
}

impl DigestSender for SlackSender {
    async fn send_digest(
        &self,
        digest: &[Article],
        stats: &RunStats,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let payload = self.build_payload(digest, stats);

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.api_base_url))
            .bearer_auth(&self.config.token)
            .json(&payload)
            .send()
            .await?
            .json::<SlackResponse>()
            .await?;

        if !response.ok {
            return Err(format!(
                "Slack rejected the digest: {}",
                response.error.unwrap_or_else(|| String::from("unknown error")),
            )
            .into());
        }

        info!("digest of {} articles sent to {}", digest.len(), self.config.channel);
        Ok(())
    }
}

impl DigestSender for DummySender {
    async fn send_digest(
        &self,
        digest: &[Article],
        stats: &RunStats,
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", digest_to_text(digest, stats));

        Ok(())
    }
}

/// Convert a digest to a plain text string
pub fn digest_to_text(digest: &[Article], stats: &RunStats) -> String {
    let mut body = format!(
        "AI news digest: {} articles ({} duplicates removed, {} keyword-filtered)\n\n",
        digest.len(),
        stats.removed_duplicates,
        stats.removed_by_keyword,
    );
    for article in digest {
        body.push_str(&format!(
            "* [{source}] {title} - {url}",
            source = article.source_name,
            title = article.title,
            url = article.url,
        ));
        if article.popularity_score > 0 {
            body.push_str(&format!(" ({} pts)", article.popularity_score));
        }
        body.push('\n');
        if !article.excerpt.is_empty() {
            body.push_str(&format!("    {}\n", summarize(&ExcerptSummarizer, article)));
        }
    }
    body.push_str(format!("\nGenerated: {}", formatted_now()).as_str());
    body
}

/// Day part of an RFC 3339 timestamp; the `"Unknown"` sentinel passes
/// through unchanged.
fn published_day(published_at: &str) -> &str {
    published_at.get(..10).unwrap_or(published_at)
}

fn formatted_now() -> String {
    chrono::Local::now().to_rfc2822()
}

#[cfg(test)]
mod test {
    use super::{digest_to_text, published_day, DigestSender, SlackSender};
    use crate::common::{Article, UNKNOWN_PUBLISHED};
    use crate::config::SlackConfig;
    use crate::pipeline::RunStats;
    use tokio::test;

    fn article(title: &str, score: u32) -> Article {
        Article {
            title: title.to_string(),
            url: "https://example.com/a".to_string(),
            source_name: "Hacker News".to_string(),
            published_at: "2024-05-01T12:00:00Z".to_string(),
            excerpt: "An excerpt".to_string(),
            body: String::new(),
            popularity_score: score,
            image_url: None,
        }
    }

    #[test]
    async fn test_published_day() {
        assert_eq!(published_day("2024-05-01T12:00:00Z"), "2024-05-01");
        assert_eq!(published_day(UNKNOWN_PUBLISHED), "Unknown");
    }

    #[test]
    async fn test_digest_to_text_lists_articles() {
        let digest = vec![article("GPT-5 ships", 120), article("Quiet story", 0)];
        let stats = RunStats {
            hackernews_count: 2,
            removed_duplicates: 1,
            ..RunStats::default()
        };

        let text = digest_to_text(&digest, &stats);
        assert!(text.contains("2 articles (1 duplicates removed, 0 keyword-filtered)"));
        assert!(text.contains("* [Hacker News] GPT-5 ships - https://example.com/a (120 pts)"));
        assert!(text.contains("* [Hacker News] Quiet story - https://example.com/a\n"));
        assert!(text.contains("    An excerpt\n"), "summary line under each bullet");
    }

    #[test]
    async fn test_slack_send_digest() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let post_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat.postMessage")
                .header("authorization", "Bearer xoxb-test");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ok": true}"#);
        });

        let mut sender = SlackSender::new(&SlackConfig {
            token: "xoxb-test".to_string(),
            channel: "#ai-news".to_string(),
        });
        let sender = sender.with_base_url(format!("http://127.0.0.1:{}", server.port()));

        let result = sender
            .send_digest(&[article("GPT-5 ships", 120)], &RunStats::default())
            .await;
        post_mock.assert();
        assert!(result.is_ok());
    }

    #[test]
    async fn test_slack_rejection_is_an_error() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat.postMessage");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ok": false, "error": "invalid_auth"}"#);
        });

        let mut sender = SlackSender::new(&SlackConfig {
            token: "xoxb-bad".to_string(),
            channel: "#ai-news".to_string(),
        });
        let sender = sender.with_base_url(format!("http://127.0.0.1:{}", server.port()));

        let result = sender.send_digest(&[article("Any", 0)], &RunStats::default()).await;
        assert!(result.is_err());
    }

    #[test]
    async fn test_payload_has_header_stats_and_accessory_image() {
        let sender = SlackSender::new(&SlackConfig {
            token: "xoxb-test".to_string(),
            channel: "#ai-news".to_string(),
        });
        let stats = RunStats {
            newsapi_count: 3,
            hackernews_count: 2,
            ..RunStats::default()
        };

        let payload = sender.build_payload(&[article("GPT-5 ships", 120)], &stats);
        let blocks = payload["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0]["type"], "header");
        assert!(blocks[1]["elements"][0]["text"]
            .as_str()
            .unwrap()
            .contains("NewsAPI: 3 | Hacker News: 2"));
        assert_eq!(blocks[2]["accessory"]["type"], "image");
        assert!(blocks[2]["text"]["text"]
            .as_str()
            .unwrap()
            .contains("<https://example.com/a|GPT-5 ships>"));
        assert_eq!(payload["channel"], "#ai-news");
    }
}
