use serde::{Deserialize, Serialize};

mod dedup;
mod filter;
mod rank;

/// Sentinel used in `published_at` when a source provides no publish time.
pub const UNKNOWN_PUBLISHED: &str = "Unknown";

/// A normalized news article. Every source adapter converts its own payload
/// into this shape; items that cannot produce both a title and a URL are
/// discarded during normalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Absolute link. A weak identity hint only - sources syndicate the same
    /// story under different URLs, so it is never used as a duplicate key.
    pub url: String,
    pub source_name: String,
    /// RFC 3339 timestamp, or [`UNKNOWN_PUBLISHED`].
    pub published_at: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    /// Source-native ranking signal; zero for sources without one.
    #[serde(default)]
    pub popularity_score: u32,
    /// Resolved lazily by the caller, never part of identity.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Check if a URL is missing or empty
pub fn is_missing_url(item_url: &str) -> bool {
    item_url.trim().is_empty()
}

/// Only absolute links survive normalization; a relative link is useless to
/// every downstream consumer.
pub fn is_absolute_url(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok()
}

pub mod prelude {
    pub use super::dedup::{deduplicate, DEFAULT_SIMILARITY_THRESHOLD};
    pub use super::filter::ExcludeFilter;
    pub use super::rank::rank;
    pub use super::{is_absolute_url, is_missing_url, Article, UNKNOWN_PUBLISHED};
}
