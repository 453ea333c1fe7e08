//! Content source abstraction over the CMS delivery API.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use cms_pages_types::{Article, ArticleSummary};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("upstream query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("upstream response carried no data")]
    MissingData,
    #[error("upstream response could not be decoded: {0}")]
    Decode(String),
}

impl ContentError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Read-only access to published articles.
///
/// Implementations perform exactly one upstream request per call.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one article with its structured content; `None` when no article
    /// has this slug.
    async fn article(&self, slug: &str) -> Result<Option<Article>, ContentError>;

    /// List every article, in the order the CMS returns them.
    async fn all_articles(&self) -> Result<Vec<ArticleSummary>, ContentError>;

    /// The raw `data` object of the article query, for debugging. Without a
    /// slug the first article is returned.
    async fn article_raw(&self, slug: Option<&str>) -> Result<Value, ContentError>;
}
