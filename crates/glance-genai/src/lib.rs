mod client;
mod render;

pub use client::HttpGenaiClient;
pub use render::{display_reply, render_reply, truncate_at_period};

/// Remote generative-AI query interface
#[async_trait::async_trait]
pub trait GenaiClient: Send + Sync {
    /// Send one message and return the JSON reply
    async fn query(&self, message: &str) -> Result<serde_json::Value, QueryError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub endpoint: String,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Message {0:?} cannot be sent as a path segment")]
    UnroutableMessage(String),

    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QueryError::Timeout(err)
        } else {
            QueryError::NetworkError(err)
        }
    }
}
