use async_trait::async_trait;
use glance_config::genai::GenaiConfig;
use glance_config::network::NetworkConfig;
use reqwest::Url;

use crate::{GenaiClient, ProviderMetadata, QueryError};

/// GET `{base_url}/{route}/{message}` client
#[derive(Clone)]
pub struct HttpGenaiClient {
    client: reqwest::Client,
    base_url: Url,
    route: Vec<String>,
}

impl HttpGenaiClient {
    pub fn new(network: &NetworkConfig, genai: &GenaiConfig) -> Result<Self, QueryError> {
        let base_url = Url::parse(&network.base_url)
            .map_err(|e| QueryError::InvalidUrl(format!("{}: {e}", network.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(QueryError::InvalidUrl(network.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(network.timeout())
            .timeout(network.timeout())
            .build()?;

        let route = genai
            .route
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            client,
            base_url,
            route,
        })
    }

    /// Endpoint for one message, the message is encoded as a single path segment.
    ///
    /// URL normalization drops `.` and `..` segments even when percent-encoded,
    /// so those two messages have no endpoint.
    pub fn endpoint(&self, message: &str) -> Result<Url, QueryError> {
        if matches!(message, "." | "..") {
            return Err(QueryError::UnroutableMessage(message.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QueryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&self.route)
            .push(message);
        Ok(url)
    }
}

#[async_trait]
impl GenaiClient for HttpGenaiClient {
    async fn query(&self, message: &str) -> Result<serde_json::Value, QueryError> {
        let url = self.endpoint(message)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Response not successful: {status}");
            return Err(QueryError::Status { status });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;

        tracing::debug!("Response: {body}");
        Ok(body)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "genai-http".to_string(),
            endpoint: self.base_url.to_string(),
        }
    }
}
