use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::{ExtractError, Result};

/// Trait for downloading raw bytes from a URL
///
/// The pipeline only ever needs `GET url -> bytes`; keeping this behind a
/// trait lets tests substitute an in-memory fake for the real HTTP client.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a URL returning raw bytes
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch a URL and decode it as UTF-8, replacing invalid sequences
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.fetch(url).await?;
        Ok(decode_lossy(&bytes))
    }
}

/// HTTP fetcher sending a browser-like User-Agent with every request
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Network {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| ExtractError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}

/// Decode bytes as UTF-8, never failing on invalid sequences
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
