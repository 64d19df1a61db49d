//! HTTP font source: fetches fonts from a static asset origin.

use async_trait::async_trait;
use casedoc_traits::{FontSource, ResourceError, SharedResourceData};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches font resources relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpFontSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFontSource {
    /// Creates a source for `base_url` with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ResourceError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ResourceError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResourceError::Network {
                path: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl FontSource for HttpFontSource {
    async fn fetch(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let url = self.url_for(path);
        log::debug!("Fetching font resource from {}", url);

        let network_err = |e: reqwest::Error| ResourceError::Network {
            path: url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(network_err)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResourceError::NotFound(url));
        }
        if !status.is_success() {
            return Err(ResourceError::Network {
                path: url,
                message: format!("HTTP error: {}", status),
            });
        }

        let body = response.bytes().await.map_err(network_err)?;
        Ok(Arc::new(body.to_vec()))
    }

    fn name(&self) -> &'static str {
        "HttpFontSource"
    }
}
