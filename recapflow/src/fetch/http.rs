//! HTTP fetcher backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, warn};

use super::{non_empty, Fetcher};
use crate::config::FetchConfig;
use crate::errors::{FetchError, RecapError};

/// Fetches pages over HTTP(S) with a single shared client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Builds a client from `config`, rejecting invalid settings.
    pub fn new(config: FetchConfig) -> Result<Self, RecapError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| RecapError::InvalidConfig(format!("header `{key}`: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RecapError::InvalidConfig(format!("header `{key}`: {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout()?)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .build()
            .map_err(|e| RecapError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Builds a client with default settings.
    pub fn with_defaults() -> Result<Self, RecapError> {
        Self::new(FetchConfig::default())
    }

    /// Returns the configuration the client was built from.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn check_size(&self, len: usize) -> Result<(), FetchError> {
        if len > self.config.body_limit {
            Err(FetchError::TooLarge {
                limit: self.config.body_limit,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        debug!(url, "Fetching page");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Non-success status");
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        if let Some(len) = response.content_length() {
            self.check_size(usize::try_from(len).unwrap_or(usize::MAX))?;
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        self.check_size(bytes.len())?;

        let body = non_empty(String::from_utf8_lossy(&bytes).into_owned())?;
        debug!(
            url,
            bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fetched page"
        );
        Ok(body)
    }
}
