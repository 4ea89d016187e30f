//! Scripted fetcher.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::FetchError;
use crate::fetch::{non_empty, Fetcher};

/// A fetcher that answers from a fixed table of URLs and records each call.
///
/// Unknown URLs answer `404 Not Found`. Bodies go through the same
/// empty-body check as the HTTP fetcher.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: Mutex<HashMap<String, Result<String, FetchError>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    /// Creates a fetcher with no pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page.
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.set_page(url, html);
        self
    }

    /// Adds a failing URL.
    #[must_use]
    pub fn with_error(self, url: impl Into<String>, error: FetchError) -> Self {
        self.set_error(url, error);
        self
    }

    /// Replaces the response for `url`.
    pub fn set_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.responses.lock().insert(url.into(), Ok(html.into()));
    }

    /// Makes `url` fail with `error`.
    pub fn set_error(&self, url: impl Into<String>, error: FetchError) {
        self.responses.lock().insert(url.into(), Err(error));
    }

    /// Returns how many times `url` was fetched.
    #[must_use]
    pub fn call_count(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    /// Returns the total number of fetches.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    /// Forgets recorded calls.
    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        *self.calls.lock().entry(url.to_string()).or_insert(0) += 1;

        let response = self.responses.lock().get(url).cloned();
        match response {
            Some(result) => non_empty(result?),
            None => Err(FetchError::Status {
                code: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses() {
        let fetcher = StaticFetcher::new()
            .with_page("https://a", "<p>a</p>")
            .with_error("https://b", FetchError::Transport("reset".into()))
            .with_page("https://c", "   ");

        assert_eq!(fetcher.fetch("https://a").await.unwrap(), "<p>a</p>");
        assert_eq!(
            fetcher.fetch("https://b").await,
            Err(FetchError::Transport("reset".into()))
        );
        assert_eq!(fetcher.fetch("https://c").await, Err(FetchError::EmptyBody));
        assert!(matches!(
            fetcher.fetch("https://missing").await,
            Err(FetchError::Status { code: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_call_counting() {
        let fetcher = StaticFetcher::new().with_page("https://a", "x");
        fetcher.fetch("https://a").await.unwrap();
        fetcher.fetch("https://a").await.unwrap();
        let _ = fetcher.fetch("https://b").await;

        assert_eq!(fetcher.call_count("https://a"), 2);
        assert_eq!(fetcher.call_count("https://b"), 1);
        assert_eq!(fetcher.total_calls(), 3);

        fetcher.reset_calls();
        assert_eq!(fetcher.total_calls(), 0);
    }
}
