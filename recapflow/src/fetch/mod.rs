//! Page fetching.
//!
//! This module provides:
//! - The [`Fetcher`] trait the content manager fetches through
//! - An HTTP implementation backed by `reqwest` (feature `http`)

#[cfg(feature = "http")]
mod http;

use async_trait::async_trait;

use crate::errors::FetchError;

#[cfg(feature = "http")]
pub use http::HttpFetcher;

/// Fetches the HTML text of a URL.
///
/// Implementations return the body of a successful response. A non-success
/// status, an empty body and a transport failure are all reported as
/// [`FetchError`]. Nothing is retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Rejects blank bodies the same way for every fetcher.
pub(crate) fn non_empty(body: String) -> Result<String, FetchError> {
    if body.trim().is_empty() {
        Err(FetchError::EmptyBody)
    } else {
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("<p>x</p>".into()), Ok("<p>x</p>".to_string()));
        assert_eq!(non_empty("  \n".into()), Err(FetchError::EmptyBody));
    }
}
