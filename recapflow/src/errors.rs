//! Error types for recap and blurb extraction.
//!
//! Every expected failure (a selector that matches nothing, an empty element,
//! a failed fetch, a refresh with nothing cached) is returned as a
//! [`RecapError`] value. Nothing in this crate panics on bad input HTML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for recapflow operations.
#[derive(Debug, Error)]
pub enum RecapError {
    /// A configured selector matched no element.
    #[error("Could not find {what} (selector `{selector}`)")]
    SelectorNotFound {
        /// Human-readable name of the element being looked up.
        what: &'static str,
        /// The selector that matched nothing.
        selector: String,
    },

    /// A selector matched, but the element holds no text.
    #[error("The {what} appears to be empty")]
    EmptyContent {
        /// Human-readable name of the element.
        what: &'static str,
    },

    /// The chapter body was found but contains no paragraphs to truncate.
    #[error("No paragraphs found in chapter content (selector `{selector}`)")]
    NoParagraphs {
        /// The chapter body selector.
        selector: String,
    },

    /// A link element was missing or had no `href`.
    #[error("Could not find {what} URL on the current page (selector `{selector}`)")]
    MissingLink {
        /// Human-readable name of the link.
        what: &'static str,
        /// The selector used to find the link.
        selector: String,
    },

    /// A selector could not be parsed.
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// Parser message.
        reason: String,
    },

    /// A link could not be resolved into an absolute URL.
    #[error("Invalid URL `{url}`: {reason}")]
    InvalidUrl {
        /// The raw href or URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Fetching a remote page failed.
    #[error("Failed to fetch {target}: {source}")]
    Fetch {
        /// What was being fetched ("previous chapter", "story overview").
        target: &'static str,
        /// The underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// A refresh was requested but nothing is cached for the URL.
    #[error("No cached content available. Please refresh to fetch new content.")]
    NoCachedContent {
        /// The URL that missed.
        url: String,
    },

    /// Settings failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure reported by a [`Fetcher`](crate::fetch::Fetcher).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("Failed to fetch content: {code} {reason}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Canonical reason phrase, if any.
        reason: String,
    },

    /// The server answered with an empty or whitespace-only body.
    #[error("Received empty response from server")]
    EmptyBody,

    /// The response exceeded the configured size limit.
    #[error("Response exceeds {limit} bytes")]
    TooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("Network error: {0}")]
    Transport(String),
}

/// Coarse classification of a [`RecapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A configured selector matched nothing.
    SelectorMiss,
    /// A selector matched but the text was blank.
    EmptyContent,
    /// The matched container had no paragraphs.
    Structural,
    /// The fetch failed.
    Network,
    /// Refresh-from-cache found nothing cached.
    CacheMiss,
    /// Invalid settings, selectors or URLs.
    Config,
}

impl RecapError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelectorNotFound { .. } | Self::MissingLink { .. } => ErrorKind::SelectorMiss,
            Self::EmptyContent { .. } => ErrorKind::EmptyContent,
            Self::NoParagraphs { .. } => ErrorKind::Structural,
            Self::Fetch { .. } => ErrorKind::Network,
            Self::NoCachedContent { .. } => ErrorKind::CacheMiss,
            Self::InvalidSelector { .. }
            | Self::InvalidUrl { .. }
            | Self::InvalidConfig(_)
            | Self::Serialization(_) => ErrorKind::Config,
        }
    }

    /// Creates a selector-miss error.
    #[must_use]
    pub fn not_found(what: &'static str, selector: impl Into<String>) -> Self {
        Self::SelectorNotFound {
            what,
            selector: selector.into(),
        }
    }
}

impl From<serde_json::Error> for RecapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_not_found_message() {
        let err = RecapError::not_found("chapter content", ".chapter-inner");
        assert_eq!(
            err.to_string(),
            "Could not find chapter content (selector `.chapter-inner`)"
        );
        assert_eq!(err.kind(), ErrorKind::SelectorMiss);
    }

    #[test]
    fn test_fetch_error_is_wrapped() {
        let err = RecapError::Fetch {
            target: "previous chapter",
            source: FetchError::Status {
                code: 404,
                reason: "Not Found".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch previous chapter: Failed to fetch content: 404 Not Found"
        );
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            RecapError::EmptyContent { what: "story blurb" }.kind(),
            ErrorKind::EmptyContent
        );
        assert_eq!(
            RecapError::NoParagraphs { selector: "div".into() }.kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            RecapError::NoCachedContent { url: "https://a".into() }.kind(),
            ErrorKind::CacheMiss
        );
        assert_eq!(RecapError::InvalidConfig("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::SelectorMiss).unwrap();
        assert_eq!(json, "\"selector_miss\"");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RecapError = parse_err.into();
        assert!(matches!(err, RecapError::Serialization(_)));
    }
}
