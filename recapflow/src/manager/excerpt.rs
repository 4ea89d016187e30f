//! Excerpt values returned to the UI.

use serde::{Deserialize, Serialize};

use crate::errors::RecapError;

/// Which kind of excerpt a fragment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcerptKind {
    /// Ending of the previous chapter.
    Recap,
    /// Story synopsis.
    Blurb,
}

/// A sanitized excerpt fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excerpt {
    /// Sanitized markup.
    pub content: String,
    /// Recap or blurb.
    #[serde(rename = "type")]
    pub kind: ExcerptKind,
}

impl Excerpt {
    /// Creates a recap excerpt.
    #[must_use]
    pub fn recap(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ExcerptKind::Recap,
        }
    }

    /// Creates a blurb excerpt.
    #[must_use]
    pub fn blurb(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: ExcerptKind::Blurb,
        }
    }
}

/// Wire form of an excerpt result: `{"content", "type"}` or `{"error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcerptResponse {
    /// The excerpt was built.
    Content(Excerpt),
    /// The excerpt could not be built.
    Error {
        /// User-facing message.
        error: String,
    },
}

impl From<Result<Excerpt, RecapError>> for ExcerptResponse {
    fn from(result: Result<Excerpt, RecapError>) -> Self {
        match result {
            Ok(excerpt) => Self::Content(excerpt),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}
