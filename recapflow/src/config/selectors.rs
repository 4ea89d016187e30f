//! Selector configuration and word budget.

use serde::{Deserialize, Serialize};

use crate::dom::parse_selector;
use crate::errors::RecapError;

/// Selector for paragraphs inside a chapter body.
pub const PARAGRAPH_SELECTOR: &str = "p";

/// Named lookup rules for the current page and fetched pages.
///
/// Field names serialize to the keys the settings are stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Link to the previous chapter, on the current page. The default
    /// matches the anchor; a custom rule may match an element inside it.
    #[serde(rename = "prevChapterBtn", default = "default_prev_chapter_link")]
    pub prev_chapter_link: String,
    /// Chapter body, on a fetched chapter page.
    #[serde(rename = "chapterContent", default = "default_chapter_body")]
    pub chapter_body: String,
    /// Chapter title, on a fetched chapter page.
    #[serde(rename = "chapterTitle", default = "default_chapter_title")]
    pub chapter_title: String,
    /// Fiction title, on the current page. Its enclosing link points at the
    /// story overview.
    #[serde(rename = "fictionTitle", default = "default_fiction_title")]
    pub fiction_title: String,
    /// Synopsis body, on a fetched overview page.
    #[serde(rename = "blurb", default = "default_blurb_body")]
    pub blurb_body: String,
    /// Synopsis labels (tags, warnings), on a fetched overview page.
    #[serde(rename = "blurbLabels", default = "default_blurb_labels")]
    pub blurb_labels: String,
}

fn default_prev_chapter_link() -> String {
    "a[href*='/chapter/']:has(> i.fa-chevron-double-left)".to_string()
}

fn default_chapter_body() -> String {
    ".chapter-inner".to_string()
}

fn default_chapter_title() -> String {
    "h1.font-white".to_string()
}

fn default_fiction_title() -> String {
    "h2.font-white".to_string()
}

fn default_blurb_body() -> String {
    ".description .hidden-content".to_string()
}

fn default_blurb_labels() -> String {
    ".portlet .text-center.font-red-sunglo".to_string()
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            prev_chapter_link: default_prev_chapter_link(),
            chapter_body: default_chapter_body(),
            chapter_title: default_chapter_title(),
            fiction_title: default_fiction_title(),
            blurb_body: default_blurb_body(),
            blurb_labels: default_blurb_labels(),
        }
    }
}

impl SelectorSet {
    /// Returns `(storage key, selector)` pairs.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("prevChapterBtn", &self.prev_chapter_link),
            ("chapterContent", &self.chapter_body),
            ("chapterTitle", &self.chapter_title),
            ("fictionTitle", &self.fiction_title),
            ("blurb", &self.blurb_body),
            ("blurbLabels", &self.blurb_labels),
        ]
    }

    /// Checks that every selector is non-empty and parses.
    pub fn validate(&self) -> Result<(), RecapError> {
        for (key, selector) in self.entries() {
            if selector.trim().is_empty() {
                return Err(RecapError::InvalidConfig(format!("selector `{key}` is empty")));
            }
            parse_selector(selector)
                .map_err(|e| RecapError::InvalidConfig(format!("selector `{key}`: {e}")))?;
        }
        Ok(())
    }
}

/// Settings snapshot passed into every extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecapConfig {
    /// Maximum number of words kept in a recap.
    #[serde(rename = "wordCount", default = "default_word_budget")]
    pub word_budget: usize,
    /// Whether the UI opens the recap automatically.
    #[serde(rename = "autoExpand", default)]
    pub auto_expand: bool,
    /// Lookup rules.
    #[serde(flatten)]
    pub selectors: SelectorSet,
}

fn default_word_budget() -> usize {
    250
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            word_budget: default_word_budget(),
            auto_expand: false,
            selectors: SelectorSet::default(),
        }
    }
}

impl RecapConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word budget.
    #[must_use]
    pub fn with_word_budget(mut self, word_budget: usize) -> Self {
        self.word_budget = word_budget;
        self
    }

    /// Replaces the selector set.
    #[must_use]
    pub fn with_selectors(mut self, selectors: SelectorSet) -> Self {
        self.selectors = selectors;
        self
    }

    /// Checks `word_budget > 0` and the selectors.
    pub fn validate(&self) -> Result<(), RecapError> {
        if self.word_budget == 0 {
            return Err(RecapError::InvalidConfig(
                "word budget must be greater than zero".to_string(),
            ));
        }
        self.selectors.validate()
    }

    /// Parses stored settings, filling missing keys with defaults.
    ///
    /// Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, RecapError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to the stored settings format.
    pub fn to_json(&self) -> Result<String, RecapError> {
        Ok(serde_json::to_string(self)?)
    }
}
