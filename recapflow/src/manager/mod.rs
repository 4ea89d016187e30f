//! Fetch, cache and process orchestration.
//!
//! This module provides:
//! - [`ContentManager`], the entry points the UI calls
//! - Excerpt values and their wire form
//! - Display state for the recap panel
//! - A task that rebuilds the displayed recap when settings change
//!
//! Only previous-chapter HTML is cached. Blurbs do not depend on the word
//! budget and are always fetched.

mod excerpt;
mod refresh;
mod view;

pub use excerpt::{Excerpt, ExcerptKind, ExcerptResponse};
pub use refresh::spawn_settings_refresh;
pub use view::{RecapView, ViewState, Visibility};

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::ContentCache;
use crate::config::RecapConfig;
use crate::errors::RecapError;
use crate::fetch::Fetcher;
use crate::processor::{ContentProcessor, CurrentPage};
use crate::sanitize::{AllowListSanitizer, Sanitizer};

/// Orchestrates the current page, fetcher, cache, processor and sanitizer.
///
/// Every call takes the settings snapshot to use; the manager holds no
/// settings of its own.
pub struct ContentManager {
    fetcher: Arc<dyn Fetcher>,
    page: Arc<dyn CurrentPage>,
    cache: Arc<ContentCache>,
    sanitizer: Arc<dyn Sanitizer>,
    processor: ContentProcessor,
}

impl std::fmt::Debug for ContentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentManager")
            .field("cache", &self.cache)
            .field("sanitizer", &self.sanitizer)
            .finish_non_exhaustive()
    }
}

impl ContentManager {
    /// Creates a manager with an empty cache and the default sanitizer.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, page: Arc<dyn CurrentPage>) -> Self {
        Self {
            fetcher,
            page,
            cache: Arc::new(ContentCache::new()),
            sanitizer: Arc::new(AllowListSanitizer::new()),
            processor: ContentProcessor::new(),
        }
    }

    /// Uses `cache` instead of a private one.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ContentCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Uses `sanitizer` for every returned fragment.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Returns the page cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Resolves the previous chapter's absolute URL from the current page.
    pub fn previous_chapter_url(&self, config: &RecapConfig) -> Result<String, RecapError> {
        let selector = &config.selectors.prev_chapter_link;
        self.page
            .enclosing_href_of(selector)?
            .ok_or_else(|| RecapError::MissingLink {
                what: "previous chapter",
                selector: selector.clone(),
            })
    }

    /// Resolves the story overview's absolute URL from the fiction title's
    /// enclosing link.
    pub fn fiction_overview_url(&self, config: &RecapConfig) -> Result<String, RecapError> {
        let selector = &config.selectors.fiction_title;
        self.page
            .enclosing_href_of(selector)?
            .ok_or_else(|| RecapError::MissingLink {
                what: "story overview",
                selector: selector.clone(),
            })
    }

    /// Builds the recap of the previous chapter, fetching it only on a cache
    /// miss.
    pub async fn fetch_recap(&self, config: &RecapConfig) -> Result<Excerpt, RecapError> {
        let url = self.previous_chapter_url(config)?;

        let html = if let Some(html) = self.cache.get(&url) {
            debug!(url = %url, cache_hit = true, "Using cached chapter");
            html
        } else {
            info!(url = %url, cache_hit = false, "Fetching previous chapter");
            let html = self.fetcher.fetch(&url).await.map_err(|source| {
                warn!(url = %url, error = %source, "Previous chapter fetch failed");
                RecapError::Fetch {
                    target: "previous chapter",
                    source,
                }
            })?;
            self.cache.set(&url, html.clone());
            html
        };

        self.build_recap(&html, config)
    }

    /// Builds the blurb from a fresh fetch of the story overview.
    pub async fn fetch_blurb(&self, config: &RecapConfig) -> Result<Excerpt, RecapError> {
        let url = self.fiction_overview_url(config)?;
        info!(url = %url, "Fetching story overview");

        let html = self.fetcher.fetch(&url).await.map_err(|source| {
            warn!(url = %url, error = %source, "Story overview fetch failed");
            RecapError::Fetch {
                target: "story overview",
                source,
            }
        })?;

        let markup = self.processor.create_blurb(&html, self.page.as_ref(), config)?;
        Ok(Excerpt::blurb(self.sanitizer.sanitize(&markup)))
    }

    /// Rebuilds the recap from cached HTML only. Never fetches and never
    /// changes the cache.
    pub fn refresh_recap_from_cache(&self, config: &RecapConfig) -> Result<Excerpt, RecapError> {
        let url = self.previous_chapter_url(config)?;
        let html = self
            .cache
            .get(&url)
            .ok_or_else(|| RecapError::NoCachedContent { url: url.clone() })?;
        debug!(url = %url, word_budget = config.word_budget, "Refreshing recap from cache");
        self.build_recap(&html, config)
    }

    /// Whether the previous chapter is cached. False if its URL cannot be
    /// resolved.
    #[must_use]
    pub fn has_recap_in_cache(&self, config: &RecapConfig) -> bool {
        self.previous_chapter_url(config)
            .is_ok_and(|url| self.cache.has(&url))
    }

    /// Drops every cached page.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn build_recap(&self, html: &str, config: &RecapConfig) -> Result<Excerpt, RecapError> {
        let markup = self.processor.create_recap(html, self.page.as_ref(), config)?;
        Ok(Excerpt::recap(self.sanitizer.sanitize(&markup)))
    }
}
