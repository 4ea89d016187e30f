//! # Recapflow
//!
//! Word-bounded excerpts of web-novel pages: a recap of the previous
//! chapter's ending, or a story's blurb, built from HTML fetched in the
//! background while the reader stays on the current chapter.
//!
//! - **Structural truncation**: keep the last N words of a chapter body while
//!   preserving its markup
//! - **TTL cache**: one fetch per chapter serves any number of budget changes
//! - **Settings-driven refresh**: a changed word budget rebuilds the shown
//!   recap from the cache, without touching the network
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use recapflow::prelude::*;
//! use std::sync::Arc;
//!
//! let page = HtmlPage::new(current_html).with_url(current_url)?;
//! let manager = ContentManager::new(Arc::new(HttpFetcher::with_defaults()?), Arc::new(page));
//!
//! let store = SettingsStore::default();
//! let excerpt = manager.fetch_recap(&store.snapshot()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cache;
pub mod config;
pub mod dom;
pub mod errors;
pub mod fetch;
pub mod manager;
pub mod observability;
pub mod processor;
pub mod sanitize;
pub mod testing;
pub mod truncate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::{Clock, ContentCache, SystemClock, CACHE_TTL};
    pub use crate::config::{FetchConfig, RecapConfig, SelectorSet, SettingsStore};
    pub use crate::errors::{ErrorKind, FetchError, RecapError};
    #[cfg(feature = "http")]
    pub use crate::fetch::HttpFetcher;
    pub use crate::fetch::Fetcher;
    pub use crate::manager::{
        spawn_settings_refresh, ContentManager, Excerpt, ExcerptKind, ExcerptResponse, RecapView,
    };
    pub use crate::observability::{init_tracing, TracingOptions};
    pub use crate::processor::{ContentProcessor, CurrentPage, HtmlPage};
    pub use crate::sanitize::{AllowListSanitizer, Sanitizer};
    pub use crate::truncate::{truncate_body, ELLIPSIS};
}
