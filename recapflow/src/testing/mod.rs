//! Test-support kit for code built on recapflow.
//!
//! This module provides:
//! - A scripted fetcher that counts calls per URL
//! - A manually advanced clock for cache expiry tests
//! - Builders for chapter, current-page and overview HTML

mod clock;
mod fetcher;
mod fixtures;

pub use clock::ManualClock;
pub use fetcher::StaticFetcher;
pub use fixtures::{
    chapter_page, current_page, overview_page, paragraph_words, FICTION_URL, PAGE_URL,
    PREV_CHAPTER_URL,
};
