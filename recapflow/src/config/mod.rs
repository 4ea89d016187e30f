//! Settings for extraction and fetching.
//!
//! This module provides:
//! - The selector set and word budget passed into every extraction call
//! - HTTP fetch configuration
//! - A settings store that publishes changes to subscribers

mod fetch;
mod selectors;
mod store;

pub use fetch::FetchConfig;
pub use selectors::{RecapConfig, SelectorSet, PARAGRAPH_SELECTOR};
pub use store::{SettingsStore, SettingsSubscription};
