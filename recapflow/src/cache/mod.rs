//! URL-keyed cache of fetched chapter HTML.
//!
//! Only raw source HTML is cached. Truncation always recomputes, so a change
//! of word budget reuses the cached page without another fetch.
//!
//! Entries expire a fixed time after they were stored. Expired entries are
//! evicted lazily, on the next lookup of the same URL; there is no sweeper
//! and no capacity bound.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How long a fetched page stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Source of the current time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The exact URL the page was fetched from.
    pub url: String,
    /// Raw HTML body.
    pub html: String,
    /// When the page was stored.
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Returns true while `now - fetched_at < ttl`.
    ///
    /// A `fetched_at` in the future (clock moved backwards) counts as fresh.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        (now - self.fetched_at).to_std().map_or(true, |age| age < ttl)
    }
}

/// In-memory TTL cache of page HTML keyed by URL.
#[derive(Debug)]
pub struct ContentCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache {
    /// Creates an empty cache with the default TTL and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: CACHE_TTL,
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the time-to-live.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the clock used for timestamps and expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the configured time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached HTML for `url` if present and fresh.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&self, url: &str) -> Option<String> {
        self.read_fresh(url, |entry| entry.html.clone())
    }

    /// Runs `f` on the entry for `url` under the lock if it is fresh,
    /// evicting it if it has expired.
    fn read_fresh<R>(&self, url: &str, f: impl FnOnce(&CacheEntry) -> R) -> Option<R> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let entry = entries.get(url)?;
        if entry.is_fresh(now, self.ttl) {
            debug!(url = %url, "Cache hit");
            return Some(f(entry));
        }

        debug!(url = %url, fetched_at = %entry.fetched_at, "Evicting expired cache entry");
        entries.remove(url);
        None
    }

    /// Stores `html` for `url`, replacing any previous entry.
    pub fn set(&self, url: &str, html: impl Into<String>) {
        let entry = CacheEntry {
            url: url.to_string(),
            html: html.into(),
            fetched_at: self.clock.now(),
        };
        debug!(url = %url, bytes = entry.html.len(), "Caching page");
        self.entries.lock().insert(url.to_string(), entry);
    }

    /// Returns true if a fresh entry exists. Evicts an expired one.
    pub fn has(&self, url: &str) -> bool {
        self.read_fresh(url, |_| ()).is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
