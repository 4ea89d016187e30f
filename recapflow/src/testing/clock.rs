//! Advanceable clock.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;

use crate::cache::Clock;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Creates a clock frozen at the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a clock frozen at `time`.
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(time),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let delta = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        *self.now.lock() += delta;
    }

    /// Sets the clock to `time`, which may be in the past.
    pub fn set(&self, time: DateTime<Utc>) {
        *self.now.lock() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_secs(90));
        assert_eq!((clock.now() - start).num_seconds(), 90);
    }

    #[test]
    fn test_set_backwards() {
        let clock = ManualClock::new();
        let earlier = clock.now() - chrono::Duration::hours(1);
        clock.set(earlier);
        assert_eq!(clock.now(), earlier);
    }
}
