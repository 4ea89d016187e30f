//! Settings snapshot with change notification.
//!
//! The store owns the current [`RecapConfig`]. Readers take a cloned snapshot
//! and pass it into each call; nothing reads settings from shared mutable
//! state. Every accepted change is published to subscribers.

use tokio::sync::watch;
use tracing::{debug, warn};

use super::selectors::{RecapConfig, SelectorSet};
use crate::errors::RecapError;

/// Holds the current settings and notifies subscribers of changes.
#[derive(Debug)]
pub struct SettingsStore {
    tx: watch::Sender<RecapConfig>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(RecapConfig::default());
        Self { tx }
    }
}

impl SettingsStore {
    /// Creates a store holding `initial`, which must validate.
    pub fn new(initial: RecapConfig) -> Result<Self, RecapError> {
        initial.validate()?;
        let (tx, _rx) = watch::channel(initial);
        Ok(Self { tx })
    }

    /// Returns a copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> RecapConfig {
        self.tx.borrow().clone()
    }

    /// Subscribes to future changes.
    #[must_use]
    pub fn subscribe(&self) -> SettingsSubscription {
        SettingsSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Replaces the settings. Invalid settings are rejected and nothing is
    /// published; identical settings are accepted without a notification.
    pub fn replace(&self, config: RecapConfig) -> Result<(), RecapError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejected settings update");
            return Err(e);
        }

        let changed = self.tx.send_if_modified(|current| {
            if *current == config {
                false
            } else {
                *current = config;
                true
            }
        });
        debug!(changed, "Settings replaced");
        Ok(())
    }

    /// Applies `edit` to a copy of the current settings and stores the
    /// result if it validates.
    pub fn update(&self, edit: impl FnOnce(&mut RecapConfig)) -> Result<(), RecapError> {
        let mut next = self.snapshot();
        edit(&mut next);
        self.replace(next)
    }

    /// Restores every setting to its default.
    pub fn restore_defaults(&self) {
        self.tx.send_replace(RecapConfig::default());
    }

    /// Restores only the selectors, keeping the word budget and UI flags.
    pub fn restore_selectors(&self) {
        self.tx.send_modify(|current| current.selectors = SelectorSet::default());
    }
}

/// Receives settings changes from a [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct SettingsSubscription {
    rx: watch::Receiver<RecapConfig>,
}

impl SettingsSubscription {
    /// Waits for the next change and returns the new settings, or `None`
    /// once the store has been dropped.
    pub async fn changed(&mut self) -> Option<RecapConfig> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Returns the latest published settings.
    #[must_use]
    pub fn current(&self) -> RecapConfig {
        self.rx.borrow().clone()
    }
}
