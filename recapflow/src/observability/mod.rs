//! Log output setup.
//!
//! Library code only emits `tracing` events. Applications embedding the
//! crate call [`init_tracing`] once to see them.

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Options for [`init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingOptions {
    /// Filter directives used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit one JSON object per event instead of text lines.
    #[serde(default)]
    pub json: bool,
    /// Include the event target (module path).
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_filter() -> String {
    "recapflow=info".to_string()
}

fn default_with_target() -> bool {
    true
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            with_target: default_with_target(),
        }
    }
}

impl TracingOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Switches to JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Installs a global `fmt` subscriber.
///
/// Returns false, and changes nothing, if a global subscriber is already set.
pub fn init_tracing(options: &TracingOptions) -> bool {
    let text = (!options.json).then(|| fmt::layer().with_target(options.with_target));
    let json = options
        .json
        .then(|| fmt::layer().json().with_target(options.with_target));

    tracing_subscriber::registry()
        .with(options.env_filter())
        .with(text)
        .with(json)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TracingOptions::default();
        assert_eq!(options.filter, "recapflow=info");
        assert!(!options.json);
    }

    #[test]
    fn test_partial_json() {
        let options: TracingOptions = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(options.json);
        assert_eq!(options.filter, "recapflow=info");
        assert!(options.with_target);
    }

    #[test]
    fn test_second_init_is_noop() {
        let options = TracingOptions::new().with_filter("recapflow=debug");
        let _ = init_tracing(&options);
        assert!(!init_tracing(&options.with_json(true)));
    }
}
