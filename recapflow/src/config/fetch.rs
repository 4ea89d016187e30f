//! Settings for the HTTP fetcher.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::errors::RecapError;

/// How pages are requested.
///
/// Missing keys take their defaults when deserialized. Requests are never
/// retried; the reader asks again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout, in seconds. Must be finite and positive.
    pub timeout_secs: f64,
    /// Redirect hops followed before giving up.
    pub redirect_limit: usize,
    pub user_agent: String,
    /// Largest accepted body, in bytes.
    pub body_limit: usize,
    /// Sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30.0,
            redirect_limit: 10,
            user_agent: concat!("recapflow/", env!("CARGO_PKG_VERSION")).to_string(),
            body_limit: 10 * 1024 * 1024,
            headers: BTreeMap::new(),
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The timeout as a [`Duration`].
    ///
    /// Fails with `InvalidConfig` for zero, negative, NaN or out-of-range
    /// values.
    pub fn timeout(&self) -> Result<Duration, RecapError> {
        let timeout = Duration::try_from_secs_f64(self.timeout_secs).map_err(|e| {
            RecapError::InvalidConfig(format!("timeout_secs {}: {e}", self.timeout_secs))
        })?;
        if timeout.is_zero() {
            return Err(RecapError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(timeout)
    }

    /// Checks the timeout and the body limit.
    pub fn validate(&self) -> Result<(), RecapError> {
        self.timeout()?;
        if self.body_limit == 0 {
            return Err(RecapError::InvalidConfig(
                "body_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.redirect_limit, 10);
        assert!(config.user_agent.starts_with("recapflow/"));
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(30));
        config.validate().unwrap();
    }

    #[test]
    fn test_builders() {
        let config = FetchConfig::new()
            .with_timeout(0.5)
            .with_user_agent("custom-agent")
            .with_body_limit(1024)
            .with_header("Accept-Language", "en-US");

        assert_eq!(config.timeout().unwrap(), Duration::from_millis(500));
        assert_eq!(config.user_agent, "custom-agent");
        assert_eq!(config.body_limit, 1024);
        assert_eq!(config.headers["Accept-Language"], "en-US");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: FetchConfig = serde_json::from_str(r#"{"timeout_secs": 2.5}"#).unwrap();
        assert_eq!(config.timeout().unwrap(), Duration::from_millis(2500));
        assert_eq!(config.redirect_limit, 10);
        assert_eq!(config.body_limit, 10 * 1024 * 1024);
    }

    #[test]
    fn test_unusable_timeouts_are_errors() {
        for seconds in [-1.0, 0.0, f64::NAN, f64::INFINITY, 1e30] {
            let config = FetchConfig::new().with_timeout(seconds);
            assert!(
                matches!(config.timeout(), Err(RecapError::InvalidConfig(_))),
                "{seconds} accepted"
            );
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_negative_timeout_from_json_is_error() {
        let config: FetchConfig = serde_json::from_str(r#"{"timeout_secs": -1.0}"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_zero_body_limit_rejected() {
        let err = FetchConfig::new().with_body_limit(0).validate().unwrap_err();
        assert!(matches!(err, RecapError::InvalidConfig(_)));
    }
}
