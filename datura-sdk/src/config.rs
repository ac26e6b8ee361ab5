//! Client configuration: API key plus optional host/timeout overrides.
//!
//! The environment path reads `DATURA_API_KEY` only; everything else is set
//! through the builder methods. Nothing here touches global state.

use std::time::Duration;

use datura_common::{DaturaError, Result};

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const API_KEY_ENV: &str = "DATURA_API_KEY";

/// Construction-time settings for [`crate::Datura`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key placed in the `Authorization` header of every request.
    pub api_key: String,
    /// Alternative host, mainly for tests against a mock server.
    pub base_url: Option<String>,
    /// Override for the default 120-second request timeout.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a config from `DATURA_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| DaturaError::Config(format!("{API_KEY_ENV} is not set")))?;
        if api_key.trim().is_empty() {
            return Err(DaturaError::Config(format!("{API_KEY_ENV} is empty")));
        }
        Ok(Self::new(api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_reads_the_key() {
        temp_env::with_var(API_KEY_ENV, Some("dt-env-key"), || {
            let config = ClientConfig::from_env().expect("config from env");
            assert_eq!(config.api_key, "dt-env-key");
            assert!(config.base_url.is_none());
        });
    }

    #[test]
    #[serial]
    fn from_env_rejects_missing_or_empty_key() {
        temp_env::with_var_unset(API_KEY_ENV, || {
            assert!(matches!(
                ClientConfig::from_env(),
                Err(DaturaError::Config(_))
            ));
        });
        temp_env::with_var(API_KEY_ENV, Some("  "), || {
            assert!(matches!(
                ClientConfig::from_env(),
                Err(DaturaError::Config(_))
            ));
        });
    }

    #[test]
    fn builder_overrides_accumulate() {
        let config = ClientConfig::new("dt-key")
            .with_base_url("http://127.0.0.1:9999")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
