//! Client configuration

use super::ClientError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the TinyYummy backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds; unset means requests run to completion
    pub timeout_secs: Option<u64>,

    /// Delay between an unrecoverable auth failure and the redirect to login
    pub redirect_delay_ms: u64,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: None,
            redirect_delay_ms: 1500,
            user_agent: concat!("tinyyummy-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Check that the settings can be used to build a client
    pub fn validate(&self) -> Result<(), ClientError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            ClientError::Configuration(format!("base_url {:?} is not a URL: {e}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "base_url must use http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(ClientError::Configuration(
                "timeout_secs must be positive when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), None);
        assert_eq!(config.redirect_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            ClientConfig::new("not a url").validate(),
            Err(ClientError::Configuration(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://shop.example").validate(),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "https://tinyyummy.vn/api"}"#).unwrap();
        assert_eq!(config.base_url, "https://tinyyummy.vn/api");
        assert_eq!(config.redirect_delay_ms, 1500);
    }
}
