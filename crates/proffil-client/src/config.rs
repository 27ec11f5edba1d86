//! Configuration for the HTTP profile source.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where profiles are fetched from, and how long a request may take.
///
/// All fields have defaults, so a partial TOML file (or none at all) is fine:
///
/// ```
/// use proffil_client::SourceConfig;
///
/// let config: SourceConfig = toml::from_str("timeout_secs = 3").unwrap();
/// assert_eq!(config.timeout_secs, 3);
/// assert_eq!(config.base_url, SourceConfig::default().base_url);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the profile endpoint. `/users/{id}` is appended per fetch.
    pub base_url: String,

    /// Whole-request timeout, in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            timeout_secs: 10,
            user_agent: concat!("proffil/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SourceConfig {
    /// Sets the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
