//! HTTP-backed profile source.

use async_trait::async_trait;

use proffil_core::{Error, Profile, ProfileSource, Result, UserId};

use crate::config::SourceConfig;

/// Fetches profile records over HTTP.
///
/// One `GET {base_url}/users/{id}` per fetch, no authentication, no retries.
/// The client is built once with the configured timeout and user agent.
/// Cancellation rides on future drop: when the watcher abandons a fetch, the
/// dropped future aborts the underlying request.
pub struct HttpSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl HttpSource {
    /// Creates a source from the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("could not build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Creates a source with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(SourceConfig::default())
    }

    fn user_url(&self, user: UserId) -> String {
        format!("{}/users/{user}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProfileSource for HttpSource {
    async fn fetch(&self, user: UserId) -> Result<Profile> {
        let url = self.user_url(user);
        tracing::debug!(%user, url = %url, "requesting profile");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport_with_source(format!("GET {url} failed"), e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound { user });
        }
        if !status.is_success() {
            return Err(Error::Status {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport_with_source("reading response body failed", e))?;

        let profile: Profile = serde_json::from_str(&body)?;

        tracing::debug!(%user, name = %profile.name, "profile received");
        Ok(profile)
    }
}
