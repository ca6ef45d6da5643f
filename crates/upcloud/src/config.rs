//! Client configuration

use crate::error::{Result, UpCloudError};
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.upcloud.com/1.3";

const DEFAULT_USER_AGENT: &str = concat!("upcloud-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the UpCloud API
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            username: username.into(),
            password: password.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create ClientConfig from environment variables
    ///
    /// `UPCLOUD_USERNAME` and `UPCLOUD_PASSWORD` are required,
    /// `UPCLOUD_API_URL` overrides the default endpoint.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("UPCLOUD_USERNAME")
            .map_err(|_| UpCloudError::MissingEnvVar("UPCLOUD_USERNAME".to_string()))?;
        let password = std::env::var("UPCLOUD_PASSWORD")
            .map_err(|_| UpCloudError::MissingEnvVar("UPCLOUD_PASSWORD".to_string()))?;

        let config = Self::new(username, password);
        match std::env::var("UPCLOUD_API_URL") {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => Ok(config),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(UpCloudError::InvalidConfig(format!(
                "base URL must start with http:// or https://: {}",
                base_url
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL for an API path such as `/server/{uuid}`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
