//! HTTP request executor
//!
//! The resource mapper only ever talks to a [`Transport`]: four verbs that
//! take an API path and return the parsed JSON body. [`HttpTransport`] is
//! the reqwest-backed implementation used against the real API; tests swap
//! in their own.

use crate::config::ClientConfig;
use crate::error::{Result, UpCloudError};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::ACCEPT;
use serde_json::Value;

/// Request executor abstraction
///
/// Implementations attach authentication, map non-2xx responses to
/// [`UpCloudError::NotFound`] / [`UpCloudError::Api`], and return
/// `Value::Null` for empty bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<Value>;
}

/// reqwest-backed transport with HTTP Basic authentication
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.config.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = UpCloudError::from_response(status.as_u16(), &bytes, path);
            tracing::warn!("{} {} failed: {}", method, path, err);
            return Err(err);
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, None).await
    }
}
