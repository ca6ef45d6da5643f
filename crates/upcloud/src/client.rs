//! API client

use crate::config::ClientConfig;
use crate::error::{Result, UpCloudError};
use crate::transport::{HttpTransport, Transport};

/// UpCloud API client
///
/// Holds a [`Transport`] and exposes the resource operations as inherent
/// methods (see the `server` and `storage` modules). Every call awaits its
/// requests one at a time; nothing is cached between calls.
pub struct UpCloudClient<T = HttpTransport> {
    transport: T,
}

impl UpCloudClient<HttpTransport> {
    /// Create a client talking to the API over HTTPS
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Create a client from `UPCLOUD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> UpCloudClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Reject identifiers that aren't UUID-shaped before any request is sent
///
/// Only ASCII hex digits and `-` are accepted, so `..`, `?` or `#` can never
/// reshape the request path.
pub(crate) fn check_uuid(uuid: &str) -> Result<()> {
    if uuid.is_empty() {
        return Err(UpCloudError::Validation("UUID must not be empty".to_string()));
    }
    if !uuid.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Err(UpCloudError::Validation(format!("invalid UUID: {:?}", uuid)));
    }
    if !uuid.chars().any(|c| c.is_ascii_hexdigit()) {
        return Err(UpCloudError::Validation(format!("invalid UUID: {:?}", uuid)));
    }
    Ok(())
}
