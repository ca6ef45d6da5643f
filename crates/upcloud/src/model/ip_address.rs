//! IP addresses attached to a server

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddress {
    pub address: String,
    /// `public`, `private` or `utility`
    pub access: String,
    /// `IPv4` or `IPv6`
    #[serde(default)]
    pub family: Option<String>,
}

impl IpAddress {
    pub fn is_public(&self) -> bool {
        self.access == "public"
    }

    pub fn is_ipv6(&self) -> bool {
        self.family.as_deref() == Some("IPv6")
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiIpAddressList {
    #[serde(default)]
    pub ip_address: Vec<IpAddress>,
}
