//! Server firewall rules

use super::wire;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallAction {
    Accept,
    Reject,
    Drop,
}

/// One firewall rule
///
/// Unset fields are left out of the request so the API applies its own
/// defaults; `position` decides where the rule is inserted. Text fields the
/// API returns as `""` read back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<u32>,

    pub direction: FirewallDirection,

    pub action: FirewallAction,

    /// `IPv4` or `IPv6`
    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub family: Option<String>,

    /// `tcp`, `udp` or `icmp`
    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub protocol: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub icmp_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_address_start: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_address_end: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_port_start: Option<u16>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_port_end: Option<u16>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_address_start: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_address_end: Option<String>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_port_start: Option<u16>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_port_end: Option<u16>,

    #[serde(
        default,
        deserialize_with = "wire::deserialize_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,
}

impl FirewallRule {
    pub fn new(direction: FirewallDirection, action: FirewallAction) -> Self {
        Self {
            position: None,
            direction,
            action,
            family: None,
            protocol: None,
            icmp_type: None,
            source_address_start: None,
            source_address_end: None,
            source_port_start: None,
            source_port_end: None,
            destination_address_start: None,
            destination_address_end: None,
            destination_port_start: None,
            destination_port_end: None,
            comment: None,
        }
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_source_ports(mut self, start: u16, end: u16) -> Self {
        self.source_port_start = Some(start);
        self.source_port_end = Some(end);
        self
    }

    pub fn with_destination_ports(mut self, start: u16, end: u16) -> Self {
        self.destination_port_start = Some(start);
        self.destination_port_end = Some(end);
        self
    }

    pub fn with_source_addresses(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.source_address_start = Some(start.into());
        self.source_address_end = Some(end.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
