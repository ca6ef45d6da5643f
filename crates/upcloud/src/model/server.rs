//! Servers, server drafts and server modifications

use super::ip_address::{ApiIpAddressList, IpAddress};
use super::storage::{
    ApiStorageDeviceList, DEFAULT_STORAGE_SIZE, MIN_STORAGE_SIZE, Storage, StorageDraft,
    StorageTier,
};
use super::wire;
use crate::envelope;
use crate::error::{Result, UpCloudError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields `PUT /server/{uuid}` may change
pub const UPDATEABLE_FIELDS: &[&str] = &[
    "boot_order",
    "core_number",
    "firewall",
    "hostname",
    "memory_amount",
    "nic_model",
    "title",
    "timezone",
    "video_model",
    "vnc",
    "vnc_password",
];

/// A server as known to the API
///
/// Servers from [`list_servers`](crate::UpCloudClient::list_servers) are
/// stubs: `populated` is false and the storage/IP lists are empty until the
/// server is hydrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub uuid: String,
    pub hostname: String,
    pub title: Option<String>,
    pub zone: Option<String>,
    pub core_number: Option<u32>,
    /// Memory in MB
    pub memory_amount: Option<u32>,
    /// `started`, `stopped`, `maintenance` or `error`
    pub state: Option<String>,
    pub plan: Option<String>,
    pub ip_addresses: Vec<IpAddress>,
    pub storage_devices: Vec<Storage>,
    pub populated: bool,
}

impl Server {
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn is_started(&self) -> bool {
        self.state.as_deref() == Some("started")
    }

    /// First public IPv4 address, if any
    pub fn public_ipv4(&self) -> Option<&str> {
        self.ip_addresses
            .iter()
            .find(|ip| ip.is_public() && !ip.is_ipv6())
            .map(|ip| ip.address.as_str())
    }
}

/// Server object as returned under the `server` / `servers.server` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ApiServer {
    uuid: String,
    hostname: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    zone: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_opt_number")]
    core_number: Option<u32>,
    #[serde(default, deserialize_with = "wire::deserialize_opt_number")]
    memory_amount: Option<u32>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    ip_addresses: Option<ApiIpAddressList>,
    #[serde(default)]
    storage_devices: Option<ApiStorageDeviceList>,
}

impl ApiServer {
    pub(crate) fn into_server(self, populated: bool) -> Server {
        let ip_addresses = self.ip_addresses.unwrap_or_default().ip_address;
        let storage_devices = self
            .storage_devices
            .unwrap_or_default()
            .storage_device
            .into_iter()
            .map(Storage::from)
            .collect();

        Server {
            uuid: self.uuid,
            hostname: self.hostname,
            title: self.title,
            zone: self.zone,
            core_number: self.core_number,
            memory_amount: self.memory_amount,
            state: self.state,
            plan: self.plan,
            ip_addresses,
            storage_devices,
            populated,
        }
    }
}

/// A server to be created
///
/// Exactly one storage draft must carry an OS image (the boot volume).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDraft {
    pub hostname: String,
    pub zone: String,
    /// Defaults to the hostname
    pub title: Option<String>,
    pub core_number: Option<u32>,
    /// Memory in MB
    pub memory_amount: Option<u32>,
    pub storage_devices: Vec<StorageDraft>,
}

impl ServerDraft {
    pub fn new(hostname: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            zone: zone.into(),
            title: None,
            core_number: None,
            memory_amount: None,
            storage_devices: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_core_number(mut self, core_number: u32) -> Self {
        self.core_number = Some(core_number);
        self
    }

    pub fn with_memory_amount(mut self, memory_amount: u32) -> Self {
        self.memory_amount = Some(memory_amount);
        self
    }

    pub fn with_storage(mut self, storage: StorageDraft) -> Self {
        self.storage_devices.push(storage);
        self
    }

    /// Check the draft without touching the network
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(UpCloudError::Validation(
                "server hostname must not be empty".to_string(),
            ));
        }
        if self.zone.trim().is_empty() {
            return Err(UpCloudError::Validation(
                "server zone must not be empty".to_string(),
            ));
        }

        let boot_volumes = self
            .storage_devices
            .iter()
            .filter(|s| s.is_boot_volume())
            .count();
        match boot_volumes {
            0 => {
                return Err(UpCloudError::Validation(
                    "one storage device must specify an OS image (boot volume)".to_string(),
                ));
            }
            1 => {}
            n => {
                return Err(UpCloudError::Validation(format!(
                    "only one storage device may specify an OS image, found {}",
                    n
                )));
            }
        }

        for storage in &self.storage_devices {
            if storage.os.as_deref().is_some_and(|os| os.trim().is_empty()) {
                return Err(UpCloudError::Validation(
                    "OS image of the boot volume must not be empty".to_string(),
                ));
            }
            match storage.size {
                Some(size) if size < MIN_STORAGE_SIZE => {
                    return Err(UpCloudError::Validation(format!(
                        "storage size {} GB is below the minimum of {} GB",
                        size, MIN_STORAGE_SIZE
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Build the `POST /server` body, filling storage defaults
    ///
    /// - size: 10 GB
    /// - tier: maxiops
    /// - title: `"{hostname} OS disk"` for the boot volume,
    ///   `"{hostname} storage disk {n}"` for data volumes (n counts from 1)
    pub fn to_create_body(&self) -> Result<Value> {
        self.validate()?;

        let mut data_volume_index = 0;
        let storage_device = self
            .storage_devices
            .iter()
            .map(|storage| {
                let position = if storage.is_boot_volume() {
                    None
                } else {
                    data_volume_index += 1;
                    Some(data_volume_index)
                };
                let title = match (&storage.title, position) {
                    (Some(title), _) if !title.trim().is_empty() => title.clone(),
                    (_, None) => format!("{} OS disk", self.hostname),
                    (_, Some(n)) => format!("{} storage disk {}", self.hostname, n),
                };

                CreateStorageDevice {
                    action: if storage.os.is_some() { "clone" } else { "create" },
                    storage: storage.os.clone(),
                    size: storage.size.unwrap_or(DEFAULT_STORAGE_SIZE),
                    tier: storage.tier.unwrap_or_default(),
                    title,
                }
            })
            .collect();

        let request = CreateServerRequest {
            hostname: &self.hostname,
            title: self.title.as_deref().unwrap_or(&self.hostname),
            zone: &self.zone,
            core_number: self.core_number,
            memory_amount: self.memory_amount,
            storage_devices: CreateStorageDeviceList { storage_device },
        };

        envelope::wrap("server", &request)
    }
}

#[derive(Debug, Serialize)]
struct CreateServerRequest<'a> {
    hostname: &'a str,
    title: &'a str,
    zone: &'a str,
    #[serde(
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    core_number: Option<u32>,
    #[serde(
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    memory_amount: Option<u32>,
    storage_devices: CreateStorageDeviceList,
}

#[derive(Debug, Serialize)]
struct CreateStorageDeviceList {
    storage_device: Vec<CreateStorageDevice>,
}

#[derive(Debug, Serialize)]
struct CreateStorageDevice {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage: Option<String>,
    size: u32,
    tier: StorageTier,
    title: String,
}

/// Changes for `PUT /server/{uuid}`
///
/// Only updateable fields exist here. IP addresses and storages are managed
/// through their own endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_order: Option<String>,

    #[serde(
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub core_number: Option<u32>,

    /// `on` or `off`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(
        deserialize_with = "wire::deserialize_opt_number",
        serialize_with = "wire::serialize_opt_number_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory_amount: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nic_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_model: Option<String>,

    /// `on` or `off`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnc_password: Option<String>,
}

impl ServerUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an update from loosely typed `field -> value` pairs
    ///
    /// Any key outside [`UPDATEABLE_FIELDS`] is a validation error.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        if let Some(field) = fields
            .keys()
            .find(|k| !UPDATEABLE_FIELDS.contains(&k.as_str()))
        {
            return Err(UpCloudError::Validation(format!(
                "{} is not an updateable field (allowed: {})",
                field,
                UPDATEABLE_FIELDS.join(", ")
            )));
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| UpCloudError::Validation(format!("invalid server update: {}", e)))
    }

    pub fn with_core_number(mut self, core_number: u32) -> Self {
        self.core_number = Some(core_number);
        self
    }

    pub fn with_memory_amount(mut self, memory_amount: u32) -> Self {
        self.memory_amount = Some(memory_amount);
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_firewall(mut self, enabled: bool) -> Self {
        self.firewall = Some(if enabled { "on" } else { "off" }.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn to_body(&self) -> Result<Value> {
        envelope::wrap("server", self)
    }
}
