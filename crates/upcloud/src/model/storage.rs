//! Storage devices

use super::wire;
use crate::error::{Result, UpCloudError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default size of a storage device created without an explicit size (GB)
pub const DEFAULT_STORAGE_SIZE: u32 = 10;

/// Smallest storage the API accepts (GB)
///
/// The upper bound depends on the zone and account quota, so it is left to
/// the API to enforce.
pub const MIN_STORAGE_SIZE: u32 = 10;

/// Storage performance tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTier {
    #[default]
    Maxiops,
    Hdd,
    Standard,
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageTier::Maxiops => write!(f, "maxiops"),
            StorageTier::Hdd => write!(f, "hdd"),
            StorageTier::Standard => write!(f, "standard"),
        }
    }
}

impl FromStr for StorageTier {
    type Err = UpCloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "maxiops" => Ok(StorageTier::Maxiops),
            "hdd" => Ok(StorageTier::Hdd),
            "standard" => Ok(StorageTier::Standard),
            other => Err(UpCloudError::Validation(format!(
                "unknown storage tier: {} (expected maxiops, hdd or standard)",
                other
            ))),
        }
    }
}

/// A storage device as known to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    pub uuid: String,
    pub title: Option<String>,
    /// Size in GB
    pub size: Option<u32>,
    pub tier: Option<StorageTier>,
    /// `disk`/`cdrom` when attached to a server, `normal`/`backup`/`template`/`cdrom` on `/storage`
    pub storage_type: Option<String>,
    /// Bus address on the owning server, e.g. `virtio:0`
    pub address: Option<String>,
    pub zone: Option<String>,
    pub state: Option<String>,
}

/// A storage device to be created together with a server
///
/// Unset fields get defaults when the creation payload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageDraft {
    /// OS template to clone, marking this draft as the boot volume
    pub os: Option<String>,
    pub size: Option<u32>,
    pub tier: Option<StorageTier>,
    pub title: Option<String>,
}

impl StorageDraft {
    /// Boot volume cloned from the given OS template (title or UUID)
    pub fn boot(os: impl Into<String>) -> Self {
        Self {
            os: Some(os.into()),
            ..Default::default()
        }
    }

    /// Empty data volume
    pub fn data() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_tier(mut self, tier: StorageTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_boot_volume(&self) -> bool {
        self.os.is_some()
    }
}

/// Storage device entry inside a server detail response
#[derive(Debug, Deserialize)]
pub(crate) struct ApiStorageDevice {
    storage: String,
    #[serde(default)]
    storage_title: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_opt_u32")]
    storage_size: Option<u32>,
    #[serde(default)]
    storage_tier: Option<String>,
    #[serde(default, rename = "type")]
    storage_type: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiStorageDeviceList {
    #[serde(default)]
    pub storage_device: Vec<ApiStorageDevice>,
}

impl From<ApiStorageDevice> for Storage {
    fn from(d: ApiStorageDevice) -> Self {
        Self {
            uuid: d.storage,
            title: d.storage_title,
            size: d.storage_size,
            tier: d.storage_tier.as_deref().and_then(|t| t.parse().ok()),
            storage_type: d.storage_type,
            address: d.address,
            zone: None,
            state: None,
        }
    }
}

/// Entry of `/storage` and `/storage/{uuid}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiStorage {
    uuid: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "wire::deserialize_opt_u32")]
    size: Option<u32>,
    #[serde(default)]
    tier: Option<String>,
    #[serde(default, rename = "type")]
    storage_type: Option<String>,
    #[serde(default)]
    zone: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

impl From<ApiStorage> for Storage {
    fn from(s: ApiStorage) -> Self {
        Self {
            uuid: s.uuid,
            title: s.title,
            size: s.size,
            tier: s.tier.as_deref().and_then(|t| t.parse().ok()),
            storage_type: s.storage_type,
            address: None,
            zone: s.zone,
            state: s.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_round_trip_strings() {
        assert_eq!("hdd".parse::<StorageTier>().unwrap(), StorageTier::Hdd);
        assert_eq!(StorageTier::default().to_string(), "maxiops");
        assert!("ssd".parse::<StorageTier>().unwrap_err().is_validation());
    }

    #[test]
    fn test_storage_device_from_server_detail() {
        let device: ApiStorageDevice = serde_json::from_value(json!({
            "address": "virtio:0",
            "part_of_plan": "",
            "storage": "01d4fcd4-e446-433b-8a9c-551a1284952e",
            "storage_size": "10",
            "storage_title": "web-1 OS disk",
            "type": "disk",
            "boot_disk": "0"
        }))
        .unwrap();

        let storage = Storage::from(device);
        assert_eq!(storage.uuid, "01d4fcd4-e446-433b-8a9c-551a1284952e");
        assert_eq!(storage.size, Some(10));
        assert_eq!(storage.title.as_deref(), Some("web-1 OS disk"));
        assert_eq!(storage.address.as_deref(), Some("virtio:0"));
        assert_eq!(storage.tier, None);
    }

    #[test]
    fn test_storage_from_listing_ignores_unknown_tier() {
        let storage: ApiStorage = serde_json::from_value(json!({
            "access": "private",
            "size": 50,
            "state": "online",
            "tier": "archive",
            "title": "backup volume",
            "type": "normal",
            "uuid": "0117a0a5-ba48-4c4e-ac14-1d24c2f5c64a",
            "zone": "fi-hel1"
        }))
        .unwrap();

        let storage = Storage::from(storage);
        assert_eq!(storage.size, Some(50));
        assert_eq!(storage.tier, None);
        assert_eq!(storage.zone.as_deref(), Some("fi-hel1"));
        assert_eq!(storage.state.as_deref(), Some("online"));
    }

    #[test]
    fn test_draft_builders() {
        let boot = StorageDraft::boot("Ubuntu Server 24.04 LTS (Noble Numbat)")
            .with_size(25)
            .with_tier(StorageTier::Standard);
        assert!(boot.is_boot_volume());
        assert_eq!(boot.size, Some(25));

        let data = StorageDraft::data().with_title("scratch");
        assert!(!data.is_boot_volume());
        assert_eq!(data.title.as_deref(), Some("scratch"));
    }
}
