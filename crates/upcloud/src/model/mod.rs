//! Local mirrors of UpCloud resources

pub mod firewall;
pub mod ip_address;
pub mod server;
pub mod storage;
mod wire;

pub use firewall::{FirewallAction, FirewallDirection, FirewallRule};
pub use ip_address::IpAddress;
pub use server::{Server, ServerDraft, ServerUpdate, UPDATEABLE_FIELDS};
pub use storage::{
    DEFAULT_STORAGE_SIZE, MIN_STORAGE_SIZE, Storage, StorageDraft, StorageTier,
};
