//! UpCloud API client
//!
//! This crate maps the UpCloud REST API onto local Rust types,
//! covering servers, their storage devices and IP addresses, and
//! per-server firewall rules.
//!
//! # Features
//!
//! - Server management (list, get, create, modify, delete)
//! - Storage listing
//! - Firewall rule configuration
//!
//! # Requirements
//!
//! - API credentials: `UPCLOUD_USERNAME`, `UPCLOUD_PASSWORD` env vars
//!   (optionally `UPCLOUD_API_URL` to point at another endpoint)
//!
//! # Example
//!
//! ```ignore
//! use upcloud::{ServerDraft, StorageDraft, UpCloudClient};
//!
//! let client = UpCloudClient::from_env()?;
//!
//! let draft = ServerDraft::new("web-1.example.com", "fi-hel1")
//!     .with_core_number(1)
//!     .with_memory_amount(1024)
//!     .with_storage(StorageDraft::boot("Ubuntu Server 24.04 LTS (Noble Numbat)"))
//!     .with_storage(StorageDraft::data().with_size(50));
//!
//! let server = client.create_server(&draft).await?;
//! println!("created {} ({})", server.hostname, server.uuid);
//!
//! // Stubs only: one request
//! let servers = client.list_servers(false).await?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              UpCloudClient<T>            │
//! │   server ops  │  storage ops  │ firewall │
//! └───────┬──────────────────────────────────┘
//!         │ envelope unwrap / payload build
//! ┌───────▼──────────────────────────────────┐
//! │          trait Transport                 │
//! │   get / post / put / delete -> JSON      │
//! └───────┬──────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │ HttpTransport │  reqwest + Basic auth
//! └───────────────┘
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod server;
pub mod storage;
pub mod transport;

// Re-exports
pub use client::UpCloudClient;
pub use config::ClientConfig;
pub use error::{Result, UpCloudError};
pub use model::{
    FirewallAction, FirewallDirection, FirewallRule, IpAddress, Server, ServerDraft,
    ServerUpdate, Storage, StorageDraft, StorageTier,
};
pub use transport::{HttpTransport, Transport};
