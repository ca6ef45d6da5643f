//! Storage operations

use crate::client::{UpCloudClient, check_uuid};
use crate::envelope;
use crate::error::Result;
use crate::model::Storage;
use crate::model::storage::ApiStorage;
use crate::transport::Transport;

impl<T: Transport> UpCloudClient<T> {
    /// List all storages of the account, attached or not
    pub async fn list_storages(&self) -> Result<Vec<Storage>> {
        let response = self.transport().get("/storage").await?;
        let storages: Vec<ApiStorage> = envelope::unwrap_list(response, "storages", "storage")?;
        tracing::debug!("Listed {} storages", storages.len());

        Ok(storages.into_iter().map(Storage::from).collect())
    }

    pub async fn get_storage(&self, uuid: &str) -> Result<Storage> {
        check_uuid(uuid)?;

        let response = self.transport().get(&format!("/storage/{}", uuid)).await?;
        let storage: ApiStorage = envelope::unwrap(response, &["storage"])?;
        Ok(storage.into())
    }
}
