//! Server operations
//!
//! Maps `/server` endpoints onto [`Server`] values: listing, hydration,
//! creation from a [`ServerDraft`], modification, deletion and firewall
//! rule management.

use crate::client::{UpCloudClient, check_uuid};
use crate::envelope;
use crate::error::{Result, UpCloudError};
use crate::model::server::ApiServer;
use crate::model::{FirewallRule, Server, ServerDraft, ServerUpdate};
use crate::transport::Transport;
use serde_json::{Map, Value};

impl<T: Transport> UpCloudClient<T> {
    /// List all servers
    ///
    /// - `populate == false`: one request, returns stubs without storages or IPs
    /// - `populate == true`: one request plus one per server, each hydrated in turn
    pub async fn list_servers(&self, populate: bool) -> Result<Vec<Server>> {
        let response = self.transport().get("/server").await?;
        let stubs: Vec<ApiServer> = envelope::unwrap_list(response, "servers", "server")?;
        tracing::debug!("Listed {} servers", stubs.len());

        let stubs: Vec<Server> = stubs.into_iter().map(|s| s.into_server(false)).collect();
        if !populate {
            return Ok(stubs);
        }

        let mut servers = Vec::with_capacity(stubs.len());
        for stub in &stubs {
            servers.push(self.hydrate(stub).await?);
        }
        Ok(servers)
    }

    /// Fetch one server with its storages and IP addresses
    pub async fn get_server(&self, uuid: &str) -> Result<Server> {
        check_uuid(uuid)?;

        let response = self.transport().get(&server_path(uuid)).await?;
        server_from_response(response)
    }

    /// Return a hydrated copy of `server`
    pub async fn hydrate(&self, server: &Server) -> Result<Server> {
        self.get_server(&server.uuid).await
    }

    /// Create a server and its storages from a draft
    ///
    /// The draft is validated and completed with storage defaults before the
    /// request goes out; see [`ServerDraft::to_create_body`]. The returned
    /// server is hydrated from the API response.
    pub async fn create_server(&self, draft: &ServerDraft) -> Result<Server> {
        let body = draft.to_create_body()?;

        tracing::info!(
            "Creating server {} in {} with {} storage device(s)",
            draft.hostname,
            draft.zone,
            draft.storage_devices.len()
        );
        let response = self.transport().post("/server", &body).await?;
        let server = server_from_response(response)?;
        tracing::info!("Created server {} ({})", server.hostname, server.uuid);

        Ok(server)
    }

    /// Modify updateable fields of a server
    pub async fn update_server(&self, uuid: &str, update: &ServerUpdate) -> Result<Server> {
        check_uuid(uuid)?;
        if update.is_empty() {
            return Err(UpCloudError::Validation(
                "server update does not change any field".to_string(),
            ));
        }

        let body = update.to_body()?;
        tracing::info!("Updating server {}", uuid);
        let response = self.transport().put(&server_path(uuid), &body).await?;
        server_from_response(response)
    }

    /// Modify a server from loosely typed `field -> value` pairs
    ///
    /// Keys outside [`UPDATEABLE_FIELDS`](crate::model::UPDATEABLE_FIELDS)
    /// fail with a validation error and nothing is sent.
    pub async fn update_server_fields(
        &self,
        uuid: &str,
        fields: Map<String, Value>,
    ) -> Result<Server> {
        let update = ServerUpdate::from_fields(fields)?;
        self.update_server(uuid, &update).await
    }

    /// Permanently destroy a server
    ///
    /// Attached storages are not removed and stay listed under `/storage`.
    pub async fn delete_server(&self, uuid: &str) -> Result<()> {
        check_uuid(uuid)?;

        tracing::info!("Deleting server {}", uuid);
        self.transport().delete(&server_path(uuid)).await?;
        Ok(())
    }

    /// Add firewall rules to a server, one request per rule in the given
    /// order, and return the server's resulting rule set
    ///
    /// Fails if the server is still being created. Rules applied before a
    /// failing one stay in place.
    pub async fn configure_firewall(
        &self,
        uuid: &str,
        rules: &[FirewallRule],
    ) -> Result<Vec<FirewallRule>> {
        check_uuid(uuid)?;

        let path = firewall_path(uuid);
        tracing::info!("Applying {} firewall rule(s) to server {}", rules.len(), uuid);
        for (index, rule) in rules.iter().enumerate() {
            let body = envelope::wrap("firewall_rule", rule)?;
            self.transport().post(&path, &body).await.inspect_err(|e| {
                tracing::warn!(
                    "Firewall rule {} of {} for server {} failed: {}",
                    index + 1,
                    rules.len(),
                    uuid,
                    e
                );
            })?;
        }

        self.list_firewall_rules(uuid).await
    }

    /// Current firewall rules of a server
    pub async fn list_firewall_rules(&self, uuid: &str) -> Result<Vec<FirewallRule>> {
        check_uuid(uuid)?;

        let response = self.transport().get(&firewall_path(uuid)).await?;
        envelope::unwrap_list(response, "firewall_rules", "firewall_rule")
    }
}

fn server_path(uuid: &str) -> String {
    format!("/server/{}", uuid)
}

fn firewall_path(uuid: &str) -> String {
    format!("/server/{}/firewall_rule", uuid)
}

fn server_from_response(response: Value) -> Result<Server> {
    let server: ApiServer = envelope::unwrap(response, &["server"])?;
    Ok(server.into_server(true))
}
