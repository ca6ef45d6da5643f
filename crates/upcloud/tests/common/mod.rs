use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Mutex;
use upcloud::{Result, Transport, UpCloudClient, UpCloudError};

/// In-memory stand-in for the UpCloud API
///
/// Keeps servers, storages and firewall rules in maps, answers with the
/// same envelopes as the real API and records every request.
#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    servers: BTreeMap<String, Value>,
    storages: BTreeMap<String, Value>,
    firewall_rules: BTreeMap<String, Vec<Value>>,
    requests: Vec<(String, String)>,
    next_id: u32,
    /// Reject firewall rule POSTs once a server holds this many rules
    firewall_rule_limit: Option<usize>,
}

impl State {
    fn next_uuid(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-0000-4000-8000-{:012}", prefix, self.next_id)
    }

    fn server_summary(server: &Value) -> Value {
        json!({
            "uuid": server["uuid"],
            "hostname": server["hostname"],
            "title": server["title"],
            "zone": server["zone"],
            "core_number": server["core_number"],
            "memory_amount": server["memory_amount"],
            "state": server["state"],
        })
    }
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn with_firewall_rule_limit(self, limit: usize) -> Self {
        self.state.lock().unwrap().firewall_rule_limit = Some(limit);
        self
    }

    /// Insert an existing server with one OS disk and one public IP
    #[allow(dead_code)]
    pub fn seed_server(&self, hostname: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let uuid = state.next_uuid("00aa0000");
        let storage_uuid = state.next_uuid("01bb0000");
        let n = state.next_id;

        state.storages.insert(
            storage_uuid.clone(),
            json!({
                "uuid": storage_uuid,
                "title": format!("{} OS disk", hostname),
                "size": 10,
                "tier": "maxiops",
                "type": "normal",
                "state": "online",
                "zone": "fi-hel1",
            }),
        );
        state.servers.insert(
            uuid.clone(),
            json!({
                "uuid": uuid,
                "hostname": hostname,
                "title": hostname,
                "zone": "fi-hel1",
                "core_number": "1",
                "memory_amount": "1024",
                "state": "started",
                "plan": "1xCPU-1GB",
                "ip_addresses": {"ip_address": [
                    {"access": "public", "address": format!("94.237.0.{}", n), "family": "IPv4"}
                ]},
                "storage_devices": {"storage_device": [
                    {"address": "virtio:0", "storage": storage_uuid, "storage_size": 10,
                     "storage_title": format!("{} OS disk", hostname), "type": "disk"}
                ]},
            }),
        );
        uuid
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    #[allow(dead_code)]
    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    #[allow(dead_code)]
    pub fn server_count(&self) -> usize {
        self.state.lock().unwrap().servers.len()
    }

    fn record(&self, method: &str, path: &str) {
        self.state
            .lock()
            .unwrap()
            .requests
            .push((method.to_string(), path.to_string()));
    }

    fn not_found(path: &str) -> UpCloudError {
        UpCloudError::from_response(
            404,
            br#"{"error":{"error_code":"NOT_FOUND","error_message":"The resource does not exist."}}"#,
            path,
        )
    }

    fn create_server(&self, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        let request = &body["server"];
        let uuid = state.next_uuid("00aa0000");
        let zone = request["zone"].clone();

        let mut devices = Vec::new();
        let empty = Vec::new();
        let requested = request["storage_devices"]["storage_device"]
            .as_array()
            .unwrap_or(&empty);
        for (index, device) in requested.iter().enumerate() {
            let storage_uuid = state.next_uuid("01bb0000");
            state.storages.insert(
                storage_uuid.clone(),
                json!({
                    "uuid": storage_uuid,
                    "title": device["title"],
                    "size": device["size"],
                    "tier": device["tier"],
                    "type": "normal",
                    "state": "maintenance",
                    "zone": zone,
                }),
            );
            devices.push(json!({
                "address": format!("virtio:{}", index),
                "storage": storage_uuid,
                "storage_size": device["size"],
                "storage_title": device["title"],
                "type": "disk",
            }));
        }

        let n = state.next_id;
        let server = json!({
            "uuid": uuid,
            "hostname": request["hostname"],
            "title": request["title"],
            "zone": zone,
            "core_number": request.get("core_number").cloned().unwrap_or(json!("1")),
            "memory_amount": request.get("memory_amount").cloned().unwrap_or(json!("1024")),
            "state": "maintenance",
            "ip_addresses": {"ip_address": [
                {"access": "private", "address": format!("10.0.0.{}", n), "family": "IPv4"},
                {"access": "public", "address": format!("94.237.0.{}", n), "family": "IPv4"}
            ]},
            "storage_devices": {"storage_device": devices},
        });
        state.servers.insert(uuid, server.clone());

        Ok(json!({ "server": server }))
    }

    fn update_server(&self, path: &str, uuid: &str, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        let server = state
            .servers
            .get_mut(uuid)
            .ok_or_else(|| Self::not_found(path))?;

        if let (Some(target), Some(changes)) = (server.as_object_mut(), body["server"].as_object())
        {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }

        Ok(json!({ "server": server.clone() }))
    }

    fn add_firewall_rule(&self, path: &str, uuid: &str, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        if !state.servers.contains_key(uuid) {
            return Err(Self::not_found(path));
        }

        let limit = state.firewall_rule_limit;
        let rules = state.firewall_rules.entry(uuid.to_string()).or_default();
        if limit.is_some_and(|limit| rules.len() >= limit) {
            return Err(UpCloudError::from_response(
                400,
                br#"{"error":{"error_code":"FIREWALL_RULE_LIMIT_REACHED","error_message":"Too many firewall rules."}}"#,
                path,
            ));
        }

        let mut rule = body["firewall_rule"].clone();
        if rule.get("position").is_none() {
            rule["position"] = json!((rules.len() + 1).to_string());
        }
        rules.push(rule.clone());

        Ok(json!({ "firewall_rule": rule }))
    }
}

#[async_trait]
impl Transport for FakeCloud {
    async fn get(&self, path: &str) -> Result<Value> {
        self.record("GET", path);
        let state = self.state.lock().unwrap();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            ["server"] => {
                let servers: Vec<Value> = state.servers.values().map(State::server_summary).collect();
                Ok(json!({"servers": {"server": servers}}))
            }
            ["server", uuid] => state
                .servers
                .get(*uuid)
                .map(|server| json!({ "server": server }))
                .ok_or_else(|| Self::not_found(path)),
            ["server", uuid, "firewall_rule"] => {
                if !state.servers.contains_key(*uuid) {
                    return Err(Self::not_found(path));
                }
                let rules = state.firewall_rules.get(*uuid).cloned().unwrap_or_default();
                Ok(json!({"firewall_rules": {"firewall_rule": rules}}))
            }
            ["storage"] => {
                let storages: Vec<Value> = state.storages.values().cloned().collect();
                Ok(json!({"storages": {"storage": storages}}))
            }
            ["storage", uuid] => state
                .storages
                .get(*uuid)
                .map(|storage| json!({ "storage": storage }))
                .ok_or_else(|| Self::not_found(path)),
            _ => Err(Self::not_found(path)),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.record("POST", path);
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            ["server"] => self.create_server(body),
            ["server", uuid, "firewall_rule"] => self.add_firewall_rule(path, uuid, body),
            _ => Err(Self::not_found(path)),
        }
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.record("PUT", path);
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            ["server", uuid] => self.update_server(path, uuid, body),
            _ => Err(Self::not_found(path)),
        }
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.record("DELETE", path);
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            ["server", uuid] => {
                let mut state = self.state.lock().unwrap();
                state
                    .servers
                    .remove(*uuid)
                    .ok_or_else(|| Self::not_found(path))?;
                state.firewall_rules.remove(*uuid);
                Ok(Value::Null)
            }
            _ => Err(Self::not_found(path)),
        }
    }
}

pub fn client() -> UpCloudClient<FakeCloud> {
    UpCloudClient::with_transport(FakeCloud::new())
}

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
