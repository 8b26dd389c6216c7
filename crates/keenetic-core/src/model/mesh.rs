// ── Mesh domain types ──

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Mesh nodes keyed by MAC address.
pub type MeshMap = IndexMap<String, MeshNodeRecord>;

/// A node listed by the router is, by definition, currently connected.
/// Nodes that drop out are simply absent from the next snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MeshNodeStatus {
    #[default]
    Connected,
}

/// One remote mesh (Wi-Fi system) peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshNodeRecord {
    /// MAC address as reported by the controller node.
    pub id: String,
    pub known_host: Option<String>,
    pub hostname: Option<String>,
    pub model: Option<String>,
    pub status: MeshNodeStatus,
    pub attributes: MeshAttributes,
}

impl MeshNodeRecord {
    pub fn display_name(&self) -> &str {
        [self.known_host.as_deref(), self.hostname.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshAttributes {
    pub ip: Option<String>,
    pub mode: Option<String>,
    pub hw_id: Option<String>,
    pub firmware: Option<String>,
    pub firmware_available: Option<String>,
    /// `"used/total"` as reported by the node.
    pub memory: Option<String>,
    pub uptime_secs: Option<u64>,
    pub ports: Vec<serde_json::Value>,
    pub capabilities: serde_json::Map<String, serde_json::Value>,
    pub cloud_agent_state: Option<String>,
    pub internet_available: bool,
}
