// ── Snapshot ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interface::{InterfaceKind, InterfaceMap, InterfaceRecord};
use super::mesh::{MeshMap, MeshNodeRecord};
use super::system::{SystemMetrics, VersionInfo};

/// The complete result of one poll cycle.
///
/// Built once and never patched. A subsystem that could not be read
/// leaves its part empty (`None` or an empty map).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub collected_at: DateTime<Utc>,
    pub system: Option<SystemMetrics>,
    pub version: Option<VersionInfo>,
    pub interfaces: InterfaceMap,
    pub mesh: MeshMap,
}

impl SystemSnapshot {
    pub fn empty() -> Self {
        Self {
            collected_at: Utc::now(),
            system: None,
            version: None,
            interfaces: InterfaceMap::new(),
            mesh: MeshMap::new(),
        }
    }

    /// No subsystem produced anything.
    pub fn is_empty(&self) -> bool {
        self.system.is_none()
            && self.version.is_none()
            && self.interfaces.is_empty()
            && self.mesh.is_empty()
    }

    pub fn interface(&self, id: &str) -> Option<&InterfaceRecord> {
        self.interfaces.get(id)
    }

    pub fn interfaces_of_kind(&self, kind: InterfaceKind) -> impl Iterator<Item = &InterfaceRecord> {
        self.interfaces.values().filter(move |r| r.kind == kind)
    }

    /// Look up a mesh node by MAC, ignoring case and separator style.
    pub fn mesh_node(&self, mac: &str) -> Option<&MeshNodeRecord> {
        let wanted = normalize_mac(mac);
        self.mesh
            .values()
            .find(|node| normalize_mac(&node.id) == wanted)
    }
}

fn normalize_mac(mac: &str) -> String {
    mac.chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
