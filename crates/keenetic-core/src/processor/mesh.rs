// Mesh processor
//
// Pure transform over the already-fetched member list. Entries that are
// not objects, or that carry no MAC, are dropped.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::convert::{value_as_bool, value_as_string, value_as_u64};
use crate::model::{MeshAttributes, MeshMap, MeshNodeRecord, MeshNodeStatus};

pub fn process_mesh(members: &[Value]) -> MeshMap {
    let mut nodes = MeshMap::new();
    for member in members {
        let Some(node) = member.as_object() else {
            trace!("skipping non-object mesh member");
            continue;
        };
        let Some(record) = mesh_node(node) else {
            trace!("skipping mesh member without mac");
            continue;
        };
        nodes.insert(record.id.clone(), record);
    }
    debug!(count = nodes.len(), "processed mesh nodes");
    nodes
}

fn mesh_node(node: &Map<String, Value>) -> Option<MeshNodeRecord> {
    let id = value_as_string(node.get("mac"))?;
    let system = node.get("system");

    let ports = match node.get("port") {
        Some(Value::Array(ports)) => ports.clone(),
        Some(Value::Object(ports)) => ports.values().cloned().collect(),
        _ => Vec::new(),
    };
    let capabilities = node
        .get("capabilities")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Some(MeshNodeRecord {
        id,
        known_host: value_as_string(node.get("known-host")),
        hostname: value_as_string(node.get("hostname")),
        model: value_as_string(node.get("model")),
        status: MeshNodeStatus::Connected,
        attributes: MeshAttributes {
            ip: value_as_string(node.get("ip")),
            mode: value_as_string(node.get("mode")),
            hw_id: value_as_string(node.get("hw_id")),
            firmware: value_as_string(node.get("fw")),
            firmware_available: value_as_string(node.get("fw-available")),
            memory: value_as_string(system.and_then(|s| s.get("memory"))),
            uptime_secs: value_as_u64(system.and_then(|s| s.get("uptime"))),
            ports,
            capabilities,
            cloud_agent_state: value_as_string(node.get("cloud-agent-state")),
            internet_available: value_as_bool(node.get("internet-available")).unwrap_or(false),
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn drops_members_without_mac() {
        let members = vec![
            json!({ "hostname": "no-mac" }),
            json!({ "mac": "AA:BB:CC:DD:EE:FF", "hostname": "Buddy" }),
        ];
        let nodes = process_mesh(&members);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes["AA:BB:CC:DD:EE:FF"].hostname.as_deref(), Some("Buddy"));
    }

    #[test]
    fn drops_non_object_members() {
        let nodes = process_mesh(&[json!("AA:BB:CC:DD:EE:FF"), json!(null)]);
        assert!(nodes.is_empty());
    }

    #[test]
    fn maps_nested_attributes() {
        let members = vec![json!({
            "mac": "50:ff:20:00:00:01",
            "known-host": "Hallway",
            "model": "Buddy 5",
            "ip": "192.168.1.33",
            "mode": "extender",
            "hw_id": "KN-3311",
            "fw": "4.1.7",
            "fw-available": "4.2.0",
            "system": { "memory": "40000/131072", "uptime": "86400" },
            "port": [{ "id": "1", "link": "up" }],
            "capabilities": { "wifi": true },
            "cloud-agent-state": "connected",
            "internet-available": true
        })];

        let node = &process_mesh(&members)["50:ff:20:00:00:01"];
        assert_eq!(node.status, MeshNodeStatus::Connected);
        assert_eq!(node.display_name(), "Hallway");
        assert_eq!(
            node.attributes,
            MeshAttributes {
                ip: Some("192.168.1.33".into()),
                mode: Some("extender".into()),
                hw_id: Some("KN-3311".into()),
                firmware: Some("4.1.7".into()),
                firmware_available: Some("4.2.0".into()),
                memory: Some("40000/131072".into()),
                uptime_secs: Some(86_400),
                ports: vec![json!({ "id": "1", "link": "up" })],
                capabilities: json!({ "wifi": true }).as_object().cloned().unwrap_or_default(),
                cloud_agent_state: Some("connected".into()),
                internet_available: true,
            }
        );
    }
}
