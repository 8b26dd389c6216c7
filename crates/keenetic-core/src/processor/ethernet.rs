// Ethernet processor
//
// Works from the `show interface` tree fetched by the controller. Port
// records come from two places: children of an entry's `port` map (the
// switch ports of an Ethernet controller) and top-level entries that are
// themselves ports or WAN uplinks. Each record then gets one statistics
// call; a failed call leaves that record's counters empty.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use keenetic_api::RciClient;

use crate::convert::{string_list, value_as_bool, value_as_string, value_as_u64};
use crate::error::CoreError;
use crate::model::{
    EthernetDetails, InterfaceDetails, InterfaceKind, InterfaceMap, InterfaceRecord, LinkState,
};
use crate::processor::{ProcessContext, Processor};

const PORT_TYPES: &[&str] = &["port", "wan"];
const PORT_TRAITS: &[&str] = &["EthernetPort", "GigabitEthernetPort"];

#[derive(Debug, Default)]
pub struct EthernetProcessor;

#[async_trait]
impl Processor for EthernetProcessor {
    fn name(&self) -> &'static str {
        "ethernet"
    }

    async fn process(
        &self,
        client: &RciClient,
        ctx: &ProcessContext,
    ) -> Result<InterfaceMap, CoreError> {
        let mut records = port_records(&ctx.interfaces);

        for record in records.values_mut() {
            let InterfaceDetails::Ethernet(details) = &mut record.details else {
                continue;
            };
            match client.interface_stat(&record.id).await {
                Ok(stat) => {
                    details.rx_bytes = value_as_u64(stat.rxbytes.as_ref());
                    details.tx_bytes = value_as_u64(stat.txbytes.as_ref());
                    details.rx_speed = value_as_u64(stat.rxspeed.as_ref());
                    details.tx_speed = value_as_u64(stat.txspeed.as_ref());
                }
                Err(e) => {
                    warn!(interface = %record.id, error = %e, "interface statistics unavailable");
                }
            }
        }

        debug!(count = records.len(), "processed ethernet ports");
        Ok(records)
    }
}

/// Collect port-like entries from the interface tree, without statistics.
pub fn port_records(tree: &Map<String, Value>) -> InterfaceMap {
    let mut records = InterfaceMap::new();

    for (key, entry) in tree {
        let Some(entry) = entry.as_object() else {
            continue;
        };

        for (child_key, child) in port_children(entry) {
            let Some(child) = child.as_object() else {
                continue;
            };
            let id = value_as_string(child.get("id")).unwrap_or_else(|| format!("{key}/{child_key}"));
            records
                .entry(id.clone())
                .or_insert_with(|| port_record(id, child));
        }

        if is_port_like(entry) {
            let id = value_as_string(entry.get("id")).unwrap_or_else(|| key.clone());
            records
                .entry(id.clone())
                .or_insert_with(|| port_record(id, entry));
        }
    }

    records
}

fn port_children(entry: &Map<String, Value>) -> Vec<(String, &Value)> {
    match entry.get("port") {
        Some(Value::Object(ports)) => ports.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(Value::Array(ports)) => ports
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn is_port_like(entry: &Map<String, Value>) -> bool {
    let by_type = entry
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| PORT_TYPES.iter().any(|p| p.eq_ignore_ascii_case(t)));
    let by_trait = string_list(entry.get("traits"))
        .iter()
        .any(|t| PORT_TRAITS.contains(&t.as_str()));
    by_type || by_trait
}

fn is_wan(entry: &Map<String, Value>) -> bool {
    let typed_wan = entry
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| t.eq_ignore_ascii_case("wan"));
    typed_wan
        || string_list(entry.get("role")).iter().any(|role| {
            let role = role.to_ascii_lowercase();
            role.contains("inet") || role.contains("wan")
        })
}

fn port_record(id: String, entry: &Map<String, Value>) -> InterfaceRecord {
    let link = entry
        .get("link")
        .or_else(|| entry.get("state"))
        .and_then(|v| value_as_bool(Some(v)))
        .map_or(LinkState::Down, LinkState::from_flag);
    let up = value_as_bool(entry.get("up")).unwrap_or(link.is_up());

    InterfaceRecord {
        kind: if is_wan(entry) {
            InterfaceKind::Wan
        } else {
            InterfaceKind::Port
        },
        description: value_as_string(entry.get("description")),
        label: value_as_string(entry.get("label")),
        link,
        up,
        details: InterfaceDetails::Ethernet(EthernetDetails {
            speed_mbps: value_as_u64(entry.get("speed")),
            duplex: value_as_string(entry.get("duplex")),
            mac: value_as_string(entry.get("mac")),
            role: string_list(entry.get("role")),
            ..EthernetDetails::default()
        }),
        id,
    }
}
