// ── Subsystem processors ──
//
// Each processor knows one router subsystem's response shape and maps it
// into `InterfaceRecord`s. The controller runs a fixed, ordered list of
// them per cycle and folds their results; a failed processor contributes
// nothing instead of aborting the cycle.
//
// System/version and mesh are not `Processor`s: they produce metrics and
// mesh nodes rather than interface records.

pub mod ethernet;
pub mod mesh;
pub mod modem;
pub mod system;
pub mod wifi;

use async_trait::async_trait;
use serde_json::{Map, Value};

use keenetic_api::RciClient;

use crate::error::CoreError;
use crate::model::InterfaceMap;

pub use ethernet::EthernetProcessor;
pub use mesh::process_mesh;
pub use modem::ModemProcessor;
pub use wifi::WifiProcessor;

/// Data fetched once per cycle and shared with every processor.
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    /// `show interface` tree keyed by interface id.
    pub interfaces: Map<String, Value>,
}

/// A per-subsystem mapping from router responses to interface records.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn process(
        &self,
        client: &RciClient,
        ctx: &ProcessContext,
    ) -> Result<InterfaceMap, CoreError>;
}

/// Move `from` into `into`, keeping the first writer for any id present
/// in both. Returns the ids that collided.
pub fn merge_interfaces(into: &mut InterfaceMap, from: InterfaceMap) -> Vec<String> {
    let mut collisions = Vec::new();
    for (id, record) in from {
        if into.contains_key(&id) {
            collisions.push(id);
        } else {
            into.insert(id, record);
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EthernetDetails, InterfaceDetails, InterfaceKind, InterfaceRecord, LinkState};

    fn record(id: &str, description: &str) -> InterfaceRecord {
        InterfaceRecord {
            id: id.into(),
            kind: InterfaceKind::Port,
            description: Some(description.into()),
            label: None,
            link: LinkState::Up,
            up: true,
            details: InterfaceDetails::Ethernet(EthernetDetails::default()),
        }
    }

    fn map(records: &[(&str, &str)]) -> InterfaceMap {
        records
            .iter()
            .map(|(id, desc)| ((*id).to_owned(), record(id, desc)))
            .collect()
    }

    #[test]
    fn merge_disjoint_maps_keeps_order() {
        let mut into = map(&[("a", "first")]);
        let collisions = merge_interfaces(&mut into, map(&[("b", "second"), ("c", "third")]));
        assert!(collisions.is_empty());
        assert_eq!(into.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn merge_keeps_first_writer_and_reports_collision() {
        let mut into = map(&[("a", "first")]);
        let collisions = merge_interfaces(&mut into, map(&[("a", "later"), ("b", "new")]));
        assert_eq!(collisions, vec!["a".to_owned()]);
        assert_eq!(into["a"].description.as_deref(), Some("first"));
        assert_eq!(into.len(), 2);
    }
}
