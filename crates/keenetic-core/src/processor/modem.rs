// Mobile / USB modem processor
//
// Modem status is only exposed through the RCI command channel, so this
// processor POSTs `show interface` for one fixed interface name. The same
// type serves the LTE modem (`mobile`) and the USB modem (`usb-modem`).
// A router without the interface answers with an empty object or an RCI
// error status; both mean "no modem" and yield an empty map.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use keenetic_api::RciClient;

use crate::convert::{value_as_bool, value_as_f64, value_as_string};
use crate::error::CoreError;
use crate::model::{
    InterfaceDetails, InterfaceKind, InterfaceMap, InterfaceRecord, LinkState, ModemDetails,
};
use crate::processor::{ProcessContext, Processor};

/// Status fields holding the connection state, in priority order.
const STATE_FIELDS: [&str; 3] = ["connection-state", "state", "link"];

#[derive(Debug, Clone)]
pub struct ModemProcessor {
    interface: String,
    kind: InterfaceKind,
}

impl ModemProcessor {
    pub fn new(interface: impl Into<String>, kind: InterfaceKind) -> Self {
        Self {
            interface: interface.into(),
            kind,
        }
    }

    pub fn mobile(interface: impl Into<String>) -> Self {
        Self::new(interface, InterfaceKind::Mobile)
    }

    pub fn usb_modem(interface: impl Into<String>) -> Self {
        Self::new(interface, InterfaceKind::UsbModem)
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

#[async_trait]
impl Processor for ModemProcessor {
    fn name(&self) -> &'static str {
        match self.kind {
            InterfaceKind::UsbModem => "usb-modem",
            _ => "mobile",
        }
    }

    async fn process(
        &self,
        client: &RciClient,
        _ctx: &ProcessContext,
    ) -> Result<InterfaceMap, CoreError> {
        let response = client.show_interface_status(&self.interface).await?;

        let mut records = InterfaceMap::new();
        match modem_record(&self.interface, self.kind, &response) {
            Some(record) => {
                records.insert(record.id.clone(), record);
            }
            None => debug!(interface = %self.interface, "modem not present"),
        }
        Ok(records)
    }
}

/// Build a record from a `show interface` command response.
///
/// The status object sits under `show.interface`; some builds return it
/// bare.
pub fn modem_record(id: &str, kind: InterfaceKind, response: &Value) -> Option<InterfaceRecord> {
    let status = response
        .pointer("/show/interface")
        .unwrap_or(response)
        .as_object()?;
    if status.is_empty() || is_error_status(status) {
        return None;
    }

    let connection_state = STATE_FIELDS
        .iter()
        .find_map(|field| value_as_string(status.get(*field)));
    let connected = value_as_bool(status.get("connected")).unwrap_or(false);
    let up = value_as_bool(status.get("up")).unwrap_or(connected);
    let link = LinkState::from_flag(value_as_bool(status.get("link")).unwrap_or(up));

    Some(InterfaceRecord {
        id: value_as_string(status.get("id")).unwrap_or_else(|| id.to_owned()),
        kind,
        description: value_as_string(status.get("description")),
        label: None,
        link,
        up,
        details: InterfaceDetails::Modem(ModemDetails {
            technology: value_as_string(status.get("mobile")),
            operator: value_as_string(status.get("operator")),
            connection_state,
            connected,
            rssi: value_as_f64(status.get("rssi")),
            rsrp: value_as_f64(status.get("rsrp")),
            rsrq: value_as_f64(status.get("rsrq")),
            sinr: value_as_f64(status.get("cinr")),
            band: value_as_string(status.get("band")),
            cell_id: value_as_string(status.get("phy-cell-id")),
            tac: value_as_string(status.get("tac")),
            sim: value_as_string(status.get("sim")),
            temperature: value_as_f64(status.get("temperature")),
        }),
    })
}

/// RCI reports a missing interface as `{"status": [{"status": "error", ...}]}`.
fn is_error_status(status: &Map<String, Value>) -> bool {
    status
        .get("status")
        .and_then(Value::as_array)
        .is_some_and(|entries| {
            entries
                .iter()
                .any(|e| e.get("status").and_then(Value::as_str) == Some("error"))
        })
}
