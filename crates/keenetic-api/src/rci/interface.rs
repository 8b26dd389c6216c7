// RCI interface endpoints
//
// Interface tree, per-interface statistics and configuration, and the
// up/down control used for radios and modems.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::Error;
use crate::rci::client::RciClient;
use crate::rci::models::RawInterfaceStat;
use crate::rci::system::deserialize;
use crate::rci::{Method, StatusCode};

impl RciClient {
    /// Get the status tree of every interface, keyed by interface id.
    ///
    /// `GET /rci/show/interface`
    pub async fn show_interfaces(&self) -> Result<serde_json::Map<String, Value>, Error> {
        debug!("fetching interface status");
        match self.get("rci/show/interface").await? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Deserialization {
                message: format!("expected interface map, got {}", json_kind(&other)),
            }),
        }
    }

    /// Get byte/speed counters for one interface.
    ///
    /// `GET /rci/show/interface/stat?name=<iface>`
    pub async fn interface_stat(&self, name: &str) -> Result<RawInterfaceStat, Error> {
        let mut url = self.rci_url("rci/show/interface/stat")?;
        url.query_pairs_mut().append_pair("name", name);
        debug!(interface = name, "fetching interface statistics");
        let value = self.execute(Method::GET, url, None).await?;
        deserialize(value)
    }

    /// Get the configuration of one interface (access point, modem, ...).
    ///
    /// `GET /rci/interface/<id>`
    pub async fn interface_config(&self, id: &str) -> Result<Value, Error> {
        debug!(interface = id, "fetching interface config");
        self.get(&format!("rci/interface/{id}")).await
    }

    /// Bring an interface up or down.
    ///
    /// `POST /rci/interface/<id>` with `{"up":"true"}` or `{"down":"true"}`
    ///
    /// Returns the raw status; the router applies the change asynchronously.
    pub async fn set_interface_state(&self, id: &str, up: bool) -> Result<StatusCode, Error> {
        let body = if up {
            json!({ "up": "true" })
        } else {
            json!({ "down": "true" })
        };
        debug!(interface = id, up, "setting interface state");
        self.send(Method::POST, &format!("rci/interface/{id}"), Some(&body))
            .await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
