// RCI command endpoint
//
// `POST /rci/` accepts structured command bodies. Modem status is only
// exposed this way, and SMS sending uses the same channel.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::Error;
use crate::rci::client::RciClient;

impl RciClient {
    /// Run an arbitrary RCI command body.
    ///
    /// `POST /rci/`
    pub async fn command(&self, body: &Value) -> Result<Value, Error> {
        self.post("rci/", body).await
    }

    /// Get the live status of one interface through the command channel.
    ///
    /// `POST /rci/` with `{"show":{"interface":{"name":<iface>}}}`
    pub async fn show_interface_status(&self, name: &str) -> Result<Value, Error> {
        debug!(interface = name, "querying interface status");
        self.command(&json!({ "show": { "interface": { "name": name } } }))
            .await
    }

    /// Send an SMS through a mobile interface.
    ///
    /// `POST /rci/` with `[{"sms":{"send":{"interface","to","message"}}}]`
    pub async fn send_sms(&self, interface: &str, to: &str, message: &str) -> Result<Value, Error> {
        debug!(interface, "sending sms");
        self.command(&json!([{
            "sms": {
                "send": {
                    "interface": interface,
                    "to": to,
                    "message": message,
                }
            }
        }]))
        .await
    }
}
