// RCI system endpoints
//
// Router-level reads: system counters, firmware identity, mesh members.

use tracing::debug;

use crate::error::Error;
use crate::rci::client::RciClient;
use crate::rci::models::{RawSystem, RawVersion, mesh_member_list};

impl RciClient {
    /// Get CPU, memory and uptime counters.
    ///
    /// `GET /rci/show/system`
    pub async fn show_system(&self) -> Result<RawSystem, Error> {
        debug!("fetching system info");
        let value = self.get("rci/show/system").await?;
        deserialize(value)
    }

    /// Get firmware and hardware identity.
    ///
    /// `GET /rci/show/version`
    pub async fn show_version(&self) -> Result<RawVersion, Error> {
        debug!("fetching version info");
        let value = self.get("rci/show/version").await?;
        deserialize(value)
    }

    /// List mesh (Wi-Fi system) member nodes.
    ///
    /// `GET /rci/show/mws/member`
    ///
    /// Returns loosely-typed JSON; the payload shape differs between
    /// firmware builds and is flattened here to a plain list.
    pub async fn mesh_members(&self) -> Result<Vec<serde_json::Value>, Error> {
        debug!("fetching mesh members");
        let value = self.get("rci/show/mws/member").await?;
        let members = mesh_member_list(value);
        debug!(count = members.len(), "mesh members received");
        Ok(members)
    }
}

pub(crate) fn deserialize<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
    })
}
