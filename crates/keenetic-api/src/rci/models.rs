// Raw RCI response shapes
//
// Field types are loose on purpose: depending on firmware a number may
// arrive as a JSON number or as a string, and booleans as `true` or
// `"yes"`. Normalisation happens in keenetic-core. Unknown fields are
// kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /rci/show/system`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSystem {
    pub hostname: Option<Value>,
    pub domainname: Option<Value>,
    pub cpuload: Option<Value>,
    /// RAM as a `"used/total"` string (KiB).
    pub memory: Option<Value>,
    pub memtotal: Option<Value>,
    pub memfree: Option<Value>,
    pub membuffers: Option<Value>,
    pub memcache: Option<Value>,
    pub swaptotal: Option<Value>,
    pub swapfree: Option<Value>,
    pub uptime: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `GET /rci/show/version`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVersion {
    pub release: Option<Value>,
    pub sandbox: Option<Value>,
    pub title: Option<Value>,
    pub arch: Option<Value>,
    pub model: Option<Value>,
    pub device: Option<Value>,
    pub manufacturer: Option<Value>,
    pub vendor: Option<Value>,
    pub hw_version: Option<Value>,
    pub hw_id: Option<Value>,
    pub region: Option<Value>,
    pub description: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `GET /rci/show/interface/stat?name=<iface>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInterfaceStat {
    pub rxpackets: Option<Value>,
    pub rxbytes: Option<Value>,
    pub rxerrors: Option<Value>,
    pub txpackets: Option<Value>,
    pub txbytes: Option<Value>,
    pub txerrors: Option<Value>,
    pub rxspeed: Option<Value>,
    pub txspeed: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Flatten the mesh member payload.
///
/// The router answers with a bare list on most builds and with
/// `{"member": [...]}` (or a single object under `member`) on others.
/// Anything else means no members.
pub fn mesh_member_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(members) => members,
        Value::Object(mut map) => match map.remove("member") {
            Some(Value::Array(members)) => members,
            Some(member @ Value::Object(_)) => vec![member],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
