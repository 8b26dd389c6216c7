// ── Interface domain types ──

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Interface records keyed by router-assigned id, in processor order.
pub type InterfaceMap = IndexMap<String, InterfaceRecord>;

/// What kind of network-facing object a record describes.
///
/// Serialized names match the router's own vocabulary
/// (`wan`, `port`, `AccessPoint`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[non_exhaustive]
pub enum InterfaceKind {
    #[serde(rename = "wan")]
    #[strum(serialize = "wan")]
    Wan,
    #[serde(rename = "port")]
    #[strum(serialize = "port")]
    Port,
    #[serde(rename = "AccessPoint")]
    #[strum(serialize = "AccessPoint")]
    AccessPoint,
    #[serde(rename = "mobile")]
    #[strum(serialize = "mobile")]
    Mobile,
    #[serde(rename = "usb-modem")]
    #[strum(serialize = "usb-modem")]
    UsbModem,
    #[serde(rename = "bridge")]
    #[strum(serialize = "bridge")]
    Bridge,
    #[serde(rename = "other")]
    #[strum(serialize = "other")]
    Other,
}

/// Physical/logical link state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LinkState {
    Up,
    Down,
}

impl LinkState {
    pub fn from_flag(up: bool) -> Self {
        if up { Self::Up } else { Self::Down }
    }

    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// One network-facing object: port, WAN uplink, access point or modem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InterfaceKind,
    pub description: Option<String>,
    pub label: Option<String>,
    pub link: LinkState,
    pub up: bool,
    pub details: InterfaceDetails,
}

impl InterfaceRecord {
    /// Human-facing name: label, then description, then id.
    pub fn display_name(&self) -> &str {
        [self.label.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn ethernet(&self) -> Option<&EthernetDetails> {
        match &self.details {
            InterfaceDetails::Ethernet(d) => Some(d),
            _ => None,
        }
    }

    pub fn wifi(&self) -> Option<&WifiDetails> {
        match &self.details {
            InterfaceDetails::Wifi(d) => Some(d),
            _ => None,
        }
    }

    pub fn modem(&self) -> Option<&ModemDetails> {
        match &self.details {
            InterfaceDetails::Modem(d) => Some(d),
            _ => None,
        }
    }
}

/// Type-specific attributes of an [`InterfaceRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceDetails {
    Ethernet(EthernetDetails),
    Wifi(WifiDetails),
    Modem(ModemDetails),
}

/// Wired port or WAN uplink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EthernetDetails {
    pub speed_mbps: Option<u64>,
    pub duplex: Option<String>,
    pub mac: Option<String>,
    pub role: Vec<String>,
    /// Filled from the per-interface statistics call; `None` if it failed.
    pub rx_bytes: Option<u64>,
    pub tx_bytes: Option<u64>,
    pub rx_speed: Option<u64>,
    pub tx_speed: Option<u64>,
}

/// Radio band of a Wi-Fi master.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum WifiBand {
    #[serde(rename = "2.4GHz")]
    #[strum(serialize = "2.4 GHz")]
    Band2_4GHz,
    #[serde(rename = "5GHz")]
    #[strum(serialize = "5 GHz")]
    Band5GHz,
}

/// Configured access point (one SSID on one radio).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiDetails {
    pub band: WifiBand,
    pub ssid: String,
    pub mac: Option<String>,
    pub interface_name: Option<String>,
    pub connected: bool,
    pub state: String,
    /// Enabled security protocols, e.g. `["wpa2", "wpa3"]`.
    pub encryption: Vec<String>,
    /// WPA-PSK passphrase. Never serialized.
    #[serde(skip)]
    pub password: Option<SecretString>,
}

/// Cellular (LTE) or USB modem status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModemDetails {
    pub technology: Option<String>,
    pub operator: Option<String>,
    /// Whichever of `connection-state`, `state`, `link` the firmware fills.
    pub connection_state: Option<String>,
    pub connected: bool,
    pub rssi: Option<f64>,
    pub rsrp: Option<f64>,
    pub rsrq: Option<f64>,
    pub sinr: Option<f64>,
    pub band: Option<String>,
    pub cell_id: Option<String>,
    pub tac: Option<String>,
    pub sim: Option<String>,
    pub temperature: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn kind_uses_router_vocabulary() {
        assert_eq!(
            serde_json::to_value(InterfaceKind::AccessPoint).unwrap(),
            serde_json::json!("AccessPoint")
        );
        assert_eq!(InterfaceKind::UsbModem.to_string(), "usb-modem");
        assert_eq!(InterfaceKind::from_str("accesspoint").unwrap(), InterfaceKind::AccessPoint);
        assert_eq!(InterfaceKind::from_str("WAN").unwrap(), InterfaceKind::Wan);
    }

    #[test]
    fn wifi_password_is_not_serialized() {
        let record = InterfaceRecord {
            id: "WifiMaster0/AccessPoint0".into(),
            kind: InterfaceKind::AccessPoint,
            description: None,
            label: None,
            link: LinkState::Up,
            up: true,
            details: InterfaceDetails::Wifi(WifiDetails {
                band: WifiBand::Band2_4GHz,
                ssid: "Home".into(),
                mac: None,
                interface_name: None,
                connected: true,
                state: "up".into(),
                encryption: vec!["wpa2".into()],
                password: Some(SecretString::from("hunter22".to_owned())),
            }),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("hunter22"));
        assert!(json.contains(r#""type":"AccessPoint""#));
        assert!(json.contains(r#""link":"up""#));
    }
}
