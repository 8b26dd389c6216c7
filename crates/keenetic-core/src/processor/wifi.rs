// Wi-Fi processor
//
// Bounded scan: two radio masters, access point indices 0..=6 on each.
// A band whose master cannot be read is skipped; an index is kept only
// when the router reports a non-empty SSID for it.

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, trace};

use keenetic_api::RciClient;

use crate::convert::{value_as_bool, value_as_string};
use crate::error::CoreError;
use crate::model::{
    InterfaceDetails, InterfaceKind, InterfaceMap, InterfaceRecord, LinkState, WifiBand,
    WifiDetails,
};
use crate::processor::{ProcessContext, Processor};

pub const MASTERS: [(&str, WifiBand); 2] = [
    ("WifiMaster0", WifiBand::Band2_4GHz),
    ("WifiMaster1", WifiBand::Band5GHz),
];

/// Highest access point index polled on each master.
pub const MAX_AP_INDEX: u8 = 6;

#[derive(Debug, Default)]
pub struct WifiProcessor;

#[async_trait]
impl Processor for WifiProcessor {
    fn name(&self) -> &'static str {
        "wifi"
    }

    async fn process(
        &self,
        client: &RciClient,
        _ctx: &ProcessContext,
    ) -> Result<InterfaceMap, CoreError> {
        let mut records = InterfaceMap::new();

        for (master, band) in MASTERS {
            if let Err(e) = client.interface_config(master).await {
                debug!(master, error = %e, "radio unavailable, skipping band");
                continue;
            }

            for index in 0..=MAX_AP_INDEX {
                let id = format!("{master}/AccessPoint{index}");
                match client.interface_config(&id).await {
                    Ok(ap) => {
                        if let Some(record) = access_point_record(&id, band, &ap) {
                            records.insert(id, record);
                        }
                    }
                    Err(e) => trace!(interface = %id, error = %e, "access point not readable"),
                }
            }
        }

        debug!(count = records.len(), "processed wifi access points");
        Ok(records)
    }
}

/// Build a record from `GET /rci/interface/<ap>`, or `None` if no SSID is set.
pub fn access_point_record(id: &str, band: WifiBand, ap: &Value) -> Option<InterfaceRecord> {
    let ssid = match ap.get("ssid") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) => return None,
        other => value_as_string(other)?,
    };
    let up = value_as_bool(ap.get("up")).unwrap_or(false);

    let password = ap
        .pointer("/authentication/wpa-psk/psk")
        .and_then(|v| value_as_string(Some(v)))
        .map(SecretString::from);

    Some(InterfaceRecord {
        id: id.to_owned(),
        kind: InterfaceKind::AccessPoint,
        description: value_as_string(ap.get("description")),
        label: None,
        link: LinkState::from_flag(up),
        up,
        details: InterfaceDetails::Wifi(WifiDetails {
            band,
            ssid,
            mac: value_as_string(ap.get("mac")),
            interface_name: value_as_string(ap.get("interface-name")),
            connected: value_as_bool(ap.get("connected")).unwrap_or(false),
            state: value_as_string(ap.get("state")).unwrap_or_else(|| "down".into()),
            encryption: encryption_protocols(ap.get("encryption")),
            password,
        }),
    })
}

/// `{"enable": true, "wpa2": true, "wpa3": false}` becomes `["wpa2"]`.
fn encryption_protocols(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Object(map)) => map
            .iter()
            .filter(|(name, _)| name.as_str() != "enable")
            .filter(|(_, on)| value_as_bool(Some(on)).unwrap_or(false))
            .map(|(name, _)| name.clone())
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    #[test]
    fn access_point_without_ssid_is_skipped() {
        let ap = json!({ "ssid": "", "up": true });
        assert!(access_point_record("WifiMaster0/AccessPoint1", WifiBand::Band2_4GHz, &ap).is_none());
        assert!(access_point_record("WifiMaster0/AccessPoint2", WifiBand::Band2_4GHz, &json!({})).is_none());
    }

    #[test]
    fn blank_ssid_is_kept_verbatim() {
        let ap = json!({ "ssid": "   ", "up": true });
        let record = access_point_record("WifiMaster0/AccessPoint3", WifiBand::Band2_4GHz, &ap)
            .unwrap_or_else(|| panic!("record expected"));
        let wifi = record.wifi().unwrap_or_else(|| panic!("wifi details expected"));
        assert_eq!(wifi.ssid, "   ");
    }

    #[test]
    fn access_point_fields() {
        let ap = json!({
            "ssid": "Home",
            "description": "Main network",
            "up": true,
            "mac": "50:ff:20:00:00:02",
            "interface-name": "AccessPoint",
            "connected": "yes",
            "state": "up",
            "encryption": { "enable": true, "wpa2": true, "wpa3": false },
            "authentication": { "wpa-psk": { "psk": "correct horse" } }
        });

        let record = access_point_record("WifiMaster1/AccessPoint0", WifiBand::Band5GHz, &ap)
            .unwrap_or_else(|| panic!("record expected"));
        assert_eq!(record.kind, InterfaceKind::AccessPoint);
        assert_eq!(record.link, LinkState::Up);
        assert_eq!(record.display_name(), "Main network");

        let wifi = record.wifi().unwrap_or_else(|| panic!("wifi details expected"));
        assert_eq!(wifi.ssid, "Home");
        assert_eq!(wifi.band, WifiBand::Band5GHz);
        assert!(wifi.connected);
        assert_eq!(wifi.encryption, vec!["wpa2".to_owned()]);
        assert_eq!(
            wifi.password.as_ref().map(|p| p.expose_secret()),
            Some("correct horse")
        );
    }

    #[test]
    fn down_access_point_defaults() {
        let ap = json!({ "ssid": "Guest" });
        let record = access_point_record("WifiMaster0/AccessPoint1", WifiBand::Band2_4GHz, &ap)
            .unwrap_or_else(|| panic!("record expected"));
        assert!(!record.up);
        assert_eq!(record.link, LinkState::Down);
        let wifi = record.wifi().unwrap_or_else(|| panic!("wifi details expected"));
        assert_eq!(wifi.state, "down");
        assert!(wifi.password.is_none());
        assert!(wifi.encryption.is_empty());
    }
}
