// ── API-to-domain conversions ──
//
// Keenetic firmware is loose about JSON types: counters arrive as numbers
// or numeric strings, flags as `true` or `"yes"`. The helpers here turn
// those into plain Rust values, and the `From` impls build domain types
// from raw `keenetic_api` responses.

use serde_json::Value;

use keenetic_api::rci::models::{RawSystem, RawVersion};

use crate::model::{SystemMetrics, VersionInfo};

pub const DEFAULT_MANUFACTURER: &str = "Keenetic";

// ── Value helpers ──────────────────────────────────────────────────

/// Read an unsigned integer from a number or numeric string.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn value_as_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    }
}

/// Read a float from a number or numeric string.
pub fn value_as_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Read a flag from `true`/`false`, `"yes"`/`"no"`, `"up"`/`"down"` or `0`/`1`.
pub fn value_as_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f.abs() > f64::EPSILON),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "up" | "on" | "1" => Some(true),
            "no" | "false" | "down" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Read a scalar as a non-empty string. Numbers and booleans are rendered.
pub fn value_as_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a string or a list of strings.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| value_as_string(Some(item)))
            .collect(),
        Some(other) => value_as_string(Some(other)).into_iter().collect(),
        None => Vec::new(),
    }
}

// ── Percentages ────────────────────────────────────────────────────

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// `part / total * 100`, rounded to one decimal. A zero total yields `0`.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 && part.is_finite() {
        round1(part / total * 100.0)
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn to_f64(value: u64) -> f64 {
    value as f64
}

/// Storage memory usage from `memtotal` and `memfree`.
pub fn memory_usage(total: u64, free: u64) -> f64 {
    percentage(to_f64(total.saturating_sub(free)), to_f64(total))
}

/// RAM usage from a `"used/total"` string, e.g. `"512/1024"` is `50.0`.
pub fn ram_usage(raw: &str) -> f64 {
    parse_used_total(raw).map_or(0.0, |(used, total)| percentage(used, total))
}

fn parse_used_total(raw: &str) -> Option<(f64, f64)> {
    let (used, total) = raw.split_once('/')?;
    let used = used.trim().parse::<f64>().ok()?;
    let total = total.trim().parse::<f64>().ok()?;
    Some((used, total))
}

// ── System ─────────────────────────────────────────────────────────

impl From<RawSystem> for SystemMetrics {
    fn from(raw: RawSystem) -> Self {
        let memory_total = value_as_u64(raw.memtotal.as_ref()).unwrap_or(0);
        let memory_free = value_as_u64(raw.memfree.as_ref()).unwrap_or(0);
        let ram_usage_pct = raw
            .memory
            .as_ref()
            .and_then(Value::as_str)
            .map_or(0.0, ram_usage);

        SystemMetrics {
            cpu_load: value_as_f64(raw.cpuload.as_ref()).unwrap_or(0.0),
            uptime_secs: value_as_u64(raw.uptime.as_ref()).unwrap_or(0),
            memory_usage_pct: memory_usage(memory_total, memory_free),
            ram_usage_pct,
            memory_total,
            memory_free,
            hostname: value_as_string(raw.hostname.as_ref()).unwrap_or_default(),
            domainname: value_as_string(raw.domainname.as_ref()).unwrap_or_default(),
        }
    }
}

// ── Version ────────────────────────────────────────────────────────

impl From<RawVersion> for VersionInfo {
    fn from(raw: RawVersion) -> Self {
        let text = |v: Option<&Value>| value_as_string(v).unwrap_or_default();
        VersionInfo {
            firmware_version: text(raw.title.as_ref()),
            firmware_release: value_as_string(raw.release.as_ref()),
            firmware_branch: text(raw.sandbox.as_ref()),
            model: text(raw.model.as_ref()),
            device: text(raw.device.as_ref()),
            manufacturer: value_as_string(raw.manufacturer.as_ref())
                .unwrap_or_else(|| DEFAULT_MANUFACTURER.into()),
            hardware_version: text(raw.hw_version.as_ref()),
            hw_id: value_as_string(raw.hw_id.as_ref()),
            region: value_as_string(raw.region.as_ref()),
            arch: value_as_string(raw.arch.as_ref()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn memory_usage_rounds_to_one_decimal() {
        assert_eq!(memory_usage(1000, 250), 75.0);
        assert_eq!(memory_usage(3, 2), 33.3);
        assert_eq!(memory_usage(262_144, 131_072), 50.0);
    }

    #[test]
    fn memory_usage_rounds_ties_to_even() {
        assert_eq!(memory_usage(16, 15), 6.2);
        assert_eq!(memory_usage(400, 399), 0.2);
        assert_eq!(memory_usage(16, 14), 12.5);
        assert_eq!(ram_usage("1/16"), 6.2);
    }

    #[test]
    fn memory_usage_zero_total_is_zero() {
        assert_eq!(memory_usage(0, 0), 0.0);
        assert_eq!(memory_usage(0, 100), 0.0);
    }

    #[test]
    fn memory_usage_over_whole_range() {
        let total = 1024;
        for free in 0..=total {
            let expected = round1(to_f64(total - free) / to_f64(total) * 100.0);
            assert_eq!(memory_usage(total, free), expected);
        }
    }

    #[test]
    fn ram_usage_from_used_total_string() {
        assert_eq!(ram_usage("512/1024"), 50.0);
        assert_eq!(ram_usage(" 86116 / 262144 "), 32.9);
        assert_eq!(ram_usage("512/0"), 0.0);
        assert_eq!(ram_usage("garbage"), 0.0);
        assert_eq!(ram_usage(""), 0.0);
    }

    #[test]
    fn numeric_helpers_accept_strings_and_numbers() {
        assert_eq!(value_as_u64(Some(&json!(42))), Some(42));
        assert_eq!(value_as_u64(Some(&json!("42"))), Some(42));
        assert_eq!(value_as_u64(Some(&json!(" 7.9 "))), Some(7));
        assert_eq!(value_as_u64(Some(&json!(-1))), None);
        assert_eq!(value_as_u64(Some(&json!(null))), None);
        assert_eq!(value_as_u64(None), None);
        assert_eq!(value_as_f64(Some(&json!("-67.5"))), Some(-67.5));
    }

    #[test]
    fn bool_helper_accepts_router_flags() {
        assert_eq!(value_as_bool(Some(&json!(true))), Some(true));
        assert_eq!(value_as_bool(Some(&json!("yes"))), Some(true));
        assert_eq!(value_as_bool(Some(&json!("NO"))), Some(false));
        assert_eq!(value_as_bool(Some(&json!("down"))), Some(false));
        assert_eq!(value_as_bool(Some(&json!("maybe"))), None);
    }

    #[test]
    fn string_helpers() {
        assert_eq!(value_as_string(Some(&json!(""))), None);
        assert_eq!(value_as_string(Some(&json!(1000))), Some("1000".into()));
        assert_eq!(string_list(Some(&json!(["inet", "lan"]))), vec!["inet", "lan"]);
        assert_eq!(string_list(Some(&json!("inet"))), vec!["inet"]);
        assert!(string_list(None).is_empty());
    }

    #[test]
    fn system_metrics_from_raw() {
        let raw: RawSystem = serde_json::from_value(json!({
            "hostname": "Keenetic-1234",
            "domainname": "WORKGROUP",
            "cpuload": "12",
            "memtotal": 1000,
            "memfree": "250",
            "memory": "512/1024",
            "uptime": 3600
        }))
        .unwrap_or_default();

        let metrics = SystemMetrics::from(raw);
        assert_eq!(metrics.cpu_load, 12.0);
        assert_eq!(metrics.uptime_secs, 3600);
        assert_eq!(metrics.memory_usage_pct, 75.0);
        assert_eq!(metrics.ram_usage_pct, 50.0);
        assert_eq!(metrics.memory_free, 250);
        assert_eq!(metrics.hostname, "Keenetic-1234");
    }

    #[test]
    fn version_defaults_manufacturer() {
        let info = VersionInfo::from(RawVersion {
            title: Some(json!("4.1.7")),
            sandbox: Some(json!("stable")),
            model: Some(json!("Giga")),
            hw_version: Some(json!("10218000")),
            ..RawVersion::default()
        });
        assert_eq!(info.firmware_version, "4.1.7");
        assert_eq!(info.firmware_branch, "stable");
        assert_eq!(info.manufacturer, DEFAULT_MANUFACTURER);
        assert_eq!(info.hardware_version, "10218000");
        assert!(info.device.is_empty());
    }

    #[test]
    fn version_accepts_numeric_fields() {
        let raw: RawVersion = serde_json::from_value(json!({
            "title": "4.1.7",
            "model": "Giga",
            "manufacturer": "",
            "hw_version": 10_218_000,
            "region": 643,
            "arch": "mips"
        }))
        .unwrap();

        let info = VersionInfo::from(raw);
        assert_eq!(info.firmware_version, "4.1.7");
        assert_eq!(info.hardware_version, "10218000");
        assert_eq!(info.region.as_deref(), Some("643"));
        assert_eq!(info.arch.as_deref(), Some("mips"));
        assert_eq!(info.manufacturer, DEFAULT_MANUFACTURER);
        assert!(info.firmware_release.is_none());
    }
}
