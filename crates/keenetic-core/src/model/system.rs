// ── System and version domain types ──

use serde::{Deserialize, Serialize};

use super::snapshot::SystemSnapshot;

/// CPU, memory and uptime counters from `show system`.
///
/// The two memory percentages come from different raw fields and are
/// never derived from each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu_load: f64,
    pub uptime_secs: u64,
    /// `(memtotal - memfree) / memtotal`, percent.
    pub memory_usage_pct: f64,
    /// From the `"used/total"` RAM string, percent.
    pub ram_usage_pct: f64,
    /// KiB.
    pub memory_total: u64,
    /// KiB.
    pub memory_free: u64,
    pub hostname: String,
    pub domainname: String,
}

/// Firmware and hardware identity from `show version`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub firmware_version: String,
    pub firmware_release: Option<String>,
    pub firmware_branch: String,
    pub model: String,
    pub device: String,
    pub manufacturer: String,
    pub hardware_version: String,
    pub hw_id: Option<String>,
    pub region: Option<String>,
    pub arch: Option<String>,
}

/// Identity summary used when validating a newly configured router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterIdentity {
    pub device: String,
    pub manufacturer: String,
    pub model: String,
    pub firmware_version: String,
    pub hardware_version: String,
    pub cpu_load: f64,
}

impl From<&SystemSnapshot> for RouterIdentity {
    fn from(snapshot: &SystemSnapshot) -> Self {
        let version = snapshot.version.clone().unwrap_or_default();
        let or_router = |s: String| if s.is_empty() { "Router".to_owned() } else { s };
        Self {
            device: or_router(version.device),
            manufacturer: if version.manufacturer.is_empty() {
                crate::convert::DEFAULT_MANUFACTURER.to_owned()
            } else {
                version.manufacturer
            },
            model: or_router(version.model),
            firmware_version: version.firmware_version,
            hardware_version: version.hardware_version,
            cpu_load: snapshot.system.as_ref().map_or(0.0, |s| s.cpu_load),
        }
    }
}
