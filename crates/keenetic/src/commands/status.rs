//! Router status summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use keenetic_core::{Controller, InterfaceKind, RouterIdentity, SystemSnapshot};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct StatusView {
    collected_at: DateTime<Utc>,
    #[serde(flatten)]
    identity: RouterIdentity,
    hostname: Option<String>,
    firmware_branch: Option<String>,
    uptime_secs: Option<u64>,
    memory_usage_pct: Option<f64>,
    ram_usage_pct: Option<f64>,
    interfaces: usize,
    interfaces_up: usize,
    access_points: usize,
    mesh_nodes: usize,
}

impl From<&SystemSnapshot> for StatusView {
    fn from(snap: &SystemSnapshot) -> Self {
        Self {
            collected_at: snap.collected_at,
            identity: RouterIdentity::from(snap),
            hostname: snap
                .system
                .as_ref()
                .map(|s| s.hostname.clone())
                .filter(|h| !h.is_empty()),
            firmware_branch: snap
                .version
                .as_ref()
                .map(|v| v.firmware_branch.clone())
                .filter(|b| !b.is_empty()),
            uptime_secs: snap.system.as_ref().map(|s| s.uptime_secs),
            memory_usage_pct: snap.system.as_ref().map(|s| s.memory_usage_pct),
            ram_usage_pct: snap.system.as_ref().map(|s| s.ram_usage_pct),
            interfaces: snap.interfaces.len(),
            interfaces_up: snap.interfaces.values().filter(|r| r.up).count(),
            access_points: snap.interfaces_of_kind(InterfaceKind::AccessPoint).count(),
            mesh_nodes: snap.mesh.len(),
        }
    }
}

fn detail(s: &StatusView) -> String {
    let firmware = match s.firmware_branch {
        Some(ref branch) => format!("{} ({branch})", s.identity.firmware_version),
        None => s.identity.firmware_version.clone(),
    };
    [
        format!("Router:     {} {}", s.identity.manufacturer, s.identity.model),
        format!("Device:     {}", s.identity.device),
        format!("Hostname:   {}", util::or_dash(s.hostname.as_deref())),
        format!("Firmware:   {firmware}"),
        format!("Hardware:   {}", s.identity.hardware_version),
        format!("CPU:        {:.0}%", s.identity.cpu_load),
        format!(
            "Memory:     {}",
            s.memory_usage_pct
                .map_or_else(|| "-".into(), |v| format!("{v:.1}%"))
        ),
        format!(
            "RAM:        {}",
            s.ram_usage_pct
                .map_or_else(|| "-".into(), |v| format!("{v:.1}%"))
        ),
        format!(
            "Uptime:     {}",
            s.uptime_secs
                .map_or_else(|| "-".into(), util::format_uptime)
        ),
        format!(
            "Interfaces: {} ({} up, {} access points)",
            s.interfaces, s.interfaces_up, s.access_points
        ),
        format!("Mesh nodes: {}", s.mesh_nodes),
    ]
    .join("\n")
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let snap = util::snapshot(controller).await?;
    let view = StatusView::from(&snap);
    let out = output::render_single(global.output(), &view, detail, |s| {
        s.hostname.clone().unwrap_or_else(|| s.identity.device.clone())
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn view() -> StatusView {
        StatusView {
            collected_at: Utc::now(),
            identity: RouterIdentity {
                device: "KN-1010".into(),
                manufacturer: "Keenetic".into(),
                model: "Giga".into(),
                firmware_version: "4.1.7".into(),
                hardware_version: "10218000".into(),
                cpu_load: 12.0,
            },
            hostname: Some("Keenetic-1234".into()),
            firmware_branch: Some("stable".into()),
            uptime_secs: Some(3_660),
            memory_usage_pct: Some(75.0),
            ram_usage_pct: Some(32.9),
            interfaces: 4,
            interfaces_up: 3,
            access_points: 2,
            mesh_nodes: 1,
        }
    }

    #[test]
    fn detail_shows_both_memory_figures() {
        let out = detail(&view());
        assert!(out.contains("Memory:     75.0%"));
        assert!(out.contains("RAM:        32.9%"));
        assert!(out.contains("Firmware:   4.1.7 (stable)"));
    }

    #[test]
    fn detail_dashes_missing_system_metrics() {
        let out = detail(&StatusView {
            memory_usage_pct: None,
            ram_usage_pct: None,
            uptime_secs: None,
            ..view()
        });
        assert!(out.contains("RAM:        -"));
        assert!(out.contains("Uptime:     -"));
    }
}
