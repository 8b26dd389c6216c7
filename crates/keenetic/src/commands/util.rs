//! Shared helpers for command handlers.

use keenetic_core::{Controller, SystemSnapshot};

use crate::error::CliError;

/// Run one poll cycle, surfacing authentication and empty-result failures.
pub async fn snapshot(controller: &Controller) -> Result<SystemSnapshot, CliError> {
    Ok(controller.try_snapshot().await?)
}

/// `1d 2h 3m`, dropping leading zero units.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    match (days, hours) {
        (0, 0) => format!("{minutes}m"),
        (0, _) => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h {minutes}m"),
    }
}

/// Human-readable byte count (binary units).
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// `-` for missing values in detail views.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
