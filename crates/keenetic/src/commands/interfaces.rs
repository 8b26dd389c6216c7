//! Interface command handlers.

use tabled::Tabled;

use keenetic_core::{Controller, InterfaceDetails, InterfaceRecord};

use crate::cli::{GlobalOpts, InterfacesArgs, InterfacesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Details")]
    summary: String,
}

impl InterfaceRow {
    fn new(r: &InterfaceRecord, color: bool) -> Self {
        Self {
            id: r.id.clone(),
            kind: r.kind.to_string(),
            name: r.display_name().to_owned(),
            link: output::paint_state(r.link.is_up(), &r.link.to_string(), color),
            summary: summary(r),
        }
    }
}

/// One-line, kind-specific summary for the table view.
fn summary(r: &InterfaceRecord) -> String {
    match &r.details {
        InterfaceDetails::Ethernet(e) => {
            let mut parts = Vec::new();
            if let Some(speed) = e.speed_mbps {
                parts.push(format!("{speed} Mbps"));
            }
            if let Some(ref duplex) = e.duplex {
                parts.push(duplex.clone());
            }
            if let (Some(rx), Some(tx)) = (e.rx_bytes, e.tx_bytes) {
                parts.push(format!(
                    "rx {} / tx {}",
                    util::format_bytes(rx),
                    util::format_bytes(tx)
                ));
            }
            parts.join(", ")
        }
        InterfaceDetails::Wifi(w) => format!("{} \"{}\" {}", w.band, w.ssid, w.encryption.join("/")),
        InterfaceDetails::Modem(m) => {
            let mut parts: Vec<String> = [m.operator.clone(), m.technology.clone()]
                .into_iter()
                .flatten()
                .collect();
            if let Some(rssi) = m.rssi {
                parts.push(format!("rssi {rssi:.0} dBm"));
            }
            parts.join(", ")
        }
    }
}

fn detail(r: &InterfaceRecord) -> String {
    let mut lines = vec![
        format!("ID:          {}", r.id),
        format!("Type:        {}", r.kind),
        format!("Name:        {}", r.display_name()),
        format!("Link:        {}", r.link),
        format!("Up:          {}", r.up),
    ];
    match &r.details {
        InterfaceDetails::Ethernet(e) => {
            lines.push(format!("MAC:         {}", util::or_dash(e.mac.as_deref())));
            lines.push(format!(
                "Speed:       {}",
                e.speed_mbps
                    .map_or_else(|| "-".into(), |s| format!("{s} Mbps"))
            ));
            lines.push(format!("Duplex:      {}", util::or_dash(e.duplex.as_deref())));
            if !e.role.is_empty() {
                lines.push(format!("Role:        {}", e.role.join(", ")));
            }
            lines.push(format!(
                "RX:          {}",
                e.rx_bytes.map_or_else(|| "-".into(), util::format_bytes)
            ));
            lines.push(format!(
                "TX:          {}",
                e.tx_bytes.map_or_else(|| "-".into(), util::format_bytes)
            ));
        }
        InterfaceDetails::Wifi(w) => {
            lines.push(format!("Band:        {}", w.band));
            lines.push(format!("SSID:        {}", w.ssid));
            lines.push(format!("MAC:         {}", util::or_dash(w.mac.as_deref())));
            lines.push(format!(
                "Radio:       {}",
                util::or_dash(w.interface_name.as_deref())
            ));
            lines.push(format!("State:       {}", w.state));
            lines.push(format!("Connected:   {}", w.connected));
            if !w.encryption.is_empty() {
                lines.push(format!("Encryption:  {}", w.encryption.join(", ")));
            }
        }
        InterfaceDetails::Modem(m) => {
            lines.push(format!("Operator:    {}", util::or_dash(m.operator.as_deref())));
            lines.push(format!(
                "Technology:  {}",
                util::or_dash(m.technology.as_deref())
            ));
            lines.push(format!(
                "State:       {}",
                util::or_dash(m.connection_state.as_deref())
            ));
            lines.push(format!("RSSI:        {}", util::or_dash(m.rssi)));
            lines.push(format!("RSRP:        {}", util::or_dash(m.rsrp)));
            lines.push(format!("RSRQ:        {}", util::or_dash(m.rsrq)));
            lines.push(format!("SINR:        {}", util::or_dash(m.sinr)));
            lines.push(format!("Band:        {}", util::or_dash(m.band.as_deref())));
            lines.push(format!("Cell:        {}", util::or_dash(m.cell_id.as_deref())));
            lines.push(format!("SIM:         {}", util::or_dash(m.sim.as_deref())));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color());
    let snap = util::snapshot(controller).await?;

    match args.command {
        InterfacesCommand::List { kind } => {
            let records: Vec<InterfaceRecord> = snap
                .interfaces
                .into_values()
                .filter(|r| kind.is_none_or(|k| r.kind == k))
                .collect();
            let out = output::render_list(
                global.output(),
                &records,
                |r| InterfaceRow::new(r, color),
                |r| r.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
        InterfacesCommand::Get { id } => {
            let record = snap.interface(&id).ok_or_else(|| CliError::NotFound {
                resource_type: "interface".into(),
                identifier: id.clone(),
                list_command: "interfaces list".into(),
            })?;
            let out = output::render_single(global.output(), record, detail, |r| r.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
