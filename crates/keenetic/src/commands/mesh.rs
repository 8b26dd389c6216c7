//! Mesh node command handlers.

use tabled::Tabled;

use keenetic_core::{Controller, MeshNodeRecord};

use crate::cli::{GlobalOpts, MeshArgs, MeshCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MeshRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Internet")]
    internet: String,
}

impl MeshRow {
    fn new(n: &MeshNodeRecord, color: bool) -> Self {
        let a = &n.attributes;
        let firmware = match (&a.firmware, &a.firmware_available) {
            (Some(current), Some(available)) if current != available => {
                format!("{current} → {available}")
            }
            (current, _) => current.clone().unwrap_or_default(),
        };
        Self {
            mac: n.id.clone(),
            name: n.display_name().to_owned(),
            model: n.model.clone().unwrap_or_default(),
            ip: a.ip.clone().unwrap_or_default(),
            firmware,
            uptime: a.uptime_secs.map(util::format_uptime).unwrap_or_default(),
            internet: output::paint_state(
                a.internet_available,
                if a.internet_available { "yes" } else { "no" },
                color,
            ),
        }
    }
}

fn detail(n: &MeshNodeRecord) -> String {
    let a = &n.attributes;
    let mut lines = vec![
        format!("MAC:        {}", n.id),
        format!("Name:       {}", n.display_name()),
        format!("Model:      {}", util::or_dash(n.model.as_deref())),
        format!("Status:     {}", n.status),
        format!("IP:         {}", util::or_dash(a.ip.as_deref())),
        format!("Mode:       {}", util::or_dash(a.mode.as_deref())),
        format!("HW ID:      {}", util::or_dash(a.hw_id.as_deref())),
        format!("Firmware:   {}", util::or_dash(a.firmware.as_deref())),
        format!(
            "Available:  {}",
            util::or_dash(a.firmware_available.as_deref())
        ),
        format!("Memory:     {}", util::or_dash(a.memory.as_deref())),
        format!(
            "Uptime:     {}",
            a.uptime_secs
                .map_or_else(|| "-".into(), util::format_uptime)
        ),
        format!("Internet:   {}", a.internet_available),
        format!(
            "Cloud:      {}",
            util::or_dash(a.cloud_agent_state.as_deref())
        ),
    ];
    if !a.ports.is_empty() {
        lines.push(format!("Ports:      {}", a.ports.len()));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: MeshArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color());
    let snap = util::snapshot(controller).await?;

    match args.command {
        MeshCommand::List => {
            let nodes: Vec<MeshNodeRecord> = snap.mesh.into_values().collect();
            let out = output::render_list(
                global.output(),
                &nodes,
                |n| MeshRow::new(n, color),
                |n| n.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
        MeshCommand::Get { mac } => {
            let node = snap.mesh_node(&mac).ok_or_else(|| CliError::NotFound {
                resource_type: "mesh node".into(),
                identifier: mac.clone(),
                list_command: "mesh list".into(),
            })?;
            let out = output::render_single(global.output(), node, detail, |n| n.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
