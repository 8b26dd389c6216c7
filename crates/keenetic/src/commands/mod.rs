//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod config_cmd;
pub mod control;
pub mod interfaces;
pub mod mesh;
pub mod sms;
pub mod status;
pub mod util;

use keenetic_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(controller, global).await,
        Command::Interfaces(args) => interfaces::handle(controller, args, global).await,
        Command::Mesh(args) => mesh::handle(controller, args, global).await,
        Command::Enable(target) => control::handle(controller, &target.id, true, global).await,
        Command::Disable(target) => control::handle(controller, &target.id, false, global).await,
        Command::Sms(args) => sms::handle(controller, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not talk to the router".into(),
        }),
    }
}
