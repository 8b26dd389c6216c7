//! Interface up/down.

use keenetic_core::Controller;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(
    controller: &Controller,
    id: &str,
    enabled: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = if enabled { "enable" } else { "disable" };

    if !controller.set_radio_enabled(id, enabled).await {
        return Err(CliError::ActionFailed {
            action: action.into(),
            id: id.into(),
        });
    }

    if !global.quiet {
        eprintln!("✓ {id}: {action} accepted by the router");
    }
    Ok(())
}
