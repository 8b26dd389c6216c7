//! SMS command handlers.

use keenetic_core::Controller;

use crate::cli::{GlobalOpts, SmsArgs, SmsCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &Controller,
    args: SmsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SmsCommand::Send { to, message } => {
            let response = controller.send_sms(&to, &message).await?;
            let interface = controller.config().mobile_interface.clone();
            let out = output::render_single(
                global.output(),
                &response,
                |_| format!("✓ SMS to {to} submitted via {interface}"),
                |_| to.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
