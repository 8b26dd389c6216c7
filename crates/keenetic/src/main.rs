mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keenetic_core::Controller;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;
    let cfg = config::load_config_or_default();
    global.apply_defaults(&cfg.defaults);

    match command {
        // Config commands don't need a router connection
        Command::Config(args) => commands::config_cmd::handle(args, &global).await,

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "keenetic", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the router
        cmd => {
            let (profile_name, router_config) = config::resolve_router_config(&global, &cfg)?;
            tracing::debug!(
                profile = %profile_name,
                host = %router_config.host,
                port = router_config.port,
                "resolved router profile"
            );
            let controller = Controller::new(router_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &controller, &global)
                .await
                .map_err(|e| e.for_profile(&profile_name))
        }
    }
}
