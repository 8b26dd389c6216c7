//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};
use secrecy::SecretString;

use keenetic_config::{Config, Defaults, Profile};
use keenetic_core::Controller;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                if p.password.is_some() {
                    p.password = Some(MASK.into());
                }
                (name.clone(), p)
            })
            .collect(),
    }
}

/// Format an already-redacted config for display.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        let _ = writeln!(out, "port = {}", p.port);
        let _ = writeln!(out, "username = \"{}\"", p.username);
        if let Some(ref pw) = p.password {
            let _ = writeln!(out, "password = \"{pw}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        let _ = writeln!(out, "enable_mesh = {}", p.enable_mesh);
        let _ = writeln!(out, "mobile_interface = \"{}\"", p.mobile_interface);
        let _ = writeln!(out, "usb_modem_interface = \"{}\"", p.usb_modem_interface);
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_password() -> Result<String, CliError> {
    let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(pass)
}

/// Offer keyring storage. Returns `Some(password)` if the user chose plaintext.
fn prompt_keyring_storage(password: &str, profile_name: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        keenetic_config::store_password(profile_name, password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password.to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global).await,

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(global.output(), &cfg, format_config, |c| {
                c.default_profile.clone().unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let password = prompt_password()?;
            keenetic_config::store_password(&profile_name, &password)?;
            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

async fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("Keenetic CLI configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config_or_default();
    let defaults = Profile::default();

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Router address
    let host: String = Input::new()
        .with_prompt("Router host")
        .default(defaults.host.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let port: u16 = Input::new()
        .with_prompt("Management port")
        .default(defaults.port)
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Credentials
    let username: String = Input::new()
        .with_prompt("Username")
        .default(defaults.username.clone())
        .interact_text()
        .map_err(prompt_err)?;

    let password = prompt_password()?;
    let stored = prompt_keyring_storage(&password, &profile_name)?;

    // 4. Optional subsystems
    let enable_mesh = Confirm::new()
        .with_prompt("Poll mesh (Wi-Fi system) nodes?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    let profile = Profile {
        host,
        port,
        username,
        password: stored,
        enable_mesh,
        ..defaults
    };
    keenetic_config::validate_profile(&profile)?;

    // 5. Write config
    let make_default = cfg.profiles.is_empty()
        || cfg
            .default_profile
            .as_ref()
            .is_none_or(|d| !cfg.profiles.contains_key(d))
        || Confirm::new()
            .with_prompt(format!("Make '{profile_name}' the default profile?"))
            .default(false)
            .interact()
            .map_err(prompt_err)?;

    cfg.profiles.insert(profile_name.clone(), profile.clone());
    if make_default {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Profile: {profile_name}");

    // 6. Optional connection test
    let test = Confirm::new()
        .with_prompt("Test the connection now?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;
    if !test {
        eprintln!("\n  Test it later: keenetic --profile {profile_name} status");
        return Ok(());
    }

    let router = keenetic_config::router_config(
        &profile,
        SecretString::from(password),
        cfg.defaults.timeout,
    )?;
    let controller = Controller::new(router)?;
    let identity = controller
        .validate()
        .await
        .map_err(|e| CliError::from(e).for_profile(&profile_name))?;

    eprintln!(
        "✓ Connected to {} {} ({}), firmware {}",
        identity.manufacturer, identity.model, identity.device, identity.firmware_version
    );
    Ok(())
}
