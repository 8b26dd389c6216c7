//! Profile resolution: config file + CLI flags → `RouterConfig`.
//!
//! File loading and password lookup live in `keenetic-config`; this module
//! only layers the global flags on top.

use secrecy::SecretString;

use keenetic_config::{Config, ConfigError, Profile};
use keenetic_core::RouterConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use keenetic_config::{config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build a `RouterConfig` from the config file, active profile, and flags.
///
/// An explicitly requested profile must exist. Without one, a missing
/// profile falls back to factory defaults so `--host`/`KEENETIC_PASSWORD`
/// alone are enough.
pub fn resolve_router_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<(String, RouterConfig), CliError> {
    let (profile_name, mut profile) = match config.profile(global.profile.as_deref()) {
        Ok((name, p)) => (name, p.clone()),
        Err(ConfigError::ProfileNotFound { name }) if global.profile.is_none() => {
            (name, Profile::default())
        }
        Err(ConfigError::ProfileNotFound { name }) => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        Err(e) => return Err(e.into()),
    };

    // Flag > env > profile
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(port) = global.port {
        profile.port = port;
    }
    if let Some(ref username) = global.username {
        profile.username.clone_from(username);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => keenetic_config::resolve_password(&profile, &profile_name)?,
    };

    let router = keenetic_config::router_config(&profile, password, config.defaults.timeout)?;
    Ok((profile_name, router))
}
