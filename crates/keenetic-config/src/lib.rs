//! Configuration for Keenetic tools.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), and
//! translation to `keenetic_core::RouterConfig`. The CLI layers its
//! flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use keenetic_core::RouterConfig;
use keenetic_core::config::{
    DEFAULT_HOST, DEFAULT_MOBILE_INTERFACE, DEFAULT_PORT, DEFAULT_USB_MODEM_INTERFACE,
    DEFAULT_USERNAME,
};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "keenetic";

/// Environment variable consulted for the password after `password_env`.
pub const PASSWORD_ENV: &str = "KEENETIC_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile, falling back to `default_profile` when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into());
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile)),
            None => Err(ConfigError::ProfileNotFound { name }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named router profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Router address (e.g., "192.168.1.1" or "http://router.lan").
    #[serde(default = "default_host")]
    pub host: String,

    /// Management port.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    /// Plaintext password; prefer the keyring or `password_env`.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Poll mesh member nodes.
    #[serde(default = "default_true")]
    pub enable_mesh: bool,

    #[serde(default = "default_mobile_interface")]
    pub mobile_interface: String,

    #[serde(default = "default_usb_modem_interface")]
    pub usb_modem_interface: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: None,
            password_env: None,
            timeout: None,
            enable_mesh: true,
            mobile_interface: default_mobile_interface(),
            usb_modem_interface: default_usb_modem_interface(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_username() -> String {
    DEFAULT_USERNAME.into()
}
fn default_true() -> bool {
    true
}
fn default_mobile_interface() -> String {
    DEFAULT_MOBILE_INTERFACE.into()
}
fn default_usb_modem_interface() -> String {
    DEFAULT_USB_MODEM_INTERFACE.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "keenetic", "keenetic").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("keenetic");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if present), then `KEENETIC_*` variables
/// (`KEENETIC_DEFAULTS__OUTPUT=json`, `KEENETIC_PROFILES__HOME__PORT=80`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("KEENETIC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Validation ──────────────────────────────────────────────────────

pub fn validate_profile(profile: &Profile) -> Result<(), ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }
    if profile.port == 0 {
        return Err(ConfigError::Validation {
            field: "port".into(),
            reason: "must be between 1 and 65535".into(),
        });
    }
    if profile.username.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "username".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the router password.
///
/// Order: the profile's `password_env` variable, `KEENETIC_PASSWORD`,
/// the system keyring, then plaintext in the profile.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

// ── Translation to RouterConfig ─────────────────────────────────────

/// Build a `RouterConfig` from a profile and an already-resolved password.
///
/// `default_timeout` applies when the profile does not set its own.
pub fn router_config(
    profile: &Profile,
    password: SecretString,
    default_timeout: u64,
) -> Result<RouterConfig, ConfigError> {
    validate_profile(profile)?;
    Ok(RouterConfig {
        host: profile.host.trim().to_owned(),
        port: profile.port,
        username: profile.username.clone(),
        password,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(default_timeout)),
        enable_mesh: profile.enable_mesh,
        mobile_interface: profile.mobile_interface.clone(),
        usb_modem_interface: profile.usb_modem_interface.clone(),
    })
}

/// Build a `RouterConfig` from a profile alone, without CLI flag overrides.
pub fn profile_to_router_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<RouterConfig, ConfigError> {
    let password = resolve_password(profile, profile_name)?;
    router_config(profile, password, default_timeout())
}
