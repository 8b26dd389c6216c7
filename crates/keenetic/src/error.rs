//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use keenetic_config::ConfigError;
use keenetic_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to router at {url}")]
    #[diagnostic(
        code(keenetic::connection_failed),
        help(
            "Check that the router is reachable and the management port is right.\n\
             Reason: {reason}\n\
             Try: keenetic --host 192.168.1.1 --port 81 status"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(keenetic::auth_failed),
        help(
            "The router rejected the username/password.\n\
             Run: keenetic config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(keenetic::no_credentials),
        help(
            "Configure a profile with: keenetic config init\n\
             Or set the KEENETIC_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(keenetic::not_found),
        help("Run: keenetic {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Router ───────────────────────────────────────────────────────
    #[error("Router error: {message}")]
    #[diagnostic(code(keenetic::router))]
    Router { message: String },

    #[error("Router did not accept '{action}' for {id}")]
    #[diagnostic(
        code(keenetic::action_failed),
        help("Check the interface id with: keenetic interfaces list")
    )]
    ActionFailed { action: String, id: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(keenetic::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(keenetic::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: keenetic config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(keenetic::config))]
    Config { message: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(keenetic::timeout),
        help("Increase timeout with --timeout or check router responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to an authentication failure.
    pub fn for_profile(self, profile_name: &str) -> Self {
        match self {
            Self::AuthFailed { .. } => Self::AuthFailed {
                profile: profile_name.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message: _ } => CliError::AuthFailed {
                profile: "default".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::InvalidInput { field, reason } => CliError::Validation { field, reason },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::TransportFailure { message, .. }
            | CoreError::MalformedResponse { message, .. } => CliError::Router { message },

            CoreError::EmptySnapshot => CliError::Router {
                message: "the router returned no usable data".into(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
