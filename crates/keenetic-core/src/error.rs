// ── Core error types ──
//
// Failures surfaced by keenetic-core. Subsystem failures inside a poll
// cycle never reach the caller; these are for setup-time authentication,
// explicit `try_snapshot` calls and control actions. The
// `From<keenetic_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Router request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Router request failed: {message}")]
    TransportFailure { status: Option<u16>, message: String },

    #[error("Malformed router response: {message} (bytes: {preview})")]
    MalformedResponse { message: String, preview: String },

    #[error("Poll cycle produced no usable data")]
    EmptySnapshot,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<keenetic_api::Error> for CoreError {
    fn from(err: keenetic_api::Error) -> Self {
        match err {
            keenetic_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            keenetic_api::Error::Unauthenticated => CoreError::AuthenticationFailed {
                message: "router rejected the configured credentials".into(),
            },
            keenetic_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::TransportFailure {
                        status: e.status().map(|s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            keenetic_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid router URL: {e}"),
            },
            keenetic_api::Error::Status { status, path } => CoreError::TransportFailure {
                status: Some(status),
                message: format!("HTTP {status} for {path}"),
            },
            keenetic_api::Error::MalformedResponse { message, preview } => {
                CoreError::MalformedResponse { message, preview }
            }
            keenetic_api::Error::Deserialization { message } => CoreError::MalformedResponse {
                message,
                preview: String::new(),
            },
        }
    }
}
