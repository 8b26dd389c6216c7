use thiserror::Error;

/// Top-level error type for the `keenetic-api` crate.
///
/// Covers authentication, transport, HTTP status and body-decoding
/// failures. `keenetic-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The auth check was rejected, or a data call came back 401.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// No session token is cached and re-authentication failed.
    #[error("Not authenticated -- router rejected the stored credentials")]
    Unauthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The router answered with a non-200 status on a data call.
    #[error("Router returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The body could not be parsed as JSON under any attempted encoding.
    ///
    /// `preview` holds a hex dump of at most the first 200 bytes.
    #[error("Malformed response: {message} (bytes: {preview})")]
    MalformedResponse { message: String, preview: String },

    /// The body was JSON but did not match the expected shape.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String },
}

impl Error {
    /// Returns `true` if this error indicates the session is no longer
    /// accepted and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Unauthenticated)
    }

    /// Returns `true` if this is a transient error worth retrying on the
    /// next poll cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
