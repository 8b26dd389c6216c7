// RCI HTTP client
//
// Wraps `reqwest::Client` with Basic-auth session handling, URL
// construction and resilient body decoding. Endpoint modules (system,
// interface, command) are implemented as inherent methods in separate
// files to keep this module focused on transport mechanics.

use std::sync::{PoisonError, RwLock};

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::auth::{AuthToken, Credentials};
use crate::decode::decode_body;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Always-available endpoint used to validate credentials.
const AUTH_CHECK_PATH: &str = "rci/";

/// Raw HTTP client for one router's RCI interface.
///
/// The cached [`AuthToken`] is the only mutable state. It is set by a
/// successful auth check, cleared by any failed check or a 401 on a data call,
/// and derived again lazily by the next call that finds it missing.
pub struct RciClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    session: RwLock<Option<AuthToken>>,
}

impl RciClient {
    /// Create a client from credentials and a `TransportConfig`.
    pub fn new(credentials: Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, credentials)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, credentials: Credentials) -> Result<Self, Error> {
        let base_url = credentials.base_url()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            session: RwLock::new(None),
        })
    }

    /// The router base URL (`http://host:port/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Whether a session token is currently cached.
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drop the cached token. The next call authenticates again.
    pub fn invalidate(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached_token(&self) -> Option<AuthToken> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_token(&self, token: AuthToken) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Check `GET /rci/` with a freshly derived token.
    ///
    /// HTTP 200 caches the token. Any other status, or a network failure,
    /// clears it. Never retries.
    pub async fn login(&self) -> Result<(), Error> {
        let token = AuthToken::derive(&self.credentials);
        let url = self.rci_url(AUTH_CHECK_PATH)?;
        debug!("probing credentials at {}", url);

        let result = self
            .http
            .get(url)
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                self.invalidate();
                return Err(Error::Transport(e));
            }
        };

        let status = resp.status();
        if status != StatusCode::OK {
            self.invalidate();
            return Err(Error::Authentication {
                message: format!("auth check returned HTTP {status}"),
            });
        }

        self.store_token(token);
        info!(router = %self.base_url, user = %self.credentials.username, "authenticated");
        Ok(())
    }

    /// [`login`](Self::login) collapsed to a success flag.
    pub async fn authenticate(&self) -> bool {
        match self.login().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "authentication failed");
                false
            }
        }
    }

    /// Return the cached token, authenticating first if none is present.
    async fn ensure_session(&self) -> Result<AuthToken, Error> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }
        if !self.authenticate().await {
            return Err(Error::Unauthenticated);
        }
        self.cached_token().ok_or(Error::Unauthenticated)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve a management path (`rci/show/system` or `/rci/show/system`)
    /// against the base URL.
    pub(crate) fn rci_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue an authenticated call and decode the JSON body.
    ///
    /// Without a cached token one authentication attempt is made first; if
    /// it fails the original request is never sent. Any non-200 status is
    /// an error carrying that status.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let url = self.rci_url(path)?;
        self.execute(method, url, body).await
    }

    /// `GET` a management path.
    pub async fn get(&self, path: &str) -> Result<Value, Error> {
        self.request(Method::GET, path, None).await
    }

    /// `POST` a JSON body to a management path.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, Error> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Issue an authenticated call and return only the status code.
    ///
    /// Used by control actions, where the body carries nothing the caller
    /// acts on.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<StatusCode, Error> {
        let url = self.rci_url(path)?;
        let resp = self.dispatch(method, url, body).await?;
        Ok(resp.status())
    }

    pub(crate) async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let path = url.path().to_owned();
        let resp = self.dispatch(method, url, body).await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("session rejected for {path}"),
            });
        }
        if status != StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                path,
            });
        }

        let bytes = resp.bytes().await?;
        trace!(path = %path, len = bytes.len(), "response body");
        decode_body(&bytes)
    }

    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let token = self.ensure_session().await?;
        debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, token.header_value());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            debug!("router answered 401, dropping session");
            self.invalidate();
        }
        Ok(resp)
    }
}
