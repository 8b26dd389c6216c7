// Router credentials and the Basic-auth session token derived from them.
//
// The token is a pure function of the credentials. `RciClient` caches it
// after a successful auth check and drops it on 401; deriving it again is
// cheap and has no side effects.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Connection credentials for one router. Immutable for the lifetime of
/// an `RciClient`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
        }
    }

    /// Root URL of the management interface, e.g. `http://192.168.1.1:81/`.
    ///
    /// A host that already carries a scheme keeps it; the port always
    /// comes from the credentials.
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = self.host.trim().trim_end_matches('/');
        let raw = if host.contains("://") {
            host.to_owned()
        } else {
            format!("http://{host}")
        };
        let mut url = Url::parse(&raw)?;
        url.set_port(Some(self.port))
            .map_err(|()| Error::InvalidUrl(url::ParseError::InvalidPort))?;
        url.set_path("/");
        Ok(url)
    }
}

/// Opaque Basic-auth token: `base64(username:password)`.
#[derive(Debug, Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// Derive the token from credentials.
    pub fn derive(credentials: &Credentials) -> Self {
        let raw = format!(
            "{}:{}",
            credentials.username,
            credentials.password.expose_secret()
        );
        Self(SecretString::from(STANDARD.encode(raw)))
    }

    /// Value for the `Authorization` header.
    pub(crate) fn header_value(&self) -> String {
        format!("Basic {}", self.0.expose_secret())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn creds(host: &str) -> Credentials {
        Credentials::new(host, 81, "admin", SecretString::from("secret".to_owned()))
    }

    #[test]
    fn token_is_base64_of_user_and_password() {
        let token = AuthToken::derive(&creds("192.168.1.1"));
        assert_eq!(token.expose(), "YWRtaW46c2VjcmV0");
        assert_eq!(token.header_value(), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn base_url_adds_scheme_and_port() {
        let url = creds("192.168.1.1").base_url().unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.1:81/");
    }

    #[test]
    fn base_url_keeps_explicit_scheme() {
        let url = creds("https://router.lan/").base_url().unwrap();
        assert_eq!(url.as_str(), "https://router.lan:81/");
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", creds("router.lan"));
        assert!(!rendered.contains("secret"));
    }
}
