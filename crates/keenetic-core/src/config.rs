// ── Runtime connection configuration ──
//
// Describes how to reach one router and which optional subsystems to
// poll. Never touches disk: the CLI builds a `RouterConfig` from a
// profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use keenetic_api::{Credentials, TransportConfig};

pub const DEFAULT_HOST: &str = "192.168.1.1";
pub const DEFAULT_PORT: u16 = 81;
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_MOBILE_INTERFACE: &str = "UsbLte0";
pub const DEFAULT_USB_MODEM_INTERFACE: &str = "UsbModem0";

/// Configuration for connecting to a single router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Hostname or IP, optionally with an `http://` scheme.
    pub host: String,
    /// Management port (factory default 81).
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Poll mesh (Wi-Fi system) members.
    pub enable_mesh: bool,
    /// Cellular modem interface polled as kind `mobile`; also used for SMS.
    pub mobile_interface: String,
    /// USB modem interface polled as kind `usb-modem`.
    pub usb_modem_interface: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.into(),
            password: SecretString::from(String::new()),
            timeout: Duration::from_secs(30),
            enable_mesh: true,
            mobile_interface: DEFAULT_MOBILE_INTERFACE.into(),
            usb_modem_interface: DEFAULT_USB_MODEM_INTERFACE.into(),
        }
    }
}

impl RouterConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.host.clone(),
            self.port,
            self.username.clone(),
            self.password.clone(),
        )
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(self.timeout)
    }
}
