// keenetic-api: Async Rust client for the Keenetic RCI management interface

pub mod auth;
pub mod decode;
pub mod error;
pub mod rci;
pub mod transport;

pub use auth::{AuthToken, Credentials};
pub use decode::{TextEncoding, decode_as, decode_body};
pub use error::Error;
pub use rci::RciClient;
pub use transport::TransportConfig;
