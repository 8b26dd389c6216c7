// Keenetic RCI (Remote Control Interface) client
//
// `client` holds transport mechanics and session handling. Endpoint
// families live in sibling files as inherent methods on `RciClient`.

pub mod client;
pub mod command;
pub mod interface;
pub mod models;
pub mod system;

pub use client::RciClient;
pub use reqwest::{Method, StatusCode};
