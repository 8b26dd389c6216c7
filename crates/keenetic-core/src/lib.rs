// keenetic-core: Normalized router snapshot between keenetic-api and consumers (CLI).

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod processor;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::RouterConfig;
pub use controller::Controller;
pub use error::CoreError;
pub use processor::{ProcessContext, Processor, merge_interfaces};

pub use model::{
    EthernetDetails, InterfaceDetails, InterfaceKind, InterfaceMap, InterfaceRecord, LinkState,
    MeshAttributes, MeshMap, MeshNodeRecord, MeshNodeStatus, ModemDetails, RouterIdentity,
    SystemMetrics, SystemSnapshot, VersionInfo, WifiBand, WifiDetails,
};
