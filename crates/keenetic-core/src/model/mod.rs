// ── Domain model ──
//
// Normalized snapshot types. Everything here is rebuilt from scratch on
// each poll cycle; nothing carries identity across cycles except `id`.

pub mod interface;
pub mod mesh;
pub mod snapshot;
pub mod system;

pub use interface::{
    EthernetDetails, InterfaceDetails, InterfaceKind, InterfaceMap, InterfaceRecord, LinkState,
    ModemDetails, WifiBand, WifiDetails,
};
pub use mesh::{MeshAttributes, MeshMap, MeshNodeRecord, MeshNodeStatus};
pub use snapshot::SystemSnapshot;
pub use system::{RouterIdentity, SystemMetrics, VersionInfo};
