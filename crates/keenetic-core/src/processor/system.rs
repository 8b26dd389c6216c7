// System/version processor
//
// One GET each for `show system` and `show version`. All arithmetic on
// the raw counters lives in `convert`.

use keenetic_api::RciClient;

use crate::error::CoreError;
use crate::model::{SystemMetrics, VersionInfo};

pub async fn fetch_system(client: &RciClient) -> Result<SystemMetrics, CoreError> {
    let raw = client.show_system().await?;
    Ok(SystemMetrics::from(raw))
}

pub async fn fetch_version(client: &RciClient) -> Result<VersionInfo, CoreError> {
    let raw = client.show_version().await?;
    Ok(VersionInfo::from(raw))
}
