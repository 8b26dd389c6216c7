// ── Controller ──
//
// Owns the RCI client for one router. Runs a poll cycle on demand and
// issues control actions. There is no background task and no retained
// state besides the client's session token: scheduling and keeping the
// last good snapshot belong to the caller.

use serde_json::Value;
use tracing::{debug, info, warn};

use keenetic_api::RciClient;
use keenetic_api::rci::StatusCode;

use crate::config::RouterConfig;
use crate::error::CoreError;
use crate::model::{InterfaceMap, MeshMap, RouterIdentity, SystemSnapshot};
use crate::processor::system::{fetch_system, fetch_version};
use crate::processor::{
    EthernetProcessor, ModemProcessor, ProcessContext, Processor, WifiProcessor,
    merge_interfaces, process_mesh,
};

/// The main entry point for consumers.
pub struct Controller {
    config: RouterConfig,
    client: RciClient,
}

impl Controller {
    /// Build a controller. Does NOT contact the router; call
    /// [`connect()`](Self::connect) or go straight to a snapshot.
    pub fn new(config: RouterConfig) -> Result<Self, CoreError> {
        let client = RciClient::new(config.credentials(), &config.transport())?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The underlying RCI client, for raw calls.
    pub fn client(&self) -> &RciClient {
        &self.client
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Authenticate against the router.
    ///
    /// This is the one failure surfaced as a hard error: without working
    /// credentials no cycle can ever succeed.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.client.login().await.map_err(|e| self.core_error(e))?;
        info!(router = %self.client.base_url(), "connected to router");
        Ok(())
    }

    /// Authenticate and run one cycle that must produce data.
    ///
    /// Used by setup flows to confirm that a newly entered host and
    /// credentials point at a working router.
    pub async fn validate(&self) -> Result<RouterIdentity, CoreError> {
        self.connect().await?;
        let snapshot = self.try_snapshot().await?;
        Ok(RouterIdentity::from(&snapshot))
    }

    // ── Poll cycle ───────────────────────────────────────────────

    /// Run one poll cycle. Never fails: total failure yields an empty
    /// snapshot, which callers treat as "no update".
    pub async fn snapshot(&self) -> SystemSnapshot {
        match self.try_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "poll cycle failed, returning empty snapshot");
                SystemSnapshot::empty()
            }
        }
    }

    /// Run one poll cycle, reporting total failure as an error.
    ///
    /// Individual subsystems that fail are logged and left empty.
    /// Only a failed authentication or a cycle with no data at all is an
    /// error.
    pub async fn try_snapshot(&self) -> Result<SystemSnapshot, CoreError> {
        if !self.client.is_authenticated() && !self.client.authenticate().await {
            return Err(CoreError::AuthenticationFailed {
                message: "router rejected the configured credentials".into(),
            });
        }

        let client = &self.client;
        let (system_res, version_res, tree_res, mesh_res) = tokio::join!(
            fetch_system(client),
            fetch_version(client),
            client.show_interfaces(),
            self.fetch_mesh(),
        );

        let system = degrade("system", system_res);
        let version = degrade("version", version_res);
        let ctx = ProcessContext {
            interfaces: degrade("interface status", tree_res.map_err(CoreError::from))
                .unwrap_or_default(),
        };
        let mesh = degrade("mesh", mesh_res).map_or_else(MeshMap::new, |members| {
            process_mesh(&members)
        });

        let interfaces = self.run_processors(&ctx).await;

        let snapshot = SystemSnapshot {
            collected_at: chrono::Utc::now(),
            system,
            version,
            interfaces,
            mesh,
        };

        if snapshot.is_empty() {
            return Err(CoreError::EmptySnapshot);
        }

        info!(
            interfaces = snapshot.interfaces.len(),
            mesh_nodes = snapshot.mesh.len(),
            "poll cycle complete"
        );
        Ok(snapshot)
    }

    /// Processors in the order their results are merged.
    fn processors(&self) -> Vec<Box<dyn Processor>> {
        vec![
            Box::new(EthernetProcessor),
            Box::new(WifiProcessor),
            Box::new(ModemProcessor::mobile(self.config.mobile_interface.clone())),
            Box::new(ModemProcessor::usb_modem(
                self.config.usb_modem_interface.clone(),
            )),
        ]
    }

    async fn run_processors(&self, ctx: &ProcessContext) -> InterfaceMap {
        let mut interfaces = InterfaceMap::new();
        for processor in self.processors() {
            match processor.process(&self.client, ctx).await {
                Ok(records) => {
                    debug!(processor = processor.name(), count = records.len(), "processor done");
                    for id in merge_interfaces(&mut interfaces, records) {
                        warn!(
                            processor = processor.name(),
                            interface = %id,
                            "duplicate interface id, keeping the earlier record"
                        );
                    }
                }
                Err(e) => {
                    warn!(processor = processor.name(), error = %e, "subsystem unavailable");
                }
            }
        }
        interfaces
    }

    async fn fetch_mesh(&self) -> Result<Vec<Value>, CoreError> {
        if !self.config.enable_mesh {
            debug!("mesh polling disabled");
            return Ok(Vec::new());
        }
        Ok(self.client.mesh_members().await?)
    }

    // ── Control actions ──────────────────────────────────────────

    /// Bring an access point (or modem interface) up or down.
    ///
    /// `true` only if the router answered HTTP 200. The router applies the
    /// change asynchronously, so callers should poll again to confirm.
    pub async fn set_radio_enabled(&self, id: &str, enabled: bool) -> bool {
        match self.client.set_interface_state(id, enabled).await {
            Ok(StatusCode::OK) => {
                info!(interface = id, enabled, "interface state change accepted");
                true
            }
            Ok(status) => {
                warn!(interface = id, enabled, %status, "router refused interface state change");
                false
            }
            Err(e) => {
                warn!(interface = id, enabled, error = %e, "interface state change failed");
                false
            }
        }
    }

    pub async fn enable(&self, id: &str) -> bool {
        self.set_radio_enabled(id, true).await
    }

    pub async fn disable(&self, id: &str) -> bool {
        self.set_radio_enabled(id, false).await
    }

    /// Send an SMS through the configured mobile interface.
    pub async fn send_sms(&self, to: &str, message: &str) -> Result<Value, CoreError> {
        if to.trim().is_empty() {
            return Err(CoreError::InvalidInput {
                field: "recipient".into(),
                reason: "must not be empty".into(),
            });
        }
        if message.trim().is_empty() {
            return Err(CoreError::InvalidInput {
                field: "message".into(),
                reason: "must not be empty".into(),
            });
        }

        let response = self
            .client
            .send_sms(&self.config.mobile_interface, to, message)
            .await
            .map_err(|e| self.core_error(e))?;
        info!(interface = %self.config.mobile_interface, "sms submitted");
        Ok(response)
    }

    // ── Helpers ──────────────────────────────────────────────────

    /// Translate an API error, filling in the configured timeout.
    fn core_error(&self, err: keenetic_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

/// Log a failed subsystem and carry on without it.
fn degrade<T>(subsystem: &str, result: Result<T, CoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(subsystem, error = %e, "subsystem unavailable");
            None
        }
    }
}
