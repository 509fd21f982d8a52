//! Event Emitter - Dashboard Event Bus
//!
//! Lets the engines publish state changes to whatever view layer is attached.
//! Events without a listener are dropped.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::health::ServiceStatus;
use super::notify::Notice;
use super::upload::UploadPhase;

/// Event names
pub mod names {
    pub const UPLOAD_PHASE: &str = "upload:phase";
    pub const UPLOAD_PROGRESS: &str = "upload:progress";
    pub const RESULTS_REPLACED: &str = "results:replaced";
    pub const HEALTH_CHANGED: &str = "health:changed";
    pub const NOTICE: &str = "notice";
}

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    UploadPhase { phase: UploadPhase },
    UploadProgress { percent: u8 },
    ResultsReplaced { session_id: Uuid, total_rows: u64 },
    HealthChanged { status: ServiceStatus },
    Notice { notice: Notice },
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::UploadPhase { .. } => names::UPLOAD_PHASE,
            DashboardEvent::UploadProgress { .. } => names::UPLOAD_PROGRESS,
            DashboardEvent::ResultsReplaced { .. } => names::RESULTS_REPLACED,
            DashboardEvent::HealthChanged { .. } => names::HEALTH_CHANGED,
            DashboardEvent::Notice { .. } => names::NOTICE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    /// Emit event to all listeners
    pub fn emit(&self, event: DashboardEvent) {
        let name = event.name();
        if self.sender.send(event).is_err() {
            log::trace!("No listener for event '{}', dropped", name);
        }
    }
}
