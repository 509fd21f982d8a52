//! Health Monitor
//!
//! Fire-and-forget liveness probe against `GET /health` on a fixed interval.
//! Any 2xx is online; timeouts, non-2xx and network errors are offline.
//! The probe task lives exactly as long as its `HealthMonitor` handle.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::events::{DashboardEvent, EventBus};
use super::service::{ClassifierClient, HealthResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
    Offline,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Online => "ONLINE",
            ServiceStatus::Offline => "OFFLINE",
        }
    }
}

/// Probe once
pub async fn probe(client: &ClassifierClient) -> (ServiceStatus, Option<HealthResponse>) {
    match client.health_check().await {
        Ok(health) => (ServiceStatus::Online, Some(health)),
        Err(e) => {
            log::debug!("Health probe failed: {}", e);
            (ServiceStatus::Offline, None)
        }
    }
}

pub struct HealthMonitor {
    status: watch::Receiver<ServiceStatus>,
    last_health: Arc<RwLock<Option<HealthResponse>>>,
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Start probing now and then every `interval`. Must run inside a tokio runtime.
    pub fn spawn(client: ClassifierClient, interval: Duration, events: EventBus) -> Self {
        let (tx, rx) = watch::channel(ServiceStatus::Offline);
        let last_health = Arc::new(RwLock::new(None));
        let details = last_health.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let (status, health) = probe(&client).await;
                *details.write() = health;

                let previous = *tx.borrow();
                if previous != status {
                    match status {
                        ServiceStatus::Online => log::info!("Classification service online: {}", client.base_url()),
                        ServiceStatus::Offline => log::warn!("Classification service offline: {}", client.base_url()),
                    }
                    events.emit(DashboardEvent::HealthChanged { status });
                }
                tx.send_replace(status);
            }
        });

        Self {
            status: rx,
            last_health,
            handle,
        }
    }

    pub fn status(&self) -> ServiceStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ServiceStatus> {
        self.status.clone()
    }

    /// Body of the last successful probe
    pub fn last_health(&self) -> Option<HealthResponse> {
        self.last_health.read().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop probing (same as dropping the handle)
    pub fn shutdown(self) {}
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
