//! Dashboard Configuration
//!
//! Runtime settings assembled from the environment, with defaults from `constants`.

use std::time::Duration;

use super::service::ClientConfig;
use super::upload::UploadTiming;
use crate::constants;

// ============================================================================
// DASHBOARD CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Classification service connection
    pub client: ClientConfig,
    /// Health probe cadence
    pub health_interval: Duration,
    /// Notice auto-dismiss delay
    pub notice_dismiss: Duration,
    /// Simulated upload progress
    pub timing: UploadTiming,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl DashboardConfig {
    /// Read `DASHBOARD_*` overrides, falling back to the built-in defaults
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::default(),
            health_interval: Duration::from_secs(constants::get_health_interval().max(1)),
            notice_dismiss: Duration::from_millis(constants::get_notice_dismiss_ms()),
            timing: UploadTiming::default(),
        }
    }

    /// Point at another service URL, keeping everything else
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
