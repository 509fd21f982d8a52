//! Dashboard Commands
//!
//! `Dashboard` wires the engines together and exposes the operations a view
//! layer calls. Dropping it stops the health monitor.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::views::{AnalyticsView, DashboardOverview, ServiceStatusView, TableView};
use crate::constants::{ANALYTICS_TOP_N, DASHBOARD_TOP_N};
use crate::error::{DashboardError, DashboardResult};
use crate::logic::config::DashboardConfig;
use crate::logic::events::{DashboardEvent, EventBus};
use crate::logic::export::{ExportEngine, ExportReport};
use crate::logic::health::{self, HealthMonitor, ServiceStatus};
use crate::logic::models::{self, ModelCatalog, ModelInfo};
use crate::logic::notify::{Notice, Notifier};
use crate::logic::query::{self, FilterOption, TableState};
use crate::logic::results::{top_attack_classes, AnalysisResult, ResultsStore, Summary};
use crate::logic::service::ClassifierClient;
use crate::logic::upload::{LocalFile, UploadOrchestrator, UploadSession};

pub struct Dashboard {
    client: ClassifierClient,
    store: ResultsStore,
    orchestrator: Arc<UploadOrchestrator>,
    exporter: ExportEngine,
    catalog: ModelCatalog,
    events: EventBus,
    notices: Notifier,
    health_interval: std::time::Duration,
    health: Mutex<Option<HealthMonitor>>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let client = ClassifierClient::new(config.client.clone())?;
        let events = EventBus::default();
        let notices = Notifier::new(config.notice_dismiss, events.clone());
        let (store, writer) = ResultsStore::new(notices.clone(), events.clone());
        let catalog = ModelCatalog::default();

        let orchestrator = UploadOrchestrator::new(
            client.clone(),
            writer,
            catalog.clone(),
            events.clone(),
            config.timing,
        );

        log::info!("Dashboard ready (service: {})", client.base_url());

        Ok(Self {
            exporter: ExportEngine::new(client.clone()),
            client,
            store,
            orchestrator: Arc::new(orchestrator),
            catalog,
            events,
            notices,
            health_interval: config.health_interval,
            health: Mutex::new(None),
        })
    }

    pub fn store(&self) -> &ResultsStore {
        &self.store
    }

    pub fn orchestrator(&self) -> Arc<UploadOrchestrator> {
        self.orchestrator.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    // ========================================================================
    // HEALTH
    // ========================================================================

    /// Start periodic probing; a running monitor is replaced
    pub fn start_health_monitor(&self) {
        let monitor = HealthMonitor::spawn(self.client.clone(), self.health_interval, self.events.clone());
        *self.health.lock() = Some(monitor);
    }

    pub fn stop_health_monitor(&self) {
        if self.health.lock().take().is_some() {
            log::info!("Health monitor stopped");
        }
    }

    /// Probe once, outside the monitor
    pub async fn check_health(&self) -> ServiceStatus {
        health::probe(&self.client).await.0
    }

    pub fn service_status(&self) -> ServiceStatusView {
        let guard = self.health.lock();
        match guard.as_ref() {
            Some(monitor) => ServiceStatusView::new(
                monitor.status(),
                self.client.base_url(),
                monitor.is_running(),
                monitor.last_health(),
            ),
            None => ServiceStatusView::new(ServiceStatus::Offline, self.client.base_url(), false, None),
        }
    }

    // ========================================================================
    // MODELS
    // ========================================================================

    /// Pull the model list from the service; the current list stays on failure.
    /// A selection the new list no longer offers moves to its first entry.
    pub async fn refresh_models(&self) -> Vec<String> {
        match self.catalog.refresh(&self.client).await {
            Ok(true) => self.orchestrator.sync_model(),
            Ok(false) => {}
            Err(e) => log::debug!("Keeping built-in model list: {}", e),
        }
        self.catalog.names()
    }

    pub fn model_names(&self) -> Vec<String> {
        self.catalog.names()
    }

    pub fn model_documentation(&self) -> Vec<ModelInfo> {
        models::model_documentation()
    }

    // ========================================================================
    // UPLOAD
    // ========================================================================

    pub fn select_file(&self, file: LocalFile) -> DashboardResult<()> {
        self.orchestrator.select_file(file)
    }

    pub fn select_model(&self, name: &str) -> DashboardResult<()> {
        self.orchestrator.select_model(name)
    }

    pub fn upload_session(&self) -> UploadSession {
        self.orchestrator.session()
    }

    /// Run the staged upload; on success a notice reports the row count
    pub async fn upload(&self) -> DashboardResult<Arc<AnalysisResult>> {
        let result = self.orchestrator.start().await?;
        self.notices
            .success(format!("Successfully analyzed {} records", result.total_rows()));
        Ok(result)
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    pub fn overview(&self) -> DashboardOverview {
        let current = self.store.current();
        let summary = current.as_deref().map(Summary::of);

        DashboardOverview {
            has_results: current.is_some(),
            is_loading: self.store.is_loading(),
            benign_percent: summary.map(|s| s.benign_percent()).unwrap_or(0.0),
            attack_percent: summary.map(|s| s.attack_percent()).unwrap_or(0.0),
            anomaly_percent: summary.map(|s| s.anomaly_percent()).unwrap_or(0.0),
            distribution: summary.map(|s| s.distribution()).unwrap_or_default(),
            top_attacks: current
                .as_deref()
                .map(|r| top_attack_classes(r.rows(), DASHBOARD_TOP_N))
                .unwrap_or_default(),
            model: current.as_deref().map(|r| r.model().to_string()),
            analyzed_at: current.as_deref().map(|r| r.received_at().to_rfc3339()),
            service_status: self.service_status().status,
            summary,
        }
    }

    pub fn analytics(&self) -> Option<AnalyticsView> {
        self.store
            .current()
            .map(|r| AnalyticsView::build(&r, ANALYTICS_TOP_N))
    }

    /// Current page for `state`. A new result set sends the table back to page 1.
    pub fn results_table(&self, state: &mut TableState) -> TableView {
        state.sync_generation(self.store.generation());
        match self.store.current() {
            Some(result) => state.refresh(result.rows()).into(),
            None => state.refresh(&[]).into(),
        }
    }

    pub fn filter_options(&self) -> Vec<FilterOption> {
        query::class_filter_options()
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    pub async fn export_results(&self, path: &Path) -> DashboardResult<ExportReport> {
        let outcome = match self.store.current() {
            Some(result) => self.exporter.export_to_path(&result, path).await,
            None => Err(DashboardError::Export("no results to export".to_string())),
        };

        match outcome {
            Ok(report) => {
                self.notices.success(format!("Results exported to {}", path.display()));
                Ok(report)
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.store.set_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Export to `<download dir>/analysis_results.csv`
    pub async fn export_to_downloads(&self) -> DashboardResult<ExportReport> {
        self.export_results(&ExportEngine::default_destination()).await
    }

    // ========================================================================
    // NOTICES
    // ========================================================================

    pub fn notice(&self) -> Option<Notice> {
        self.notices.current()
    }

    pub fn dismiss_notice(&self) {
        self.notices.dismiss();
    }
}
