//! View Models
//!
//! Serializable snapshots handed to whatever renders the dashboard.

use serde::Serialize;

use crate::logic::health::ServiceStatus;
use crate::logic::query::QueryPage;
use crate::logic::results::{
    AnalysisResult, ChartSlice, ConfidenceBand, PredictionRow, RowBadge, Summary,
};
use crate::logic::service::HealthResponse;

// ============================================================================
// DASHBOARD
// ============================================================================

/// Dashboard page: stat cards, distribution pie, top attack bars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub has_results: bool,
    pub is_loading: bool,
    pub summary: Option<Summary>,
    pub benign_percent: f64,
    pub attack_percent: f64,
    pub anomaly_percent: f64,
    pub distribution: Vec<ChartSlice>,
    pub top_attacks: Vec<ChartSlice>,
    pub model: Option<String>,
    pub analyzed_at: Option<String>,
    pub service_status: ServiceStatus,
}

/// Analytics page: class histogram over every row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub total: u64,
    pub top_classes: Vec<ChartSlice>,
    pub distribution: Vec<ChartSlice>,
    pub benign_percent: f64,
    pub attack_percent: f64,
    pub anomaly_percent: f64,
}

impl AnalyticsView {
    pub fn build(result: &AnalysisResult, top_n: usize) -> Self {
        let summary = Summary::of(result);
        Self {
            total: summary.total,
            top_classes: crate::logic::results::top_classes(result.rows(), top_n),
            distribution: summary.distribution(),
            benign_percent: summary.benign_percent(),
            attack_percent: summary.attack_percent(),
            anomaly_percent: summary.anomaly_percent(),
        }
    }
}

// ============================================================================
// RESULTS TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub row_id: u64,
    pub predicted_class: String,
    pub confidence: f64,
    pub confidence_text: String,
    pub confidence_band: ConfidenceBand,
    pub badge: RowBadge,
    pub is_anomaly: bool,
}

impl From<&PredictionRow> for RowView {
    fn from(row: &PredictionRow) -> Self {
        Self {
            row_id: row.row_id,
            predicted_class: row.predicted_class.as_str().to_string(),
            confidence: row.confidence,
            confidence_text: row.confidence_text(),
            confidence_band: row.confidence_band(),
            badge: row.badge(),
            is_anomaly: row.is_anomaly,
        }
    }
}

/// One page of the results table plus its footer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub total_matched: usize,
    pub page: usize,
    pub page_count: usize,
    pub first_index: usize,
    pub last_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl TableView {
    /// "Showing 26 to 50 of 100 results"
    pub fn footer(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first_index, self.last_index, self.total_matched
        )
    }
}

impl From<QueryPage> for TableView {
    fn from(page: QueryPage) -> Self {
        Self {
            total_matched: page.total_matched,
            page: page.page,
            page_count: page.page_count,
            first_index: page.first_index(),
            last_index: page.last_index(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            rows: page.rows.iter().map(RowView::from).collect(),
        }
    }
}

// ============================================================================
// SERVICE STATUS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStatusView {
    pub status: ServiceStatus,
    pub label: &'static str,
    pub base_url: String,
    pub monitoring: bool,
    pub version: Option<String>,
    pub loaded_models: Vec<String>,
}

impl ServiceStatusView {
    pub fn new(
        status: ServiceStatus,
        base_url: &str,
        monitoring: bool,
        health: Option<HealthResponse>,
    ) -> Self {
        let health = health.unwrap_or_default();
        Self {
            status,
            label: status.as_str(),
            base_url: base_url.to_string(),
            monitoring,
            version: health.version,
            loaded_models: health.loaded_models,
        }
    }
}
