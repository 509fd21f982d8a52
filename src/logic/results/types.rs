//! Result Types
//!
//! Core data model of one analysis session. No logic beyond construction
//! and presentation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::service::{UploadResponse, WirePrediction};

// ============================================================================
// TRAFFIC CLASS
// ============================================================================

/// Label predicted by the classifier.
///
/// The 15 known labels keep their numeric index; anything else is carried
/// verbatim in `Unknown` and rendered as an attack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrafficClass {
    Benign,
    Bot,
    DDoS,
    DosGoldenEye,
    DosHulk,
    DosSlowhttptest,
    DosSlowloris,
    FtpPatator,
    Heartbleed,
    Infiltration,
    PortScan,
    SshPatator,
    WebAttackBruteForce,
    WebAttackSqlInjection,
    WebAttackXss,
    Unknown(String),
}

impl TrafficClass {
    /// Known classes in index order
    pub const KNOWN: [TrafficClass; 15] = [
        TrafficClass::Benign,
        TrafficClass::Bot,
        TrafficClass::DDoS,
        TrafficClass::DosGoldenEye,
        TrafficClass::DosHulk,
        TrafficClass::DosSlowhttptest,
        TrafficClass::DosSlowloris,
        TrafficClass::FtpPatator,
        TrafficClass::Heartbleed,
        TrafficClass::Infiltration,
        TrafficClass::PortScan,
        TrafficClass::SshPatator,
        TrafficClass::WebAttackBruteForce,
        TrafficClass::WebAttackSqlInjection,
        TrafficClass::WebAttackXss,
    ];

    pub fn from_label(label: &str) -> Self {
        match label {
            "BENIGN" => TrafficClass::Benign,
            "Bot" => TrafficClass::Bot,
            "DDoS" => TrafficClass::DDoS,
            "DoS GoldenEye" => TrafficClass::DosGoldenEye,
            "DoS Hulk" => TrafficClass::DosHulk,
            "DoS Slowhttptest" => TrafficClass::DosSlowhttptest,
            "DoS slowloris" => TrafficClass::DosSlowloris,
            "FTP-Patator" => TrafficClass::FtpPatator,
            "Heartbleed" => TrafficClass::Heartbleed,
            "Infiltration" => TrafficClass::Infiltration,
            "PortScan" => TrafficClass::PortScan,
            "SSH-Patator" => TrafficClass::SshPatator,
            "Web Attack - Brute Force" => TrafficClass::WebAttackBruteForce,
            "Web Attack - Sql Injection" => TrafficClass::WebAttackSqlInjection,
            "Web Attack - XSS" => TrafficClass::WebAttackXss,
            other => TrafficClass::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TrafficClass::Benign => "BENIGN",
            TrafficClass::Bot => "Bot",
            TrafficClass::DDoS => "DDoS",
            TrafficClass::DosGoldenEye => "DoS GoldenEye",
            TrafficClass::DosHulk => "DoS Hulk",
            TrafficClass::DosSlowhttptest => "DoS Slowhttptest",
            TrafficClass::DosSlowloris => "DoS slowloris",
            TrafficClass::FtpPatator => "FTP-Patator",
            TrafficClass::Heartbleed => "Heartbleed",
            TrafficClass::Infiltration => "Infiltration",
            TrafficClass::PortScan => "PortScan",
            TrafficClass::SshPatator => "SSH-Patator",
            TrafficClass::WebAttackBruteForce => "Web Attack - Brute Force",
            TrafficClass::WebAttackSqlInjection => "Web Attack - Sql Injection",
            TrafficClass::WebAttackXss => "Web Attack - XSS",
            TrafficClass::Unknown(label) => label,
        }
    }

    /// Label index used by the classifier, `None` for unknown labels
    pub fn index(&self) -> Option<u8> {
        Self::KNOWN.iter().position(|c| c == self).map(|i| i as u8)
    }

    pub fn is_benign(&self) -> bool {
        matches!(self, TrafficClass::Benign)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TrafficClass::Unknown(_))
    }

    /// "2: DDoS" style label for filter options
    pub fn display_label(&self) -> String {
        match self.index() {
            Some(idx) => format!("{}: {}", idx, self.as_str()),
            None => self.as_str().to_string(),
        }
    }
}

impl From<String> for TrafficClass {
    fn from(label: String) -> Self {
        TrafficClass::from_label(&label)
    }
}

impl From<TrafficClass> for String {
    fn from(class: TrafficClass) -> Self {
        match class {
            TrafficClass::Unknown(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PREDICTION ROW
// ============================================================================

/// Status badge of a row. The anomaly flag always wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowBadge {
    Anomaly,
    Benign,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

/// One classified traffic record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub row_id: u64,
    pub predicted_class: TrafficClass,
    /// In [0, 1]
    pub confidence: f64,
    pub is_anomaly: bool,
}

impl PredictionRow {
    pub fn new(row_id: u64, predicted_class: TrafficClass, confidence: f64, is_anomaly: bool) -> Self {
        Self {
            row_id,
            predicted_class,
            confidence,
            is_anomaly,
        }
    }

    pub fn badge(&self) -> RowBadge {
        if self.is_anomaly {
            RowBadge::Anomaly
        } else if self.predicted_class.is_benign() {
            RowBadge::Benign
        } else {
            RowBadge::Attack
        }
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        if self.confidence > 0.8 {
            ConfidenceBand::High
        } else if self.confidence > 0.5 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    /// "95.0%"
    pub fn confidence_text(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

impl From<WirePrediction> for PredictionRow {
    fn from(wire: WirePrediction) -> Self {
        PredictionRow {
            row_id: wire.row_id,
            predicted_class: TrafficClass::from(wire.prediction),
            confidence: wire.confidence,
            is_anomaly: wire.anomaly_flag,
        }
    }
}

// ============================================================================
// ANALYSIS RESULT
// ============================================================================

/// One completed analysis session.
///
/// `benign_count + attack_count == total_rows` holds for every value of this
/// type; `anomaly_count` overlays both partitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    session_id: Uuid,
    received_at: DateTime<Utc>,
    model: String,
    total_rows: u64,
    benign_count: u64,
    attack_count: u64,
    anomaly_count: u64,
    rows: Vec<PredictionRow>,
    server_file_handle: Option<String>,
}

impl AnalysisResult {
    /// Build from a service response.
    ///
    /// Counts that break `benign + attack == total` are recomputed from the rows.
    /// A row sequence shorter or longer than `total_rows` is kept as is.
    pub fn from_response(response: UploadResponse, model: &str) -> Self {
        let rows: Vec<PredictionRow> = response.results.into_iter().map(PredictionRow::from).collect();
        let handle = response.file_id.filter(|id| !id.trim().is_empty());

        let consistent = response.benign_count.checked_add(response.attack_count)
            == Some(response.total_rows);

        if !consistent {
            log::warn!(
                "Inconsistent summary (total={}, benign={}, attack={}), deriving counts from {} rows",
                response.total_rows, response.benign_count, response.attack_count, rows.len()
            );
            let mut result = Self::from_rows(rows, model);
            result.server_file_handle = handle;
            return result;
        }

        if rows.len() as u64 != response.total_rows {
            log::warn!(
                "Row count mismatch: summary says {}, received {}",
                response.total_rows, rows.len()
            );
        }

        Self {
            session_id: Uuid::new_v4(),
            received_at: Utc::now(),
            model: model.to_string(),
            total_rows: response.total_rows,
            benign_count: response.benign_count,
            attack_count: response.attack_count,
            anomaly_count: response.anomaly_count,
            rows,
            server_file_handle: handle,
        }
    }

    /// Build with counts derived from the rows themselves
    pub fn from_rows(rows: Vec<PredictionRow>, model: &str) -> Self {
        let total_rows = rows.len() as u64;
        let benign_count = rows.iter().filter(|r| r.predicted_class.is_benign()).count() as u64;
        let anomaly_count = rows.iter().filter(|r| r.is_anomaly).count() as u64;

        Self {
            session_id: Uuid::new_v4(),
            received_at: Utc::now(),
            model: model.to_string(),
            total_rows,
            benign_count,
            attack_count: total_rows - benign_count,
            anomaly_count,
            rows,
            server_file_handle: None,
        }
    }

    pub fn with_file_handle(mut self, handle: impl Into<String>) -> Self {
        self.server_file_handle = Some(handle.into());
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn benign_count(&self) -> u64 {
        self.benign_count
    }

    pub fn attack_count(&self) -> u64 {
        self.attack_count
    }

    pub fn anomaly_count(&self) -> u64 {
        self.anomaly_count
    }

    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    pub fn server_file_handle(&self) -> Option<&str> {
        self.server_file_handle.as_deref()
    }
}
