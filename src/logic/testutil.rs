//! Shared test fixtures: row builders and an in-process fake classification service.

use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::logic::results::{PredictionRow, TrafficClass};

// ============================================================================
// ROW FIXTURES
// ============================================================================

pub fn row(id: u64, label: &str, anomaly: bool) -> PredictionRow {
    PredictionRow::new(id, TrafficClass::from_label(label), 0.9, anomaly)
}

/// 100 rows: every tenth row is DDoS, rows 5, 15 and 25 are anomalous
pub fn ddos_fixture() -> Vec<PredictionRow> {
    (0..100u64)
        .map(|i| {
            let label = if i % 10 == 0 { "DDoS" } else { "BENIGN" };
            row(i, label, matches!(i, 5 | 15 | 25))
        })
        .collect()
}

/// 500 rows: 450 BENIGN (the first 12 anomalous) then 50 attacks over six classes
pub fn scenario_rows() -> Vec<PredictionRow> {
    const ATTACKS: [&str; 6] = ["DDoS", "PortScan", "Bot", "DoS Hulk", "FTP-Patator", "SSH-Patator"];

    let benign = (0..450u64).map(|i| row(i, "BENIGN", i < 12));
    let attacks = (450..500u64).map(|i| row(i, ATTACKS[((i - 450) % 6) as usize], false));
    benign.chain(attacks).collect()
}

/// Service JSON for `rows` with consistent counts
pub fn response_json(rows: &[PredictionRow]) -> serde_json::Value {
    let benign = rows.iter().filter(|r| r.predicted_class.is_benign()).count();
    let anomaly = rows.iter().filter(|r| r.is_anomaly).count();
    let results: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            json!({
                "row_id": r.row_id.to_string(),
                "prediction": r.predicted_class.as_str(),
                "confidence": r.confidence,
                "anomaly_flag": r.is_anomaly,
            })
        })
        .collect();

    json!({
        "total_rows": rows.len(),
        "benign_count": benign,
        "attack_count": rows.len() - benign,
        "anomaly_count": anomaly,
        "results": results,
    })
}

// ============================================================================
// FAKE CLASSIFICATION SERVICE
// ============================================================================

#[derive(Debug, Clone)]
pub enum UploadReply {
    Json(serde_json::Value),
    Error(u16, String),
}

#[derive(Debug, Clone, Default)]
pub struct ReceivedUpload {
    pub file_name: Option<String>,
    pub content: Vec<u8>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Behavior {
    pub upload: UploadReply,
    pub upload_delay: Duration,
    pub models: serde_json::Value,
    pub download_id: String,
    pub download_body: Vec<u8>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            upload: UploadReply::Json(response_json(&ddos_fixture())),
            upload_delay: Duration::from_millis(0),
            models: json!([{"name": "Random Forest", "filename": "random_forest_model.pkl"}]),
            download_id: "known".to_string(),
            download_body: b"row_id,prediction\n0,BENIGN\n".to_vec(),
        }
    }
}

struct FakeState {
    behavior: Behavior,
    health_status: AtomicU16,
    uploads: AtomicUsize,
    health_probes: AtomicUsize,
    downloads: AtomicUsize,
    last_upload: Mutex<Option<ReceivedUpload>>,
}

pub struct FakeService {
    pub base_url: String,
    state: Arc<FakeState>,
    handle: JoinHandle<()>,
}

impl FakeService {
    pub async fn start(behavior: Behavior) -> Self {
        let state = Arc::new(FakeState {
            behavior,
            health_status: AtomicU16::new(200),
            uploads: AtomicUsize::new(0),
            health_probes: AtomicUsize::new(0),
            downloads: AtomicUsize::new(0),
            last_upload: Mutex::new(None),
        });

        let app = Router::new()
            .route("/health", get(health))
            .route("/models", get(models))
            .route("/upload", post(upload))
            .route("/download/:file_id", get(download))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn set_health_status(&self, status: u16) {
        self.state.health_status.store(status, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.state.uploads.load(Ordering::SeqCst)
    }

    pub fn health_probe_count(&self) -> usize {
        self.state.health_probes.load(Ordering::SeqCst)
    }

    pub fn download_count(&self) -> usize {
        self.state.downloads.load(Ordering::SeqCst)
    }

    pub fn last_upload(&self) -> Option<ReceivedUpload> {
        self.state.last_upload.lock().clone()
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL on which nothing listens
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn health(State(state): State<Arc<FakeState>>) -> Response {
    state.health_probes.fetch_add(1, Ordering::SeqCst);
    let status = StatusCode::from_u16(state.health_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::OK);
    (status, Json(json!({"status": "active", "version": "1.0.0", "loaded_models": ["Random Forest"]})))
        .into_response()
}

async fn models(State(state): State<Arc<FakeState>>) -> Response {
    Json(state.behavior.models.clone()).into_response()
}

async fn upload(State(state): State<Arc<FakeState>>, mut multipart: Multipart) -> Response {
    state.uploads.fetch_add(1, Ordering::SeqCst);

    let mut received = ReceivedUpload::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();
        match name.as_str() {
            "file" => {
                received.file_name = file_name;
                received.content = bytes.to_vec();
            }
            "model" => received.model = Some(String::from_utf8_lossy(&bytes).to_string()),
            _ => {}
        }
    }
    *state.last_upload.lock() = Some(received);

    tokio::time::sleep(state.behavior.upload_delay).await;

    match &state.behavior.upload {
        UploadReply::Json(body) => Json(body.clone()).into_response(),
        UploadReply::Error(code, body) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body.clone()).into_response()
        }
    }
}

async fn download(State(state): State<Arc<FakeState>>, Path(file_id): Path<String>) -> Response {
    state.downloads.fetch_add(1, Ordering::SeqCst);
    if file_id == state.behavior.download_id {
        (StatusCode::OK, state.behavior.download_body.clone()).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "File ID not found"}))).into_response()
    }
}
