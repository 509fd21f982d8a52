//! Upload Session Types
//!
//! Phases of one upload, the staged local file and the read-only snapshot
//! handed to views.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::constants::{self, CSV_MIME, CSV_SUFFIX};

// ============================================================================
// PHASE
// ============================================================================

/// `Idle → Validating → (Invalid | Ready) → Uploading → (Succeeded | Failed)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPhase {
    Idle,
    Validating,
    Invalid,
    Ready,
    Uploading,
    Succeeded,
    Failed,
}

impl UploadPhase {
    /// Phases from which `start` may issue a request
    pub fn can_start(&self) -> bool {
        matches!(self, UploadPhase::Ready | UploadPhase::Failed)
    }
}

// ============================================================================
// LOCAL FILE
// ============================================================================

#[derive(Debug, Clone)]
enum FileSource {
    Path(PathBuf),
    Memory(Arc<Vec<u8>>),
}

/// A file picked by the analyst (drag-drop or picker)
#[derive(Debug, Clone)]
pub struct LocalFile {
    name: String,
    declared_mime: Option<String>,
    size: u64,
    source: FileSource,
}

impl LocalFile {
    /// File on disk; the name is the path's file name
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            declared_mime: None,
            size,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// In-memory payload (e.g. dropped content)
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_mime: None,
            size: content.len() as u64,
            source: FileSource::Memory(Arc::new(content)),
        }
    }

    /// MIME type as declared by the picker
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.declared_mime = Some(mime.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_mime(&self) -> Option<&str> {
        self.declared_mime.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Declared MIME is exactly CSV, or the name ends in `.csv` (case-sensitive).
    /// Content is not inspected.
    pub fn is_csv(&self) -> bool {
        self.declared_mime.as_deref() == Some(CSV_MIME) || self.name.ends_with(CSV_SUFFIX)
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Memory(content) => Ok(content.as_ref().clone()),
        }
    }
}

// ============================================================================
// SNAPSHOT & TIMING
// ============================================================================

/// What views see of the current upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSession {
    pub phase: UploadPhase,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub selected_model: String,
    /// 0 to 100, non-decreasing while uploading
    pub progress_percent: u8,
    pub message: Option<String>,
}

impl UploadSession {
    /// "2.50 MB"
    pub fn file_size_text(&self) -> Option<String> {
        self.file_size
            .map(|bytes| format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0))
    }
}

/// Simulated progress tuning
#[derive(Debug, Clone, Copy)]
pub struct UploadTiming {
    pub tick: Duration,
    pub step: u8,
    /// Highest value reachable before the response arrives; kept below 100
    pub ceiling: u8,
    /// How long 100% stays visible before the session resets
    pub success_grace: Duration,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(constants::PROGRESS_TICK_MS),
            step: constants::PROGRESS_STEP,
            ceiling: constants::PROGRESS_CEILING,
            success_grace: Duration::from_millis(constants::SUCCESS_GRACE_MS),
        }
    }
}

impl UploadTiming {
    pub fn ceiling(&self) -> u8 {
        self.ceiling.min(99)
    }
}
