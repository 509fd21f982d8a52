//! Export Engine
//!
//! Reconstructs a downloadable CSV for the stored result. When the service kept a
//! copy (`server_file_handle`) the file is streamed back untouched; otherwise the
//! stored rows are serialized locally. Exporting never touches the Results Store.
//!
//! ## Usage
//! ```ignore
//! let report = engine.export_to_path(&result, &ExportEngine::default_destination()).await?;
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{EXPORT_FILE_NAME, EXPORT_HEADER};
use crate::error::{DashboardError, DashboardResult};
use crate::logic::results::{AnalysisResult, PredictionRow};
use crate::logic::service::ClassifierClient;


// ============================================================================
// EXPORT STRATEGY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStrategy {
    /// Server-side copy streamed by file handle
    Remote,
    /// Rows serialized on this side
    Local,
}

impl ExportStrategy {
    pub fn for_result(result: &AnalysisResult) -> Self {
        if result.server_file_handle().is_some() {
            ExportStrategy::Remote
        } else {
            ExportStrategy::Local
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub strategy: ExportStrategy,
    pub bytes: u64,
    pub destination: Option<PathBuf>,
}

// ============================================================================
// LOCAL SERIALIZATION
// ============================================================================

/// Serialize every row, in order, under the fixed header.
///
/// Fields are comma-joined without quoting; labels come from a comma-free set.
/// Lines are separated by `\n` with no trailing newline.
pub fn to_csv(rows: &[PredictionRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(EXPORT_HEADER.to_string());

    for row in rows {
        lines.push(format!(
            "{},{},{},{}",
            row.row_id,
            row.predicted_class.as_str(),
            row.confidence,
            row.is_anomaly
        ));
    }

    lines.join("\n")
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExportEngine {
    client: ClassifierClient,
}

impl ExportEngine {
    pub fn new(client: ClassifierClient) -> Self {
        Self { client }
    }

    /// `<download dir>/analysis_results.csv`, or the working directory if there is none
    pub fn default_destination() -> PathBuf {
        dirs::download_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(EXPORT_FILE_NAME)
    }

    /// Write the export for `result` into `sink`
    pub async fn export_to<W: Write + ?Sized>(
        &self,
        result: &AnalysisResult,
        sink: &mut W,
    ) -> DashboardResult<ExportReport> {
        let strategy = ExportStrategy::for_result(result);

        let bytes = match result.server_file_handle() {
            Some(handle) => self
                .client
                .download_to(handle, sink)
                .await
                .map_err(|e| DashboardError::Export(format!("download of '{}' failed: {}", handle, e)))?,
            None => {
                let csv = to_csv(result.rows());
                sink.write_all(csv.as_bytes())
                    .and_then(|_| sink.flush())
                    .map_err(|e| DashboardError::Export(e.to_string()))?;
                csv.len() as u64
            }
        };

        log::info!(
            "Exported session {} ({:?}, {} bytes)",
            result.session_id(),
            strategy,
            bytes
        );

        Ok(ExportReport {
            strategy,
            bytes,
            destination: None,
        })
    }

    /// Write the export to a file. A partially written file is removed on failure.
    ///
    /// File writes are blocking `std::fs` calls made on the calling task; one
    /// export is a single file of at most a few megabytes.
    pub async fn export_to_path(
        &self,
        result: &AnalysisResult,
        path: &Path,
    ) -> DashboardResult<ExportReport> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| DashboardError::Export(format!("cannot create {}: {}", path.display(), e)))?;

        match self.export_to(result, &mut file).await {
            Ok(report) => Ok(ExportReport {
                destination: Some(path.to_path_buf()),
                ..report
            }),
            Err(e) => {
                drop(file);
                if let Err(rm) = std::fs::remove_file(path) {
                    log::warn!("Could not remove partial export {}: {}", path.display(), rm);
                }
                Err(e)
            }
        }
    }
}
