//! Error handling
//!
//! Every failure the dashboard can surface maps to one of four recoverable kinds:
//! validation, transport, server and export. None of them is fatal; each carries
//! the fixed user-facing message shown in the notification channel.

use crate::logic::service::ClientError;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Shown when a staged file is not a CSV
pub const INVALID_FILE_MESSAGE: &str = "Please upload a valid CSV file.";

/// Shown when an upload fails without a server detail
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

/// Shown when either export strategy fails
pub const EXPORT_FAILED_MESSAGE: &str = "Failed to download results.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    // Bad file type or unknown model; prompts re-selection
    #[error("validation error: {0}")]
    Validation(String),

    // Network failure or timeout; prompts retry
    #[error("transport error: {0}")]
    Transport(String),

    // Non-2xx answer from the classification service
    #[error("server error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    // Local CSV generation or remote download failed
    #[error("export error: {0}")]
    Export(String),

    // State machine rejections
    #[error("an upload is already in progress")]
    Busy,

    #[error("no valid file is staged for upload")]
    NotReady,
}

impl DashboardError {
    pub fn invalid_file() -> Self {
        DashboardError::Validation(INVALID_FILE_MESSAGE.to_string())
    }

    /// Message shown to the analyst
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Validation(msg) => msg.clone(),
            DashboardError::Transport(_) => UPLOAD_FAILED_MESSAGE.to_string(),
            DashboardError::Server { detail: Some(detail), .. } => detail.clone(),
            DashboardError::Server { detail: None, .. } => UPLOAD_FAILED_MESSAGE.to_string(),
            DashboardError::Export(_) => EXPORT_FAILED_MESSAGE.to_string(),
            DashboardError::Busy => "An upload is already in progress.".to_string(),
            DashboardError::NotReady => "Please select a CSV file first.".to_string(),
        }
    }
}

impl From<ClientError> for DashboardError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Server { status, detail } => DashboardError::Server { status, detail },
            other => DashboardError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_detail_is_verbatim() {
        let err = DashboardError::from(ClientError::Server {
            status: 400,
            detail: Some("Only CSV files are supported".to_string()),
        });
        assert_eq!(err.user_message(), "Only CSV files are supported");
    }

    #[test]
    fn test_generic_messages() {
        let missing_detail = DashboardError::Server { status: 502, detail: None };
        assert_eq!(missing_detail.user_message(), UPLOAD_FAILED_MESSAGE);

        let transport = DashboardError::from(ClientError::Timeout);
        assert_eq!(transport.user_message(), UPLOAD_FAILED_MESSAGE);

        let export = DashboardError::Export("disk full".to_string());
        assert_eq!(export.user_message(), EXPORT_FAILED_MESSAGE);
    }
}
