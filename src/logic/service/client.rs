//! Classification API Client
//!
//! HTTP client for communicating with the traffic classification service.

use std::io::Write;
use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::wire::{ErrorBody, HealthResponse, ModelDescriptor, ModelListEntry, UploadResponse};

/// Classification service configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub health_timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        use crate::constants;

        Self {
            base_url: constants::get_api_url(),
            timeout_seconds: constants::get_request_timeout(),
            health_timeout_seconds: constants::get_health_timeout(),
        }
    }
}

/// Classification API client
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl ClassifierClient {
    /// Create new client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Check service liveness. Any 2xx counts; the body is decoded when possible.
    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http_client
            .get(self.url("/health"))
            .timeout(Duration::from_secs(self.config.health_timeout_seconds))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let body = response.text().await.map_err(map_transport)?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// List the models the service can run
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ClientError> {
        let response = self.http_client
            .get(self.url("/models"))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let entries: Vec<ModelListEntry> = response.json().await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        Ok(entries.into_iter().map(ModelDescriptor::from).collect())
    }

    /// Submit a CSV file for batch classification
    pub async fn upload(
        &self,
        file_name: &str,
        content: Vec<u8>,
        model: &str,
    ) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(crate::constants::CSV_MIME)
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("model", model.to_string());

        let response = self.http_client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            let err = server_error(response).await;
            log::error!("Upload rejected: {}", err);
            return Err(err);
        }

        response.json().await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Stream the server-side CSV for `file_id` into `sink`, returning the byte count.
    /// The payload is passed through untouched.
    pub async fn download_to<W: Write + ?Sized>(
        &self,
        file_id: &str,
        sink: &mut W,
    ) -> Result<u64, ClientError> {
        let mut response = self.http_client
            .get(self.url(&format!("/download/{}", file_id)))
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(map_transport)? {
            sink.write_all(&chunk).map_err(|e| ClientError::Io(e.to_string()))?;
            written += chunk.len() as u64;
        }
        sink.flush().map_err(|e| ClientError::Io(e.to_string()))?;

        Ok(written)
    }
}

fn map_transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Network(err.to_string())
    }
}

async fn server_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::Server {
        status,
        detail: ErrorBody::detail_message(&body),
    }
}

/// Classification client errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Server error: {status}")]
    Server { status: u16, detail: Option<String> },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Client configuration error: {0}")]
    Config(String),
}
