//! Classification Service
//!
//! HTTP collaborator that runs model inference remotely:
//! - `GET /health` liveness probe
//! - `GET /models` available model identifiers
//! - `POST /upload` multipart CSV submission
//! - `GET /download/{fileId}` server-side CSV of a previous result

pub mod client;
pub mod wire;

pub use client::{ClassifierClient, ClientConfig, ClientError};
pub use wire::{HealthResponse, ModelDescriptor, UploadResponse, WirePrediction};
