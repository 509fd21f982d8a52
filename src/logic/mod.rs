//! Logic Module
//!
//! Engines of the result analysis pipeline.
//!
//! ## Structure
//! - `service`: HTTP client for the classification service
//! - `upload`: Upload orchestrator state machine
//! - `results`: Results store, data model and derived statistics
//! - `query`: Client-side filter, search and pagination
//! - `export`: Remote or local CSV export
//! - `health`: Periodic liveness probe
//! - `models`: Model catalog and documentation
//! - `notify`: Transient notification channel
//! - `events`: Event bus towards the view layer
//! - `config`: Runtime configuration

pub mod config;
pub mod service;
pub mod results;
pub mod query;
pub mod upload;
pub mod export;
pub mod health;
pub mod models;
pub mod notify;
pub mod events;

#[cfg(test)]
pub(crate) mod testutil;
