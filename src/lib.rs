//! Traffic Threat Dashboard
//!
//! Client-side result analysis pipeline for a network-traffic classification
//! service: upload orchestration, results store, query, export and health.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use api::Dashboard;
pub use error::{DashboardError, DashboardResult};
pub use logic::config::DashboardConfig;
