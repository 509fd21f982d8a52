//! API Module
//!
//! Surface consumed by a view layer.
//!
//! Structure:
//! - commands.rs: `Dashboard`, the composition root and its operations
//! - views.rs: Serializable view models
//!
//! Usage:
//! - `api::Dashboard::new(DashboardConfig::from_env())`
//! - `dashboard.overview()`, `dashboard.results_table(&mut state)`

pub mod commands;
pub mod views;

pub use commands::Dashboard;
pub use views::*;
