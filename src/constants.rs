//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default classification service, only edit this file.

/// Default classification service URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://localhost:8000
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default request timeout (seconds). Generous enough for large uploads.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 300;

/// Default health probe interval (seconds)
pub const DEFAULT_HEALTH_INTERVAL: u64 = 30;

/// Default timeout for a single health probe (seconds)
pub const DEFAULT_HEALTH_TIMEOUT: u64 = 5;

/// Default notification auto-dismiss delay (milliseconds)
pub const DEFAULT_NOTICE_DISMISS_MS: u64 = 3000;

/// Simulated progress cadence (milliseconds)
pub const PROGRESS_TICK_MS: u64 = 200;

/// Simulated progress increment per tick (percent)
pub const PROGRESS_STEP: u8 = 10;

/// Simulated progress never passes this value before the response arrives
pub const PROGRESS_CEILING: u8 = 90;

/// Time the 100% state stays visible before the session resets (milliseconds)
pub const SUCCESS_GRACE_MS: u64 = 500;

/// Rows per results table page
pub const PAGE_SIZE: usize = 25;

/// Rows shown in the compact dashboard histogram
pub const DASHBOARD_TOP_N: usize = 5;

/// Rows shown in the analytics histogram
pub const ANALYTICS_TOP_N: usize = 10;

/// MIME type accepted for uploads
pub const CSV_MIME: &str = "text/csv";

/// File name suffix accepted for uploads
pub const CSV_SUFFIX: &str = ".csv";

/// Name of the locally generated export file
pub const EXPORT_FILE_NAME: &str = "analysis_results.csv";

/// Header line of the locally generated export
pub const EXPORT_HEADER: &str = "Row ID,Prediction,Confidence,Anomaly";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Traffic Threat Dashboard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classification service URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("DASHBOARD_API_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Get request timeout from environment or use default
pub fn get_request_timeout() -> u64 {
    env_u64("DASHBOARD_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT)
}

/// Get health probe interval from environment or use default
pub fn get_health_interval() -> u64 {
    env_u64("DASHBOARD_HEALTH_INTERVAL_SECS", DEFAULT_HEALTH_INTERVAL)
}

/// Get health probe timeout from environment or use default
pub fn get_health_timeout() -> u64 {
    env_u64("DASHBOARD_HEALTH_TIMEOUT_SECS", DEFAULT_HEALTH_TIMEOUT)
}

/// Get notification dismiss delay from environment or use default
pub fn get_notice_dismiss_ms() -> u64 {
    env_u64("DASHBOARD_NOTICE_DISMISS_MS", DEFAULT_NOTICE_DISMISS_MS)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
