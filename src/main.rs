//! Traffic Threat Dashboard - Headless Runner
//!
//! `traffic-dashboard <file.csv> [model]`: uploads one file, logs the dashboard
//! summary and writes the export to the download directory.

use anyhow::{bail, Context};

use traffic_dashboard::constants::{APP_NAME, APP_VERSION};
use traffic_dashboard::logic::health::ServiceStatus;
use traffic_dashboard::logic::upload::LocalFile;
use traffic_dashboard::{Dashboard, DashboardConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: traffic-dashboard <file.csv> [model]");
    };
    let model = args.next();

    let dashboard = Dashboard::new(DashboardConfig::from_env())?;

    if dashboard.check_health().await == ServiceStatus::Offline {
        log::warn!("Classification service is offline, attempting upload anyway");
    }
    dashboard.refresh_models().await;

    if let Some(model) = model {
        dashboard
            .select_model(&model)
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    }

    let file = LocalFile::from_path(&path).with_context(|| format!("cannot open {}", path))?;
    dashboard
        .select_file(file)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let result = dashboard
        .upload()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let overview = dashboard.overview();
    log::info!(
        "{} rows: {} benign ({:.1}%), {} attack ({:.1}%), {} anomalous ({:.1}%)",
        result.total_rows(),
        result.benign_count(),
        overview.benign_percent,
        result.attack_count(),
        overview.attack_percent,
        result.anomaly_count(),
        overview.anomaly_percent
    );
    for (rank, slice) in overview.top_attacks.iter().enumerate() {
        log::info!("  #{} {} ({})", rank + 1, slice.name, slice.value);
    }

    let report = dashboard
        .export_to_downloads()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    if let Some(destination) = report.destination {
        log::info!("Export written to {} ({} bytes)", destination.display(), report.bytes);
    }

    Ok(())
}
