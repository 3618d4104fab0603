pub mod camera;
pub mod config;
pub mod demo;
pub mod emotion;
pub mod error;
pub mod mirror;
pub mod overlay;
pub mod presentation;
pub mod schedule;

pub use error::{MirrorError, Result};

use crate::config::{default_config_path, load_json_config, MirrorConfig};
use tracing_subscriber::EnvFilter;

/// Entry point for the `mood-mirror` binary: load settings, then run the
/// headless demo session until it times out or is interrupted.
pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match default_config_path() {
        Ok(path) => load_json_config::<MirrorConfig>(&path, "Mirror"),
        Err(e) => {
            tracing::warn!(error = %e, "config path unavailable, using defaults");
            MirrorConfig::default()
        }
    }
    .normalized();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(demo::run_demo(config)).map_err(|e| {
        tracing::error!(error = %e, "demo failed");
        e
    })?;

    if let Some(message) = &report.camera_error {
        tracing::warn!("{}", message);
    }
    tracing::info!(
        readings = report.readings,
        snapshots = report.snapshots_written,
        "session closed"
    );
    Ok(())
}
