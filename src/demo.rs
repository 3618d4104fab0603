//! Headless demo — runs one mirror session against the synthetic camera and
//! logs what the page would show after every reading.

use crate::camera::{CameraFailure, SyntheticCamera};
use crate::config::MirrorConfig;
use crate::error::Result;
use crate::mirror::{MirrorState, MoodMirror};
use crate::overlay::{DrawingSurface, PixmapSurface};
use crate::presentation::MirrorView;
use crate::schedule::TokioScheduler;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// What a finished demo run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoReport {
    pub readings: usize,
    pub overlay_frames: u64,
    pub snapshots_written: usize,
    pub camera_error: Option<String>,
}

pub async fn run_demo(config: MirrorConfig) -> Result<DemoReport> {
    let config = config.normalized();

    let mut camera = SyntheticCamera::new(config.camera.width, config.camera.height)
        .with_tracks(config.camera.tracks);
    if config.camera.deny_permission {
        camera = camera.with_failure(CameraFailure::PermissionDenied);
    }

    let scheduler = Arc::new(TokioScheduler::current(config.refresh_rate_hz));
    let surface = Arc::new(Mutex::new(PixmapSurface::new()));
    let mut mirror = MoodMirror::new(
        &config,
        Arc::new(camera),
        scheduler.clone(),
        scheduler,
        surface.clone(),
    );

    let mut rx = mirror.subscribe();
    let status = mirror.activate().await;
    tracing::info!(camera = ?status, duration_secs = config.demo.duration_secs, "demo started");

    let mut report = DemoReport {
        camera_error: status.error_message().map(str::to_string),
        ..DemoReport::default()
    };
    let mut seen = rx.borrow_and_update().readings;

    let deadline = tokio::time::sleep(Duration::from_secs(config.demo.duration_secs));
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(deadline, interrupt);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = &mut interrupt => {
                tracing::info!("interrupted");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if state.readings == seen {
                    continue;
                }
                seen = state.readings;
                report.readings += 1;
                log_view(&state);

                if let Some(dir) = &config.demo.snapshot_dir {
                    write_snapshot(dir, report.readings, &state, &surface)?;
                    report.snapshots_written += 1;
                }
            }
        }
    }

    report.overlay_frames = mirror.overlay_frames().unwrap_or(0);
    mirror.shutdown();
    tracing::info!(
        readings = report.readings,
        frames = report.overlay_frames,
        "demo finished"
    );
    Ok(report)
}

fn log_view(state: &MirrorState) {
    let view = MirrorView::from_state(state);
    tracing::info!(
        avatar = view.avatar.glyph,
        emotion = %view.dashboard.emotion,
        confidence = %view.dashboard.confidence_label,
        expression = %state.expression,
        history = view.dashboard.bars.len(),
        "{}",
        view.dashboard.message
    );
}

fn write_snapshot(
    dir: &Path,
    index: usize,
    state: &MirrorState,
    surface: &Mutex<PixmapSurface>,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let view = MirrorView::from_state(state);
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "state": state,
        "view": view,
    }))?;
    std::fs::write(dir.join(format!("state-{:03}.json", index)), json)?;

    let surface = surface.lock();
    if surface.size() != (0, 0) {
        surface.save_png(&dir.join(format!("frame-{:03}.png", index)))?;
    }
    Ok(())
}
