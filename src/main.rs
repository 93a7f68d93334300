//! # Pose Drive
//!
//! Drive a racing game with your body.
//!
//! Reads pose landmarks frame by frame, maps them to steering and pedal
//! values through the active calibration preset, and writes them to a
//! controller sink.

use std::path::PathBuf;

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pose_drive::config::{Config, ControlsConfig, SinkKind};
use pose_drive::controller::{ControllerSink, KeyboardSink, LoggingSink};
use pose_drive::pipeline::PoseDrive;
use pose_drive::pose::{IdleSource, PoseSource, ReplaySource};
use pose_drive::telemetry::{ControlRecord, TelemetryLogger};

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Base name of the daily rolling log file
const LOG_FILE_NAME: &str = "pose-drive.log";

/// Interval between frames at `rate_hz`
fn frame_period(rate_hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)))
}

/// Builds the sink selected by `[controls] sink`
fn build_sink(controls: &ControlsConfig) -> Box<dyn ControllerSink> {
    match controls.sink {
        SinkKind::Keyboard => {
            info!(
                "Keyboard sink: left '{}', right '{}', throttle '{}', brake '{}'",
                controls.keys.left, controls.keys.right, controls.keys.throttle, controls.keys.brake
            );
            Box::new(KeyboardSink::new(controls.keys.clone()))
        }
        SinkKind::Log => {
            info!("Logging sink: control values are only logged");
            Box::new(LoggingSink::new())
        }
    }
}

/// Installs the stdout subscriber, plus a daily file under the telemetry
/// log directory when telemetry is enabled.
///
/// The returned guard must live until shutdown so buffered lines are written.
fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let (file_layer, guard) = if config.telemetry.enabled {
        let appender = tracing_appender::rolling::daily(&config.telemetry.log_dir, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// Main entry point for Pose Drive
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, or `config/default.toml`)
///    - Set up logging
///    - Load presets and apply the configured default
///    - Open the replay file, or idle without a pose source
///
/// 2. **Main Loop**
///    - Poll one detection per tick at `frame_rate_hz`
///    - Map it to controls and write them to the sink
///    - Record telemetry every `record_interval_frames`
///    - Log status every `log_interval_frames`
///
/// 3. **Graceful Shutdown**
///    - On Ctrl+C or end of replay, release held buttons and center axes
///    - Release any keys the sink still holds
///    - Flush telemetry
///
/// # Errors
///
/// Returns error if:
/// - The configuration file exists but is invalid
/// - The presets directory or replay file cannot be read
/// - The telemetry directory cannot be created
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let (config, from_file) = if config_path.exists() {
        (Config::load(&config_path)?, true)
    } else {
        (Config::default(), false)
    };

    let _log_guard = init_logging(&config);

    info!("Pose Drive v{} starting...", env!("CARGO_PKG_VERSION"));
    if from_file {
        info!("Loaded configuration from {}", config_path.display());
    } else {
        warn!("Config file {} not found, using defaults", config_path.display());
    }

    let mut drive = PoseDrive::new(&config.preferences.presets_dir, config.controls.handbrake_button);
    drive.load_presets(&config.preferences.default_preset)?;

    let mut source: Box<dyn PoseSource> = match config.replay_path() {
        Some(path) => {
            info!("Replaying landmarks from {}", path.display());
            Box::new(ReplaySource::open(path)?)
        }
        None => {
            info!("No replay file configured, waiting without a pose source");
            Box::new(IdleSource)
        }
    };

    let mut telemetry = if config.telemetry.enabled {
        Some(TelemetryLogger::from_config(&config.telemetry)?)
    } else {
        None
    };

    let mut sink = build_sink(&config.controls);
    let mut frame_interval = interval(frame_period(config.driver.frame_rate_hz));

    info!("Starting frame loop at {}Hz", config.driver.frame_rate_hz);
    info!("Press Ctrl+C to exit");

    let mut last_log_frame: u64 = 0;

    // Main control loop
    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let detection = match source.poll() {
                    Ok(Some(detection)) => detection,
                    Ok(None) => {
                        info!("Pose source exhausted");
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to read pose frame: {}", e);
                        continue;
                    }
                };

                let feature = match drive.process_frame(detection.as_ref(), sink.as_mut()) {
                    Ok(feature) => feature,
                    Err(e) => {
                        warn!("Failed to process frame: {}", e);
                        continue;
                    }
                };
                let frame = drive.frames_processed();

                if let Some(logger) = telemetry.as_mut() {
                    if frame % config.telemetry.record_interval_frames == 0 {
                        let preset = drive.presets().active_name().unwrap_or_default();
                        let record = ControlRecord::new(frame, preset, &feature, detection.is_none());
                        if let Err(e) = logger.log(&record) {
                            debug!("Failed to write telemetry: {}", e);
                        }
                    }
                }

                if frame - last_log_frame >= config.driver.log_interval_frames {
                    info!(
                        "Processed {} frames (steer {:+.2}, throttle {:.2}, brake {:.2})",
                        frame, feature.steer_axis(), feature.throttle_pressure, feature.brake_pressure
                    );
                    last_log_frame = frame;
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    drive.release_all(sink.as_mut());
    sink.release_all();
    if let Some(logger) = telemetry.as_mut() {
        logger.flush()?;
    }
    info!("Total frames processed: {}", drive.frames_processed());

    Ok(())
}
