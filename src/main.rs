//! Entry point for the teleprompter viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load the script (plus any per-script overrides) into a session.
//! - Launch the GUI application with the loaded session.

mod app;
mod takes;

use crate::app::run_app;
use anyhow::{Context, Result, anyhow};
use prompter_core::config::load_config;
use prompter_core::session::load_session_for_source;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Returns true once per Ctrl-C press.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::SeqCst)
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let script_path = parse_args()?;
    let base_config = load_config(Path::new("conf/config.toml"));
    let session = load_session_for_source(&script_path, &base_config)?;
    set_log_level(reload_handle, session.config.log_level.as_filter_str());
    info!(
        path = %script_path.display(),
        level = %session.config.log_level,
        title = %session.title(),
        "Starting teleprompter"
    );
    info!(
        speed = session.config.speed,
        trigger_line = session.config.trigger_line,
        auto_enable = session.config.auto_enable_recording_on_mount,
        auto_start = session.config.auto_start_recording_on_play,
        auto_stop = session.config.auto_stop_recording_on_complete,
        "Active playback configuration"
    );

    ctrlc::set_handler(|| SIGINT_REQUESTED.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    run_app(session).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("Usage: prompter-viewer <path-to-script>"))?;

    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.as_path().display()));
    }
    Ok(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
