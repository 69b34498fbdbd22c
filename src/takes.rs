//! Take log: the viewer's recording sink.
//!
//! There is no capture device behind it. Each Start/Stop pair becomes one
//! take with its wall-clock start and duration, and the list is written to
//! `takes.json` beside the script's cached config whenever a take closes.

use anyhow::{Context, Result, bail};
use prompter_core::RecordingSink;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

const TAKES_FILE: &str = "takes.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Take {
    pub number: usize,
    pub started_at_unix_ms: u64,
    pub duration_ms: u64,
}

#[derive(Debug)]
struct ActiveTake {
    number: usize,
    started: Instant,
    started_at_unix_ms: u64,
}

#[derive(Debug, Default)]
pub struct TakeLog {
    armed: bool,
    active: Option<ActiveTake>,
    takes: Vec<Take>,
    output: Option<PathBuf>,
}

impl TakeLog {
    /// Picks up where an earlier session left off when `output` already
    /// holds a take list.
    pub fn new(output: Option<PathBuf>) -> Self {
        let takes = output.as_deref().map(load_takes).unwrap_or_default();
        TakeLog {
            takes,
            output,
            ..TakeLog::default()
        }
    }

    /// Log stored beside the per-script cache entry.
    pub fn for_script(script_path: &Path) -> Self {
        Self::new(Some(
            prompter_core::cache::hash_dir(script_path).join(TAKES_FILE),
        ))
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn takes(&self) -> &[Take] {
        &self.takes
    }

    /// Running time of the open take, if any.
    pub fn active_elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|take| take.started.elapsed())
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.output else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(&self.takes).context("failed to encode takes")?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), takes = self.takes.len(), "Saved take log");
        Ok(())
    }
}

fn load_takes(path: &Path) -> Vec<Take> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!(path = %path.display(), "Failed to read take log: {err}");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Take>>(&data) {
        Ok(takes) => {
            debug!(path = %path.display(), takes = takes.len(), "Loaded take log");
            takes
        }
        Err(err) => {
            warn!(path = %path.display(), "Ignoring unreadable take log: {err}");
            Vec::new()
        }
    }
}

impl RecordingSink for TakeLog {
    fn enable(&mut self) -> Result<()> {
        if !self.armed {
            info!("Recorder armed");
        }
        self.armed = true;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if let Some(active) = &self.active {
            bail!("take {} is already recording", active.number);
        }
        if !self.armed {
            debug!("Arming recorder on start");
            self.armed = true;
        }
        let started_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since| since.as_millis() as u64)
            .unwrap_or(0);
        let number = self.takes.last().map_or(0, |take| take.number) + 1;
        info!(take = number, "Recording started");
        self.active = Some(ActiveTake {
            number,
            started: Instant::now(),
            started_at_unix_ms,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(active) = self.active.take() else {
            debug!("Stop requested with no open take");
            return Ok(());
        };
        let duration_ms = active.started.elapsed().as_millis() as u64;
        info!(take = active.number, duration_ms, "Recording stopped");
        self.takes.push(Take {
            number: active.number,
            started_at_unix_ms: active.started_at_unix_ms,
            duration_ms,
        });
        self.persist()
    }
}
