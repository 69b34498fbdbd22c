//! Per-script configuration overrides.
//!
//! Files are stored under `.cache/` in a directory named after a hash of the
//! script path, so any path is safe to use as a key. Each directory holds a
//! `config.toml` in the same layout as the base config.

use crate::config::{self, AppConfig};
use anyhow::Result;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";
const CONFIG_FILE: &str = "config.toml";

pub fn hash_dir(script_path: &Path) -> PathBuf {
    hash_dir_in(Path::new(CACHE_DIR), script_path)
}

pub fn hash_dir_in(root: &Path, script_path: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(script_path.as_os_str().to_string_lossy().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    root.join(hash)
}

pub fn load_script_config(script_path: &Path) -> Option<AppConfig> {
    load_script_config_in(Path::new(CACHE_DIR), script_path)
}

pub fn load_script_config_in(root: &Path, script_path: &Path) -> Option<AppConfig> {
    let path = hash_dir_in(root, script_path).join(CONFIG_FILE);
    let data = fs::read_to_string(&path).ok()?;
    match config::parse_config(&data) {
        Ok(cfg) => {
            debug!(path = %path.display(), "Loaded per-script config");
            Some(cfg)
        }
        Err(err) => {
            warn!(path = %path.display(), "Ignoring invalid per-script config: {err:#}");
            None
        }
    }
}

pub fn save_script_config(script_path: &Path, config: &AppConfig) -> Result<()> {
    save_script_config_in(Path::new(CACHE_DIR), script_path, config)
}

pub fn save_script_config_in(root: &Path, script_path: &Path, config: &AppConfig) -> Result<()> {
    let path = hash_dir_in(root, script_path).join(CONFIG_FILE);
    config::save_config(&path, config)
}

/// Cached overrides on top of the base config. Logging and key bindings
/// always come from the base file.
pub fn merge_with_base(base: &AppConfig, cached: Option<AppConfig>) -> AppConfig {
    let Some(mut merged) = cached else {
        return base.clone();
    };
    merged.log_level = base.log_level;
    merged.key_toggle_play_pause = base.key_toggle_play_pause.clone();
    merged.key_restart = base.key_restart.clone();
    merged.key_speed_up = base.key_speed_up.clone();
    merged.key_speed_down = base.key_speed_down.clone();
    merged.key_toggle_settings = base.key_toggle_settings.clone();
    merged.key_toggle_references = base.key_toggle_references.clone();
    merged.key_toggle_edit = base.key_toggle_edit.clone();
    merged.key_safe_quit = base.key_safe_quit.clone();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn hash_dir_is_stable_and_path_specific() {
        let root = Path::new("/tmp/cache-root");
        let a = hash_dir_in(root, Path::new("scripts/intro.txt"));
        let b = hash_dir_in(root, Path::new("scripts/intro.txt"));
        let c = hash_dir_in(root, Path::new("scripts/outro.txt"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(root));
        let name = a.file_name().and_then(|n| n.to_str()).expect("hash name");
        assert_eq!(name.len(), 64);
    }

    #[test]
    fn per_script_config_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = Path::new("episode-12.txt");
        assert!(load_script_config_in(dir.path(), script).is_none());

        let config = AppConfig {
            font_size: 60,
            speed: 75.0,
            ..AppConfig::default()
        };
        save_script_config_in(dir.path(), script, &config).expect("save");
        assert_eq!(load_script_config_in(dir.path(), script), Some(config));
    }

    #[test]
    fn base_keys_and_log_level_win_over_cache() {
        let base = AppConfig {
            log_level: LogLevel::Trace,
            key_restart: "ctrl+shift+r".to_string(),
            ..AppConfig::default()
        };
        let cached = AppConfig {
            font_size: 72,
            log_level: LogLevel::Error,
            key_restart: "x".to_string(),
            ..AppConfig::default()
        };
        let merged = merge_with_base(&base, Some(cached));
        assert_eq!(merged.font_size, 72);
        assert_eq!(merged.log_level, LogLevel::Trace);
        assert_eq!(merged.key_restart, "ctrl+shift+r");
        assert_eq!(merge_with_base(&base, None), base);
    }
}
