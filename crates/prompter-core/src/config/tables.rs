use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use crate::settings::{FontFamily, RgbColor};
use serde::Deserialize;

/// Section names that mark a document as using the table layout.
pub(super) const SECTION_NAMES: [&str; 6] =
    ["appearance", "playback", "recording", "ui", "logging", "keys"];

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    recording: RecordingConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_family: tables.appearance.font_family,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            text_color: tables.appearance.text_color,
            background_color: tables.appearance.background_color,
            show_pause_tags: tables.appearance.show_pause_tags,
            margin_horizontal: tables.appearance.margin_horizontal,
            speed: tables.playback.speed,
            speed_step: tables.playback.speed_step,
            trigger_line: tables.playback.trigger_line,
            pause_short_ms: tables.playback.pause_short_ms,
            pause_medium_ms: tables.playback.pause_medium_ms,
            pause_long_ms: tables.playback.pause_long_ms,
            pause_normal_ms: tables.playback.pause_normal_ms,
            auto_enable_recording_on_mount: tables.recording.auto_enable_on_mount,
            auto_start_recording_on_play: tables.recording.auto_start_on_play,
            auto_stop_recording_on_complete: tables.recording.auto_stop_on_complete,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            show_settings: tables.ui.show_settings,
            show_references: tables.ui.show_references,
            log_level: tables.logging.log_level,
            key_toggle_play_pause: tables.keys.toggle_play_pause,
            key_restart: tables.keys.restart,
            key_speed_up: tables.keys.speed_up,
            key_speed_down: tables.keys.speed_down,
            key_toggle_settings: tables.keys.toggle_settings,
            key_toggle_references: tables.keys.toggle_references,
            key_toggle_edit: tables.keys.toggle_edit,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_family: config.font_family,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                text_color: config.text_color,
                background_color: config.background_color,
                show_pause_tags: config.show_pause_tags,
                margin_horizontal: config.margin_horizontal,
            },
            playback: PlaybackConfig {
                speed: config.speed,
                speed_step: config.speed_step,
                trigger_line: config.trigger_line,
                pause_short_ms: config.pause_short_ms,
                pause_medium_ms: config.pause_medium_ms,
                pause_long_ms: config.pause_long_ms,
                pause_normal_ms: config.pause_normal_ms,
            },
            recording: RecordingConfig {
                auto_enable_on_mount: config.auto_enable_recording_on_mount,
                auto_start_on_play: config.auto_start_recording_on_play,
                auto_stop_on_complete: config.auto_stop_recording_on_complete,
            },
            ui: UiConfig {
                window_width: config.window_width,
                window_height: config.window_height,
                show_settings: config.show_settings,
                show_references: config.show_references,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                toggle_play_pause: config.key_toggle_play_pause.clone(),
                restart: config.key_restart.clone(),
                speed_up: config.key_speed_up.clone(),
                speed_down: config.key_speed_down.clone(),
                toggle_settings: config.key_toggle_settings.clone(),
                toggle_references: config.key_toggle_references.clone(),
                toggle_edit: config.key_toggle_edit.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default)]
    font_family: FontFamily,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_text_color")]
    text_color: RgbColor,
    #[serde(default = "defaults::default_background_color")]
    background_color: RgbColor,
    #[serde(default = "defaults::default_show_pause_tags")]
    show_pause_tags: bool,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_horizontal: u16,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_family: FontFamily::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            text_color: defaults::default_text_color(),
            background_color: defaults::default_background_color(),
            show_pause_tags: defaults::default_show_pause_tags(),
            margin_horizontal: defaults::default_margin_horizontal(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PlaybackConfig {
    #[serde(default = "defaults::default_speed")]
    speed: f32,
    #[serde(default = "defaults::default_speed_step")]
    speed_step: f32,
    #[serde(default = "defaults::default_trigger_line")]
    trigger_line: f32,
    #[serde(default = "defaults::default_pause_short_ms")]
    pause_short_ms: u64,
    #[serde(default = "defaults::default_pause_medium_ms")]
    pause_medium_ms: u64,
    #[serde(default = "defaults::default_pause_long_ms")]
    pause_long_ms: u64,
    #[serde(default = "defaults::default_pause_normal_ms")]
    pause_normal_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            speed: defaults::default_speed(),
            speed_step: defaults::default_speed_step(),
            trigger_line: defaults::default_trigger_line(),
            pause_short_ms: defaults::default_pause_short_ms(),
            pause_medium_ms: defaults::default_pause_medium_ms(),
            pause_long_ms: defaults::default_pause_long_ms(),
            pause_normal_ms: defaults::default_pause_normal_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct RecordingConfig {
    #[serde(default)]
    auto_enable_on_mount: bool,
    #[serde(default)]
    auto_start_on_play: bool,
    #[serde(default)]
    auto_stop_on_complete: bool,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_show_settings")]
    show_settings: bool,
    #[serde(default = "defaults::default_show_references")]
    show_references: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            show_settings: defaults::default_show_settings(),
            show_references: defaults::default_show_references(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    toggle_play_pause: String,
    #[serde(default = "defaults::default_key_restart")]
    restart: String,
    #[serde(default = "defaults::default_key_speed_up")]
    speed_up: String,
    #[serde(default = "defaults::default_key_speed_down")]
    speed_down: String,
    #[serde(default = "defaults::default_key_toggle_settings")]
    toggle_settings: String,
    #[serde(default = "defaults::default_key_toggle_references")]
    toggle_references: String,
    #[serde(default = "defaults::default_key_toggle_edit")]
    toggle_edit: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_play_pause: defaults::default_key_toggle_play_pause(),
            restart: defaults::default_key_restart(),
            speed_up: defaults::default_key_speed_up(),
            speed_down: defaults::default_key_speed_down(),
            toggle_settings: defaults::default_key_toggle_settings(),
            toggle_references: defaults::default_key_toggle_references(),
            toggle_edit: defaults::default_key_toggle_edit(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
