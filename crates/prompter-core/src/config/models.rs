use super::defaults;
use crate::pause::PauseDurations;
use crate::recording::RecordingOptions;
use crate::settings::{FontFamily, PresentationSettings, RgbColor};
use serde::Deserialize;
use ts_rs::TS;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default = "defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "defaults::default_text_color")]
    pub text_color: RgbColor,
    #[serde(default = "defaults::default_background_color")]
    pub background_color: RgbColor,
    #[serde(default = "defaults::default_show_pause_tags")]
    pub show_pause_tags: bool,
    #[serde(default = "defaults::default_margin_horizontal")]
    pub margin_horizontal: u16,
    #[serde(default = "defaults::default_speed")]
    pub speed: f32,
    #[serde(default = "defaults::default_speed_step")]
    pub speed_step: f32,
    #[serde(default = "defaults::default_trigger_line")]
    pub trigger_line: f32,
    #[serde(default = "defaults::default_pause_short_ms")]
    pub pause_short_ms: u64,
    #[serde(default = "defaults::default_pause_medium_ms")]
    pub pause_medium_ms: u64,
    #[serde(default = "defaults::default_pause_long_ms")]
    pub pause_long_ms: u64,
    #[serde(default = "defaults::default_pause_normal_ms")]
    pub pause_normal_ms: u64,
    #[serde(default)]
    pub auto_enable_recording_on_mount: bool,
    #[serde(default)]
    pub auto_start_recording_on_play: bool,
    #[serde(default)]
    pub auto_stop_recording_on_complete: bool,
    #[serde(default = "defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "defaults::default_show_settings")]
    pub show_settings: bool,
    #[serde(default = "defaults::default_show_references")]
    pub show_references: bool,
    #[serde(default = "defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    pub key_toggle_play_pause: String,
    #[serde(default = "defaults::default_key_restart")]
    pub key_restart: String,
    #[serde(default = "defaults::default_key_speed_up")]
    pub key_speed_up: String,
    #[serde(default = "defaults::default_key_speed_down")]
    pub key_speed_down: String,
    #[serde(default = "defaults::default_key_toggle_settings")]
    pub key_toggle_settings: String,
    #[serde(default = "defaults::default_key_toggle_references")]
    pub key_toggle_references: String,
    #[serde(default = "defaults::default_key_toggle_edit")]
    pub key_toggle_edit: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            font_family: FontFamily::Sans,
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            text_color: defaults::default_text_color(),
            background_color: defaults::default_background_color(),
            show_pause_tags: defaults::default_show_pause_tags(),
            margin_horizontal: defaults::default_margin_horizontal(),
            speed: defaults::default_speed(),
            speed_step: defaults::default_speed_step(),
            trigger_line: defaults::default_trigger_line(),
            pause_short_ms: defaults::default_pause_short_ms(),
            pause_medium_ms: defaults::default_pause_medium_ms(),
            pause_long_ms: defaults::default_pause_long_ms(),
            pause_normal_ms: defaults::default_pause_normal_ms(),
            auto_enable_recording_on_mount: false,
            auto_start_recording_on_play: false,
            auto_stop_recording_on_complete: false,
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            show_settings: defaults::default_show_settings(),
            show_references: defaults::default_show_references(),
            log_level: defaults::default_log_level(),
            key_toggle_play_pause: defaults::default_key_toggle_play_pause(),
            key_restart: defaults::default_key_restart(),
            key_speed_up: defaults::default_key_speed_up(),
            key_speed_down: defaults::default_key_speed_down(),
            key_toggle_settings: defaults::default_key_toggle_settings(),
            key_toggle_references: defaults::default_key_toggle_references(),
            key_toggle_edit: defaults::default_key_toggle_edit(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    pub fn presentation(&self) -> PresentationSettings {
        PresentationSettings {
            font_family: self.font_family,
            font_size: self.font_size,
            line_spacing: self.line_spacing,
            text_color: self.text_color,
            background_color: self.background_color,
            show_pause_tags: self.show_pause_tags,
            margin_horizontal: self.margin_horizontal,
        }
        .clamped()
    }

    /// Copy live presentation values back so they can be persisted.
    pub fn store_presentation(&mut self, settings: &PresentationSettings) {
        self.font_family = settings.font_family;
        self.font_size = settings.font_size;
        self.line_spacing = settings.line_spacing;
        self.text_color = settings.text_color;
        self.background_color = settings.background_color;
        self.show_pause_tags = settings.show_pause_tags;
        self.margin_horizontal = settings.margin_horizontal;
    }

    pub fn pause_durations(&self) -> PauseDurations {
        PauseDurations {
            short: self.pause_short_ms,
            medium: self.pause_medium_ms,
            long: self.pause_long_ms,
            normal: self.pause_normal_ms,
        }
    }

    pub fn recording_options(&self) -> RecordingOptions {
        RecordingOptions {
            auto_enable_on_mount: self.auto_enable_recording_on_mount,
            auto_start_on_play: self.auto_start_recording_on_play,
            auto_stop_on_complete: self.auto_stop_recording_on_complete,
        }
    }
}

/// Theme of the surrounding window chrome.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ThemeMode {
    Day,
    #[default]
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
