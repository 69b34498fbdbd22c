use crate::settings::RgbColor;

pub(crate) fn default_font_size() -> u32 {
    36
}

pub(crate) fn default_line_spacing() -> f32 {
    1.5
}

pub(crate) fn default_text_color() -> RgbColor {
    RgbColor::WHITE
}

pub(crate) fn default_background_color() -> RgbColor {
    RgbColor::BLACK
}

pub(crate) fn default_show_pause_tags() -> bool {
    true
}

pub(crate) fn default_margin_horizontal() -> u16 {
    48
}

pub(crate) fn default_speed() -> f32 {
    crate::clock::DEFAULT_SPEED
}

pub(crate) fn default_speed_step() -> f32 {
    5.0
}

pub(crate) fn default_trigger_line() -> f32 {
    crate::layout::TRIGGER_LINE_FRACTION
}

pub(crate) fn default_pause_short_ms() -> u64 {
    1_000
}

pub(crate) fn default_pause_medium_ms() -> u64 {
    2_000
}

pub(crate) fn default_pause_long_ms() -> u64 {
    3_000
}

pub(crate) fn default_pause_normal_ms() -> u64 {
    1_500
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_show_settings() -> bool {
    false
}

pub(crate) fn default_show_references() -> bool {
    true
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_restart() -> String {
    "ctrl+r".to_string()
}

pub(crate) fn default_key_speed_up() -> String {
    "]".to_string()
}

pub(crate) fn default_key_speed_down() -> String {
    "[".to_string()
}

pub(crate) fn default_key_toggle_settings() -> String {
    "ctrl+t".to_string()
}

pub(crate) fn default_key_toggle_references() -> String {
    "ctrl+l".to_string()
}

pub(crate) fn default_key_toggle_edit() -> String {
    "ctrl+e".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
