use super::super::messages::ColorPreset;
use super::super::state::App;
use super::Effect;
use prompter_core::SessionCommand;
use prompter_core::config::ThemeMode;
use prompter_core::settings::{FontFamily, SettingsPatch};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_font_family_changed(
        &mut self,
        family: FontFamily,
        effects: &mut Vec<Effect>,
    ) {
        debug!(family = %family, "Font family changed");
        self.apply_patch(
            SettingsPatch {
                font_family: Some(family),
                ..SettingsPatch::default()
            },
            effects,
        );
    }

    pub(super) fn handle_font_size_changed(&mut self, size: u32, effects: &mut Vec<Effect>) {
        self.apply_patch(
            SettingsPatch {
                font_size: Some(size),
                ..SettingsPatch::default()
            },
            effects,
        );
    }

    pub(super) fn handle_line_spacing_changed(&mut self, spacing: f32, effects: &mut Vec<Effect>) {
        self.apply_patch(
            SettingsPatch {
                line_spacing: Some(spacing),
                ..SettingsPatch::default()
            },
            effects,
        );
    }

    pub(super) fn handle_margin_horizontal_changed(
        &mut self,
        margin: u16,
        effects: &mut Vec<Effect>,
    ) {
        self.apply_patch(
            SettingsPatch {
                margin_horizontal: Some(margin),
                ..SettingsPatch::default()
            },
            effects,
        );
    }

    pub(super) fn handle_color_preset_selected(
        &mut self,
        preset: ColorPreset,
        effects: &mut Vec<Effect>,
    ) {
        let (text, background) = preset.colors();
        info!(preset = %preset, "Applied colour preset");
        self.apply_patch(
            SettingsPatch {
                text_color: Some(text),
                background_color: Some(background),
                ..SettingsPatch::default()
            },
            effects,
        );
    }

    pub(super) fn handle_show_pause_tags_toggled(&mut self, show: bool, effects: &mut Vec<Effect>) {
        info!(show, "Pause tag visibility changed");
        self.apply_patch(
            SettingsPatch {
                show_pause_tags: Some(show),
                ..SettingsPatch::default()
            },
            effects,
        );
    }

    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        let next = match self.session.config.theme {
            ThemeMode::Night => ThemeMode::Day,
            ThemeMode::Day => ThemeMode::Night,
        };
        info!(
            night_mode = matches!(next, ThemeMode::Night),
            "Toggled theme"
        );
        self.session.config.theme = next;
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_toggle_settings(&mut self, effects: &mut Vec<Effect>) {
        debug!("Toggled settings panel");
        self.session.config.show_settings = !self.session.config.show_settings;
        self.resync_viewport();
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_toggle_references(&mut self, effects: &mut Vec<Effect>) {
        debug!("Toggled references panel");
        self.session.config.show_references = !self.session.config.show_references;
        self.resync_viewport();
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return;
        }
        let config = &mut self.session.config;
        if (config.window_width - width).abs() < 0.5 && (config.window_height - height).abs() < 0.5
        {
            return;
        }
        config.window_width = width;
        config.window_height = height;
        debug!(width, height, "Window resized");
        self.resync_viewport();
        effects.push(Effect::SaveConfig);
    }

    /// Saves only when the patch actually changed something.
    fn apply_patch(&mut self, patch: SettingsPatch, effects: &mut Vec<Effect>) {
        let before = self.session.engine().settings().clone();
        self.run_command(SessionCommand::ApplySettings { patch }, effects);
        if *self.session.engine().settings() != before {
            effects.push(Effect::SaveConfig);
        }
    }
}
