use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use prompter_core::{PlaybackEvent, SessionCommand};
use tracing::{debug, info};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Start => self.handle_start(&mut effects),
            Message::Pause => self.handle_pause(&mut effects),
            Message::Resume => self.handle_resume(&mut effects),
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::Restart => self.handle_restart(&mut effects),
            Message::SpeedChanged(speed) => self.handle_speed_changed(speed, &mut effects),
            Message::NudgeSpeed(delta) => self.handle_nudge_speed(delta, &mut effects),
            Message::FontFamilyChanged(family) => {
                self.handle_font_family_changed(family, &mut effects);
            }
            Message::FontSizeChanged(size) => self.handle_font_size_changed(size, &mut effects),
            Message::LineSpacingChanged(spacing) => {
                self.handle_line_spacing_changed(spacing, &mut effects);
            }
            Message::MarginHorizontalChanged(margin) => {
                self.handle_margin_horizontal_changed(margin, &mut effects);
            }
            Message::ColorPresetSelected(preset) => {
                self.handle_color_preset_selected(preset, &mut effects);
            }
            Message::ShowPauseTagsToggled(show) => {
                self.handle_show_pause_tags_toggled(show, &mut effects);
            }
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::ToggleSettings => self.handle_toggle_settings(&mut effects),
            Message::ToggleReferences => self.handle_toggle_references(&mut effects),
            Message::ToggleEdit => self.handle_toggle_edit(&mut effects),
            Message::EditorAction(action) => self.handle_editor_action(action),
            Message::ApplyEdit => self.handle_apply_edit(&mut effects),
            Message::ScrollBy(delta) => self.handle_scroll_by(delta, &mut effects),
            Message::Scrolled {
                offset_y,
                viewport_width,
                viewport_height,
            } => self.handle_scrolled(offset_y, viewport_width, viewport_height, &mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Frame(now) => self.handle_frame(now, &mut effects),
            Message::Tick(_) => self.handle_tick(),
            Message::PauseTimerElapsed(timer) => {
                self.handle_pause_timer_elapsed(timer, &mut effects);
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => {
                info!("Safe quit requested");
                effects.push(Effect::QuitSafely);
            }
        }

        effects
    }

    /// Run one session command and turn its playback events into effects.
    /// A moved clock position always produces a `ScrollTo`.
    pub(in crate::app::update) fn run_command(
        &mut self,
        command: SessionCommand,
        effects: &mut Vec<Effect>,
    ) {
        let before = self.session.engine().scroll_position();
        let action = command.action();
        let events = self.session.dispatch(command);

        for event in events {
            match event {
                PlaybackEvent::AutoPaused {
                    segment,
                    kind,
                    timer,
                    resume_after,
                } => {
                    info!(segment, %kind, %timer, ?resume_after, "Auto-pause reached");
                    effects.push(Effect::SchedulePauseResume {
                        timer,
                        after: resume_after,
                    });
                }
                PlaybackEvent::Recording(signal) => effects.push(Effect::Record(signal)),
                PlaybackEvent::SpeedChanged(_) => effects.push(Effect::SaveConfig),
                PlaybackEvent::Completed => {
                    info!(elapsed = %self.session.engine().elapsed_label(), "Script finished");
                }
                other => debug!(action, event = ?other, "Playback event"),
            }
        }

        let after = self.session.engine().scroll_position();
        if (after - before).abs() > f32::EPSILON {
            effects.push(Effect::ScrollTo(after));
        }
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Ctrl-C received; quitting");
            effects.push(Effect::QuitSafely);
        }
    }
}
