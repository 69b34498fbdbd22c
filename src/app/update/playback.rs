use super::super::state::App;
use super::Effect;
use prompter_core::{SessionCommand, TimerId};
use std::time::Instant;

impl App {
    pub(super) fn handle_start(&mut self, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::Start, effects);
    }

    pub(super) fn handle_pause(&mut self, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::Pause, effects);
    }

    pub(super) fn handle_resume(&mut self, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::Resume, effects);
    }

    pub(super) fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::TogglePlayPause, effects);
    }

    pub(super) fn handle_restart(&mut self, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::Restart, effects);
        // Restart at position zero still needs the surface pulled back up.
        if !effects.iter().any(|e| matches!(e, Effect::ScrollTo(_))) {
            effects.push(Effect::ScrollTo(self.session.engine().scroll_position()));
        }
    }

    pub(super) fn handle_speed_changed(&mut self, speed: f32, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::SetSpeed { speed }, effects);
    }

    pub(super) fn handle_nudge_speed(&mut self, delta: f32, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::NudgeSpeed { delta }, effects);
    }

    pub(super) fn handle_frame(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let now_ms = now.saturating_duration_since(self.frame_origin).as_secs_f64() * 1000.0;
        self.run_command(SessionCommand::Frame { now_ms }, effects);
    }

    pub(super) fn handle_tick(&mut self) {
        self.session.dispatch(SessionCommand::TickSecond);
    }

    pub(super) fn handle_pause_timer_elapsed(&mut self, timer: TimerId, effects: &mut Vec<Effect>) {
        self.run_command(SessionCommand::PauseTimerElapsed { timer }, effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_core::bundle::ScriptBundle;
    use prompter_core::config::AppConfig;
    use prompter_core::{PauseKind, PlaybackPhase, PrompterSession, RecordingSignal};
    use std::time::Duration;

    fn build_test_app(script: &str, config: AppConfig) -> App {
        let bundle = ScriptBundle::from_text("playback", script);
        App::from_session(PrompterSession::new(bundle, config))
    }

    /// Feed 60 fps frames until an effect matching `stop` shows up.
    fn run_frames_until(
        app: &mut App,
        stop: impl Fn(&Effect) -> bool,
        max_frames: usize,
    ) -> Vec<Effect> {
        let origin = app.frame_origin;
        for frame in 0..max_frames {
            let mut effects = Vec::new();
            let now = origin + Duration::from_millis(16 * frame as u64);
            app.handle_frame(now, &mut effects);
            if effects.iter().any(&stop) {
                return effects;
            }
        }
        panic!("no matching effect within {max_frames} frames");
    }

    #[test]
    fn frames_scroll_the_surface_while_running() {
        let mut app = build_test_app("A long opening line", AppConfig::default());
        let mut effects = Vec::new();
        app.handle_start(&mut effects);
        assert!(app.session.engine().is_playing());
        assert!(effects.is_empty());

        let origin = app.frame_origin;
        let mut effects = Vec::new();
        app.handle_frame(origin, &mut effects);
        assert!(effects.is_empty(), "first frame only primes the clock");

        app.handle_frame(origin + Duration::from_millis(500), &mut effects);
        assert!(matches!(effects.as_slice(), [Effect::ScrollTo(y)] if *y > 0.0));
    }

    #[test]
    fn auto_pause_schedules_resume_with_configured_delay() {
        let config = AppConfig {
            pause_long_ms: 2_750,
            speed: 300.0,
            ..AppConfig::default()
        };
        let mut app = build_test_app("Lead<pause-long>tail", config);
        app.handle_start(&mut Vec::new());

        let effects = run_frames_until(
            &mut app,
            |e| matches!(e, Effect::SchedulePauseResume { .. }),
            5_000,
        );
        let Some(Effect::SchedulePauseResume { timer, after }) = effects
            .iter()
            .find(|e| matches!(e, Effect::SchedulePauseResume { .. }))
            .cloned()
        else {
            unreachable!()
        };
        assert_eq!(after, Duration::from_millis(2_750));
        assert_eq!(app.session.engine().current_pause_kind(), Some(PauseKind::Long));

        let mut effects = Vec::new();
        app.handle_pause_timer_elapsed(timer, &mut effects);
        assert_eq!(app.session.engine().phase(), PlaybackPhase::Running);

        // A second delivery of the same timer is stale.
        app.handle_pause_timer_elapsed(timer, &mut effects);
        assert_eq!(app.session.engine().phase(), PlaybackPhase::Running);
    }

    #[test]
    fn recording_edges_become_effects() {
        let config = AppConfig {
            auto_start_recording_on_play: true,
            ..AppConfig::default()
        };
        let mut app = build_test_app("Take one", config);
        let mut effects = Vec::new();
        app.handle_start(&mut effects);
        assert_eq!(effects, vec![Effect::Record(RecordingSignal::Start)]);

        let mut effects = Vec::new();
        app.handle_restart(&mut effects);
        assert!(effects.contains(&Effect::Record(RecordingSignal::Stop)));
        assert!(effects.contains(&Effect::ScrollTo(0.0)));
    }

    #[test]
    fn speed_changes_are_saved() {
        let mut app = build_test_app("Speed", AppConfig::default());
        let mut effects = Vec::new();
        app.handle_nudge_speed(5.0, &mut effects);
        assert_eq!(effects, vec![Effect::SaveConfig]);
        assert_eq!(app.session.config.speed, 55.0);

        let mut effects = Vec::new();
        app.handle_speed_changed(55.0, &mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut app = build_test_app("Tick", AppConfig::default());
        app.handle_tick();
        assert_eq!(app.session.engine().elapsed_seconds(), 0);
        app.handle_start(&mut Vec::new());
        app.handle_tick();
        app.handle_tick();
        assert_eq!(app.session.engine().elapsed_label(), "00:02");
    }
}
