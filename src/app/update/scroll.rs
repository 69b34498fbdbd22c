use super::super::state::{App, MANUAL_SCROLL_TOLERANCE_PX, RECENT_SCROLL_REQUESTS};
use super::Effect;
use prompter_core::SessionCommand;
use prompter_core::layout::Viewport;
use tracing::debug;

impl App {
    /// One rendered line, used for arrow-key nudges.
    pub(super) fn scroll_step(&self) -> f32 {
        let settings = self.session.engine().settings();
        settings.font_size as f32 * settings.line_spacing
    }

    pub(super) fn handle_scroll_by(&mut self, delta: f32, effects: &mut Vec<Effect>) {
        if !delta.is_finite() {
            return;
        }
        self.run_command(SessionCommand::ScrollBy { delta }, effects);
    }

    pub(super) fn handle_scrolled(
        &mut self,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        let measured = Viewport::new(viewport_width, viewport_height);
        let current = self.session.engine().viewport();
        if (measured.width - current.width).abs() > 1.0
            || (measured.height - current.height).abs() > 1.0
        {
            debug!(
                width = measured.width,
                height = measured.height,
                "Surface size measured"
            );
            self.run_command(
                SessionCommand::SetViewport {
                    width: measured.width,
                    height: measured.height,
                },
                effects,
            );
        }

        if !offset_y.is_finite() || self.take_scroll_echo(offset_y) {
            return;
        }
        let position = self.session.engine().scroll_position();
        if (offset_y - position).abs() <= MANUAL_SCROLL_TOLERANCE_PX {
            return;
        }
        debug!(from = position, to = offset_y, "User scrolled the surface");
        self.session
            .dispatch(SessionCommand::ManualScroll { position: offset_y });
    }

    /// Remember an offset handed to the scrollable so its echo can be told
    /// apart from a user gesture.
    pub(super) fn note_scroll_request(&mut self, offset: f32) {
        if self.scroll_requests.len() == RECENT_SCROLL_REQUESTS {
            self.scroll_requests.pop_front();
        }
        self.scroll_requests.push_back(offset);
    }

    /// Consumes the matching request and every older one.
    fn take_scroll_echo(&mut self, offset_y: f32) -> bool {
        let Some(idx) = self
            .scroll_requests
            .iter()
            .rposition(|requested| (offset_y - requested).abs() <= MANUAL_SCROLL_TOLERANCE_PX)
        else {
            return false;
        };
        self.scroll_requests.drain(..=idx);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_core::bundle::ScriptBundle;
    use prompter_core::config::AppConfig;
    use prompter_core::{PauseKind, PrompterSession};
    use std::time::Duration;

    fn build_test_app() -> App {
        let script = (0..40)
            .map(|i| format!("Line {i} of the read.\n"))
            .collect::<String>();
        let bundle = ScriptBundle::from_text("scroll", script);
        App::from_session(PrompterSession::new(bundle, AppConfig::default()))
    }

    fn surface(app: &App) -> Viewport {
        app.session.engine().viewport()
    }

    #[test]
    fn user_scroll_moves_the_clock_while_idle() {
        let mut app = build_test_app();
        let viewport = surface(&app);
        let mut effects = Vec::new();
        app.handle_scrolled(120.0, viewport.width, viewport.height, &mut effects);
        assert_eq!(app.session.engine().scroll_position(), 120.0);
        assert!(effects.is_empty());

        // Our own echo is ignored.
        app.handle_scrolled(120.3, viewport.width, viewport.height, &mut effects);
        assert_eq!(app.session.engine().scroll_position(), 120.0);
    }

    #[test]
    fn wheel_scroll_moves_a_running_clock() {
        let mut app = build_test_app();
        app.handle_start(&mut Vec::new());
        let viewport = surface(&app);
        let target = 300.0_f32.min(app.session.engine().max_scroll());
        app.handle_scrolled(target, viewport.width, viewport.height, &mut Vec::new());
        assert_eq!(app.session.engine().scroll_position(), target);
        assert!(app.session.engine().is_playing());
    }

    #[test]
    fn late_echo_does_not_rewind_an_auto_pause() {
        let bundle = ScriptBundle::from_text("echo", "Opening line<pause-long>Closing line");
        let mut app = App::from_session(PrompterSession::new(bundle, AppConfig::default()));
        app.handle_start(&mut Vec::new());

        let origin = app.frame_origin;
        let mut requested = Vec::new();
        let mut frame = 0u64;
        loop {
            let mut effects = Vec::new();
            app.handle_frame(origin + Duration::from_millis(16 * frame), &mut effects);
            for effect in &effects {
                if let Effect::ScrollTo(offset) = effect {
                    app.note_scroll_request(*offset);
                    requested.push(*offset);
                }
            }
            if app.session.engine().current_pause_kind().is_some() {
                break;
            }
            assert!(frame < 10_000, "pause never fired");
            frame += 1;
        }
        assert!(requested.len() >= 2);

        let paused_at = app.session.engine().scroll_position();
        let stale = requested[requested.len() - 2];
        assert!((paused_at - stale).abs() > MANUAL_SCROLL_TOLERANCE_PX);
        let viewport = surface(&app);
        app.handle_scrolled(stale, viewport.width, viewport.height, &mut Vec::new());
        assert_eq!(app.session.engine().scroll_position(), paused_at);
        assert_eq!(app.session.engine().current_pause_kind(), Some(PauseKind::Long));

        // A real gesture afterwards still lands.
        app.handle_scrolled(stale - 40.0, viewport.width, viewport.height, &mut Vec::new());
        assert_eq!(app.session.engine().scroll_position(), (stale - 40.0).max(0.0));
    }

    #[test]
    fn manual_scroll_is_clamped_and_keeps_pause_state() {
        let mut app = build_test_app();
        app.handle_start(&mut Vec::new());
        app.handle_pause(&mut Vec::new());
        let viewport = surface(&app);
        app.handle_scrolled(1.0e7, viewport.width, viewport.height, &mut Vec::new());
        let engine = app.session.engine();
        assert_eq!(engine.scroll_position(), engine.max_scroll());
        assert!(engine.is_paused());
    }

    #[test]
    fn measured_surface_replaces_the_estimate() {
        let mut app = build_test_app();
        app.handle_scrolled(0.0, 700.0, 500.0, &mut Vec::new());
        assert_eq!(surface(&app), Viewport::new(700.0, 500.0));
    }

    #[test]
    fn arrow_nudges_scroll_by_one_line() {
        let mut app = build_test_app();
        let step = app.scroll_step();
        let mut effects = Vec::new();
        app.handle_scroll_by(step, &mut effects);
        assert_eq!(effects, vec![Effect::ScrollTo(step)]);

        let mut effects = Vec::new();
        app.handle_scroll_by(-10.0 * step, &mut effects);
        assert_eq!(effects, vec![Effect::ScrollTo(0.0)]);
        assert_eq!(app.session.engine().scroll_position(), 0.0);
    }
}
