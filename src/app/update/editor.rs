use super::super::state::App;
use super::Effect;
use iced::widget::text_editor;
use prompter_core::SessionCommand;
use tracing::info;

impl App {
    pub(super) fn handle_toggle_edit(&mut self, effects: &mut Vec<Effect>) {
        if self.editor.take().is_some() {
            info!("Closed editor without applying");
            return;
        }
        self.run_command(SessionCommand::Pause, effects);
        self.editor = Some(text_editor::Content::with_text(
            self.session.engine().script(),
        ));
        info!("Opened script editor");
    }

    pub(super) fn handle_editor_action(&mut self, action: text_editor::Action) {
        if let Some(editor) = self.editor.as_mut() {
            editor.perform(action);
        }
    }

    pub(super) fn handle_apply_edit(&mut self, effects: &mut Vec<Effect>) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        let script = script_from_editor(editor.text(), self.session.engine().script());
        self.commit_script(script, effects);
    }

    pub(super) fn commit_script(&mut self, script: String, effects: &mut Vec<Effect>) {
        if script == self.session.engine().script() {
            info!("Script unchanged; keeping playback state");
            return;
        }
        self.run_command(SessionCommand::EditScript { script }, effects);
        if !effects.iter().any(|e| matches!(e, Effect::ScrollTo(_))) {
            effects.push(Effect::ScrollTo(0.0));
        }
        info!(
            segments = self.session.engine().segments().len(),
            "Applied script edit"
        );
    }
}

/// The editor always reports a trailing newline; drop it unless the script
/// it was opened on had one.
fn script_from_editor(text: String, original: &str) -> String {
    if original.ends_with('\n') {
        return text;
    }
    match text.strip_suffix('\n') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_core::bundle::ScriptBundle;
    use prompter_core::config::AppConfig;
    use prompter_core::{PlaybackPhase, PrompterSession, RecordingSignal};

    fn build_test_app(config: AppConfig) -> App {
        let bundle = ScriptBundle::from_text("editor", "Draft one<pause>end");
        App::from_session(PrompterSession::new(bundle, config))
    }

    #[test]
    fn committed_edit_restarts_from_the_top() {
        let mut app = build_test_app(AppConfig::default());
        app.handle_start(&mut Vec::new());
        app.handle_scroll_by(40.0, &mut Vec::new());

        let mut effects = Vec::new();
        app.commit_script("Draft two<pause-long>end<topic-change>".to_string(), &mut effects);
        let engine = app.session.engine();
        assert_eq!(engine.phase(), PlaybackPhase::Idle);
        assert_eq!(engine.segments().len(), 4);
        assert_eq!(engine.scroll_position(), 0.0);
        assert!(effects.contains(&Effect::ScrollTo(0.0)));
    }

    #[test]
    fn unchanged_script_is_a_no_op() {
        let mut app = build_test_app(AppConfig::default());
        app.handle_start(&mut Vec::new());
        let mut effects = Vec::new();
        app.commit_script("Draft one<pause>end".to_string(), &mut effects);
        assert!(effects.is_empty());
        assert!(app.session.engine().is_playing());
    }

    #[test]
    fn edit_during_a_take_stops_recording() {
        let config = AppConfig {
            auto_start_recording_on_play: true,
            ..AppConfig::default()
        };
        let mut app = build_test_app(config);
        app.handle_start(&mut Vec::new());
        let mut effects = Vec::new();
        app.commit_script("Rewritten".to_string(), &mut effects);
        assert!(effects.contains(&Effect::Record(RecordingSignal::Stop)));
    }

    #[test]
    fn editor_newline_is_only_dropped_when_added() {
        assert_eq!(
            script_from_editor("Draft one\n".to_string(), "Draft one"),
            "Draft one"
        );
        assert_eq!(
            script_from_editor("Closing line\n".to_string(), "Closing line\n"),
            "Closing line\n"
        );
    }

    #[test]
    fn untouched_script_with_trailing_newline_keeps_playing() {
        let bundle = ScriptBundle::from_text("editor", "Line one<pause>\nLine two\n");
        let mut app = App::from_session(PrompterSession::new(bundle, AppConfig::default()));
        app.handle_start(&mut Vec::new());

        let text = app.session.engine().script().to_string();
        let script = script_from_editor(text, app.session.engine().script());
        let mut effects = Vec::new();
        app.commit_script(script, &mut effects);
        assert!(effects.is_empty());
        assert!(app.session.engine().is_playing());
    }
}
