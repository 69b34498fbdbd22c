use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::ArrowUp) => "up".to_string(),
            Key::Named(key::Named::ArrowDown) => "down".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };
        let config = &self.session.config;

        // Edit mode only honours leaving it and quitting.
        if Self::shortcut_matches(&config.key_toggle_edit, "ctrl+e", &pressed, modifiers) {
            return Some(Message::ToggleEdit);
        }
        if Self::shortcut_matches(&config.key_safe_quit, "q", &pressed, modifiers) {
            return Some(Message::SafeQuit);
        }
        if self.is_editing() {
            return None;
        }

        let step = self.scroll_step();
        if Self::shortcut_matches(&config.key_toggle_play_pause, "space", &pressed, modifiers) {
            Some(Message::TogglePlayPause)
        } else if Self::shortcut_matches(&config.key_restart, "ctrl+r", &pressed, modifiers) {
            Some(Message::Restart)
        } else if Self::shortcut_matches(&config.key_speed_up, "]", &pressed, modifiers) {
            Some(Message::NudgeSpeed(config.speed_step))
        } else if Self::shortcut_matches(&config.key_speed_down, "[", &pressed, modifiers) {
            Some(Message::NudgeSpeed(-config.speed_step))
        } else if Self::shortcut_matches(&config.key_toggle_settings, "ctrl+t", &pressed, modifiers)
        {
            Some(Message::ToggleSettings)
        } else if Self::shortcut_matches(
            &config.key_toggle_references,
            "ctrl+l",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleReferences)
        } else if Self::shortcut_matches("up", "up", &pressed, modifiers) {
            Some(Message::ScrollBy(-step))
        } else if Self::shortcut_matches("down", "down", &pressed, modifiers) {
            Some(Message::ScrollBy(step))
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
                .replace("spacebar", "space")
                .replace("arrowup", "up")
                .replace("arrowdown", "down")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;
    use prompter_core::PrompterSession;
    use prompter_core::bundle::ScriptBundle;
    use prompter_core::config::AppConfig;

    fn build_test_app() -> App {
        let bundle = ScriptBundle::from_text("keys", "Press<pause>keys");
        App::from_session(PrompterSession::new(bundle, AppConfig::default()))
    }

    #[test]
    fn normalizes_spacebar_alias() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
        assert_eq!(App::normalize_shortcut_token("ArrowUp", "x"), "up");
    }

    #[test]
    fn matches_ctrl_r_shortcut() {
        assert!(App::shortcut_matches("ctrl+r", "x", "r", Modifiers::CTRL));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+r",
            "x",
            "r",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn blank_binding_uses_fallback() {
        assert!(App::shortcut_matches("  ", "space", "space", Modifiers::empty()));
    }

    #[test]
    fn default_bindings_map_to_messages() {
        let app = build_test_app();
        assert!(matches!(
            app.shortcut_message_for_key(Key::Named(key::Named::Space), Modifiers::empty()),
            Some(Message::TogglePlayPause)
        ));
        assert!(matches!(
            app.shortcut_message_for_key(Key::Character("r".into()), Modifiers::CTRL),
            Some(Message::Restart)
        ));
        assert!(matches!(
            app.shortcut_message_for_key(Key::Character("]".into()), Modifiers::empty()),
            Some(Message::NudgeSpeed(step)) if step > 0.0
        ));
        assert!(matches!(
            app.shortcut_message_for_key(Key::Named(key::Named::ArrowDown), Modifiers::empty()),
            Some(Message::ScrollBy(step)) if step > 0.0
        ));
        assert!(
            app.shortcut_message_for_key(Key::Character("r".into()), Modifiers::empty())
                .is_none()
        );
    }
}
