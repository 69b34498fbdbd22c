mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use iced::{Size, Theme, window};
use prompter_core::PrompterSession;
use prompter_core::config::ThemeMode;

/// Helper to launch the app around a loaded session.
pub fn run_app(session: PrompterSession) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(session.config.window_width, session.config.window_height),
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application(App::title, App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.session.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(session))
}
