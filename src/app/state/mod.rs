mod constants;

use crate::takes::TakeLog;
use iced::font::Family;
use iced::widget::text_editor;
use iced::{Color, Font, Task};
use prompter_core::layout::Viewport;
use prompter_core::settings::{FontFamily, RgbColor};
use prompter_core::{PlaybackEvent, PrompterSession, RecordingSink, SessionCommand};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{info, warn};

use super::messages::Message;

pub(crate) use constants::*;

/// Core application state: one prompter session plus viewer chrome.
pub struct App {
    pub(super) session: PrompterSession,
    pub(super) takes: TakeLog,
    /// Present only while edit mode is open.
    pub(super) editor: Option<text_editor::Content>,
    pub(super) frame_origin: Instant,
    /// Offsets recently sent to the scrollable, oldest first.
    pub(super) scroll_requests: VecDeque<f32>,
}

impl App {
    pub(super) fn bootstrap(session: PrompterSession) -> (App, Task<Message>) {
        let app = Self::from_session(session);
        info!(
            title = %app.session.title(),
            segments = app.session.engine().segments().len(),
            references = app.session.references().len(),
            night_mode = matches!(
                app.session.config.theme,
                prompter_core::config::ThemeMode::Night
            ),
            "Initialized app state"
        );
        (app, Task::none())
    }

    pub(super) fn from_session(session: PrompterSession) -> App {
        let takes = match &session.source_path {
            Some(path) => TakeLog::for_script(path),
            None => TakeLog::new(None),
        };
        let mut app = App {
            session,
            takes,
            editor: None,
            frame_origin: Instant::now(),
            scroll_requests: VecDeque::with_capacity(RECENT_SCROLL_REQUESTS),
        };
        app.resync_viewport();
        let mount_events = app.session.dispatch(SessionCommand::Mount);
        app.deliver_recording_signals(mount_events);
        app
    }

    pub fn title(&self) -> String {
        format!("Teleprompter - {}", self.session.title())
    }

    pub(super) fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub(super) fn side_panel_visible(&self) -> bool {
        let config = &self.session.config;
        config.show_settings || (config.show_references && !self.session.references().is_empty())
    }

    /// Size of the script surface inside a window of the given size.
    pub(super) fn surface_viewport(&self, window_width: f32, window_height: f32) -> Viewport {
        let panel = if self.side_panel_visible() {
            SIDE_PANEL_WIDTH_PX
        } else {
            0.0
        };
        Viewport::new(
            window_width - panel - 2.0 * SURFACE_PADDING_PX,
            window_height - TOOLBAR_HEIGHT_PX - 2.0 * SURFACE_PADDING_PX,
        )
    }

    /// Push the estimated surface size for the current window into the engine.
    pub(super) fn resync_viewport(&mut self) {
        let viewport = self.surface_viewport(
            self.session.config.window_width,
            self.session.config.window_height,
        );
        self.session.dispatch(SessionCommand::SetViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    pub(super) fn deliver_recording_signals(&mut self, events: Vec<PlaybackEvent>) {
        for event in events {
            if let PlaybackEvent::Recording(signal) = event {
                if let Err(err) = self.takes.deliver(signal) {
                    warn!(?signal, "Recording sink rejected signal: {err:#}");
                }
            }
        }
    }

    pub(super) fn current_font(&self) -> Font {
        let family = match self.session.engine().settings().font_family {
            FontFamily::Sans => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
            FontFamily::Lexend => Family::Name("Lexend"),
            FontFamily::OpenDyslexic => Family::Name("OpenDyslexic"),
            FontFamily::Courier => Family::Name("Courier"),
            FontFamily::AtkinsonHyperlegible => Family::Name("Atkinson Hyperlegible"),
        };

        Font {
            family,
            ..Font::DEFAULT
        }
    }

    pub(super) fn text_color(&self) -> Color {
        to_color(self.session.engine().settings().text_color)
    }

    pub(super) fn background_color(&self) -> Color {
        to_color(self.session.engine().settings().background_color)
    }
}

pub(super) fn to_color(color: RgbColor) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}
