use super::super::super::messages::Message;
use super::super::super::state::{App, TEXT_SCROLL_ID};
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use prompter_core::session::persist_session_housekeeping;
use prompter_core::{RecordingSink, SessionCommand};
use tracing::warn;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                if let Err(err) = self.session.persist_script_config() {
                    warn!("Failed to save per-script config: {err:#}");
                }
                Task::none()
            }
            Effect::ScrollTo(offset) => {
                self.note_scroll_request(offset);
                scrollable::scroll_to(TEXT_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y: offset })
            }
            Effect::SchedulePauseResume { timer, after } => Task::perform(
                async move {
                    tokio::time::sleep(after).await;
                    timer
                },
                Message::PauseTimerElapsed,
            ),
            Effect::Record(signal) => {
                if let Err(err) = self.takes.deliver(signal) {
                    warn!(?signal, "Recording sink rejected signal: {err:#}");
                }
                Task::none()
            }
            Effect::QuitSafely => {
                let events = self.session.dispatch(SessionCommand::Unmount);
                self.deliver_recording_signals(events);
                persist_session_housekeeping(&self.session);
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(window::Event::CloseRequested) => Some(Message::SafeQuit),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
