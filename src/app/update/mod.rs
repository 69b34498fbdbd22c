use prompter_core::{RecordingSignal, TimerId};
use std::time::Duration;

mod appearance;
mod core;
mod editor;
mod playback;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    SaveConfig,
    ScrollTo(f32),
    SchedulePauseResume { timer: TimerId, after: Duration },
    Record(RecordingSignal),
    QuitSafely,
}
