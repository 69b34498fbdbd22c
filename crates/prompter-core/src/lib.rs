//! Headless teleprompter core.
//!
//! Everything here is GUI-agnostic: the viewer (or any other host) feeds in
//! frame timestamps, second ticks and pause-timer expiries, and reads back
//! playback events plus a serialisable snapshot.

pub mod bundle;
pub mod cache;
pub mod clock;
pub mod config;
pub mod engine;
pub mod layout;
pub mod pause;
pub mod recording;
pub mod script;
pub mod session;
pub mod settings;

pub use engine::{PlaybackEvent, Teleprompter};
pub use pause::{PlaybackPhase, TimerId};
pub use recording::{RecordingBridge, RecordingOptions, RecordingSignal, RecordingSink};
pub use script::{PauseKind, Segment, SegmentKind, parse_script};
pub use session::{PrompterSession, PrompterSnapshot, SessionCommand, SessionEvent};
