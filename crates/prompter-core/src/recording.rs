//! Recording bridge: forwards playback edges to an external capture sink.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordingOptions {
    /// Arm the capture device as soon as the view mounts.
    pub auto_enable_on_mount: bool,
    pub auto_start_on_play: bool,
    pub auto_stop_on_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum RecordingSignal {
    Enable,
    Start,
    Stop,
}

/// External capture mechanism.
pub trait RecordingSink {
    fn enable(&mut self) -> anyhow::Result<()>;
    fn start(&mut self) -> anyhow::Result<()>;
    fn stop(&mut self) -> anyhow::Result<()>;

    fn deliver(&mut self, signal: RecordingSignal) -> anyhow::Result<()> {
        match signal {
            RecordingSignal::Enable => self.enable(),
            RecordingSignal::Start => self.start(),
            RecordingSignal::Stop => self.stop(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingBridge {
    options: RecordingOptions,
}

impl RecordingBridge {
    pub fn new(options: RecordingOptions) -> Self {
        RecordingBridge { options }
    }

    pub fn options(&self) -> RecordingOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RecordingOptions) {
        self.options = options;
    }

    pub fn on_mount(&self) -> Option<RecordingSignal> {
        self.options
            .auto_enable_on_mount
            .then_some(RecordingSignal::Enable)
    }

    pub fn on_playback_started(&self) -> Option<RecordingSignal> {
        self.options
            .auto_start_on_play
            .then_some(RecordingSignal::Start)
    }

    pub fn on_playback_stopped(&self) -> Option<RecordingSignal> {
        self.options
            .auto_start_on_play
            .then_some(RecordingSignal::Stop)
    }

    pub fn on_script_complete(&self) -> Option<RecordingSignal> {
        (self.options.auto_start_on_play || self.options.auto_stop_on_complete)
            .then_some(RecordingSignal::Stop)
    }
}
