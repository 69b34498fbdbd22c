//! Frame-driven scroll clock and the whole-second elapsed counter.

use tracing::trace;

/// Slowest allowed scroll speed, in layout units per second.
pub const MIN_SPEED: f32 = 5.0;
/// Fastest allowed scroll speed, in layout units per second.
pub const MAX_SPEED: f32 = 300.0;
pub const DEFAULT_SPEED: f32 = 50.0;

pub fn clamp_speed(speed: f32) -> f32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockAdvance {
    /// First frame after a (re)start; only the time reference was recorded.
    Primed,
    Moved(f32),
    /// The position is pinned at the end of the scrollable range.
    ReachedEnd,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    position: f32,
    speed: f32,
    last_frame_ms: Option<f64>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        PlaybackClock::new(DEFAULT_SPEED)
    }
}

impl PlaybackClock {
    pub fn new(speed: f32) -> Self {
        let speed = if speed.is_finite() {
            clamp_speed(speed)
        } else {
            DEFAULT_SPEED
        };
        PlaybackClock {
            position: 0.0,
            speed,
            last_frame_ms: None,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Returns the speed actually applied.
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        if speed.is_finite() {
            self.speed = clamp_speed(speed);
        }
        self.speed
    }

    /// Forget the previous frame time so the next frame applies no delta.
    pub fn reset_frame_reference(&mut self) {
        self.last_frame_ms = None;
    }

    pub fn has_frame_reference(&self) -> bool {
        self.last_frame_ms.is_some()
    }

    /// Move the position directly, clamped to `[0, max_scroll]`.
    pub fn scroll_to(&mut self, position: f32, max_scroll: f32) -> f32 {
        let max_scroll = max_scroll.max(0.0);
        self.position = if position.is_finite() {
            position.clamp(0.0, max_scroll)
        } else {
            self.position.clamp(0.0, max_scroll)
        };
        self.position
    }

    pub fn is_at_end(&self, max_scroll: f32) -> bool {
        self.position >= max_scroll.max(0.0)
    }

    /// Advance by `delta_ms * speed / 1000` since the previous frame.
    pub fn advance(&mut self, now_ms: f64, max_scroll: f32) -> ClockAdvance {
        let max_scroll = max_scroll.max(0.0);
        let Some(last) = self.last_frame_ms.replace(now_ms) else {
            if self.is_at_end(max_scroll) {
                self.position = max_scroll;
                return ClockAdvance::ReachedEnd;
            }
            return ClockAdvance::Primed;
        };

        let delta_ms = (now_ms - last).max(0.0);
        let step = (delta_ms * (self.speed as f64 / 1000.0)) as f32;
        let before = self.position;
        self.position = (self.position + step).min(max_scroll);
        trace!(delta_ms, step, position = self.position, "Clock advanced");

        if self.is_at_end(max_scroll) {
            self.position = max_scroll;
            ClockAdvance::ReachedEnd
        } else {
            ClockAdvance::Moved(self.position - before)
        }
    }

    pub fn reset(&mut self) {
        self.position = 0.0;
        self.last_frame_ms = None;
    }
}

/// Display counter of whole seconds spent actively playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedCounter {
    seconds: u64,
}

impl ElapsedCounter {
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn tick(&mut self) {
        self.seconds = self.seconds.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.seconds = 0;
    }

    pub fn label(&self) -> String {
        format_elapsed(self.seconds)
    }
}

/// `mm:ss`, or `h:mm:ss` once past an hour.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
