//! Playback phases and the pause/resume transitions between them.
//!
//! Cancellation of a pending auto-resume is expressed by forgetting its
//! [`TimerId`]: the host may still deliver the elapsed notification later,
//! but an id that is no longer pending is ignored.

use crate::script::PauseKind;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// Handle for a scheduled auto-resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Running,
    AutoPaused {
        segment: usize,
        kind: PauseKind,
        timer: TimerId,
    },
    ManualPaused,
}

impl PlaybackPhase {
    pub fn is_playing(&self) -> bool {
        !matches!(self, PlaybackPhase::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(
            self,
            PlaybackPhase::AutoPaused { .. } | PlaybackPhase::ManualPaused
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackPhase::Idle => "idle",
            PlaybackPhase::Running => "running",
            PlaybackPhase::AutoPaused { .. } => "auto-paused",
            PlaybackPhase::ManualPaused => "manual-paused",
        }
    }
}

/// Auto-pause lengths in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PauseDurations {
    pub short: u64,
    pub medium: u64,
    pub long: u64,
    pub normal: u64,
}

impl Default for PauseDurations {
    fn default() -> Self {
        PauseDurations {
            short: 1_000,
            medium: 2_000,
            long: 3_000,
            normal: 1_500,
        }
    }
}

impl PauseDurations {
    pub fn duration_ms(&self, kind: PauseKind) -> u64 {
        match kind {
            PauseKind::Short => self.short,
            PauseKind::Medium => self.medium,
            PauseKind::Long => self.long,
            PauseKind::Normal => self.normal,
        }
    }

    pub fn duration_for(&self, kind: PauseKind) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms(kind))
    }
}

/// Per-segment "already fired this run" flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerMarks {
    marks: Vec<bool>,
}

impl TriggerMarks {
    pub fn new(len: usize) -> Self {
        TriggerMarks {
            marks: vec![false; len],
        }
    }

    pub fn is_triggered(&self, idx: usize) -> bool {
        self.marks.get(idx).copied().unwrap_or(false)
    }

    /// Returns false when the segment was already marked.
    pub fn mark(&mut self, idx: usize) -> bool {
        match self.marks.get_mut(idx) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.marks.iter_mut().for_each(|slot| *slot = false);
    }

    pub fn triggered_count(&self) -> usize {
        self.marks.iter().filter(|slot| **slot).count()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PauseMachine {
    phase: PlaybackPhase,
    marks: TriggerMarks,
    next_timer: u64,
}

impl PauseMachine {
    pub fn new(segment_count: usize) -> Self {
        PauseMachine {
            phase: PlaybackPhase::Idle,
            marks: TriggerMarks::new(segment_count),
            next_timer: 0,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn marks(&self) -> &TriggerMarks {
        &self.marks
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        match self.phase {
            PlaybackPhase::AutoPaused { timer, .. } => Some(timer),
            _ => None,
        }
    }

    pub fn current_pause_kind(&self) -> Option<PauseKind> {
        match self.phase {
            PlaybackPhase::AutoPaused { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Idle -> Running.
    pub fn start(&mut self) -> bool {
        if self.phase != PlaybackPhase::Idle {
            return false;
        }
        self.phase = PlaybackPhase::Running;
        true
    }

    /// Running -> AutoPaused, when the segment has not fired this run.
    pub fn trigger(&mut self, segment: usize, kind: PauseKind) -> Option<TimerId> {
        if self.phase != PlaybackPhase::Running || !self.marks.mark(segment) {
            return None;
        }
        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        self.phase = PlaybackPhase::AutoPaused {
            segment,
            kind,
            timer,
        };
        Some(timer)
    }

    /// Marks a segment that fires without pausing, such as a topic change.
    /// Only while Running; the phase is left alone.
    pub fn mark_passed(&mut self, segment: usize) -> bool {
        self.phase == PlaybackPhase::Running && self.marks.mark(segment)
    }

    /// AutoPaused -> Running, only for the timer that is still pending.
    pub fn timer_elapsed(&mut self, id: TimerId) -> bool {
        match self.phase {
            PlaybackPhase::AutoPaused { timer, .. } if timer == id => {
                self.phase = PlaybackPhase::Running;
                true
            }
            _ => {
                debug!(%id, phase = self.phase.label(), "Ignoring stale pause timer");
                false
            }
        }
    }

    /// Running/AutoPaused -> ManualPaused. Returns the cancelled timer, if any.
    pub fn manual_pause(&mut self) -> Option<Option<TimerId>> {
        match self.phase {
            PlaybackPhase::Running => {
                self.phase = PlaybackPhase::ManualPaused;
                Some(None)
            }
            PlaybackPhase::AutoPaused { timer, .. } => {
                self.phase = PlaybackPhase::ManualPaused;
                Some(Some(timer))
            }
            _ => None,
        }
    }

    /// ManualPaused -> Running.
    pub fn resume(&mut self) -> bool {
        if self.phase != PlaybackPhase::ManualPaused {
            return false;
        }
        self.phase = PlaybackPhase::Running;
        true
    }

    /// Running -> Idle at end of content. Marks are kept until restart.
    pub fn complete(&mut self) -> bool {
        if self.phase != PlaybackPhase::Running {
            return false;
        }
        self.phase = PlaybackPhase::Idle;
        true
    }

    /// Any -> Idle, clearing marks and dropping any pending timer.
    pub fn restart(&mut self) -> Option<TimerId> {
        let cancelled = self.pending_timer();
        self.phase = PlaybackPhase::Idle;
        self.marks.clear();
        cancelled
    }

    /// Any -> Idle without touching marks; used on unmount.
    pub fn halt(&mut self) -> Option<TimerId> {
        let cancelled = self.pending_timer();
        self.phase = PlaybackPhase::Idle;
        cancelled
    }

    /// New segment list: marks are rebuilt and playback stops.
    pub fn reset_segments(&mut self, segment_count: usize) -> Option<TimerId> {
        let cancelled = self.halt();
        self.marks = TriggerMarks::new(segment_count);
        cancelled
    }
}
