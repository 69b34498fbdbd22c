//! One mounted teleprompter: script, layout, clock, pause machine and
//! recording bridge driven by the host.
//!
//! The host owns the three periodic activities. It calls [`Teleprompter::frame`]
//! on every animation frame while [`Teleprompter::wants_frames`] holds,
//! [`Teleprompter::tick_second`] once a second while
//! [`Teleprompter::wants_ticks`] holds, and
//! [`Teleprompter::pause_timer_elapsed`] when an auto-pause delay runs out.
//! Calls that arrive after the state they were scheduled for has gone are
//! ignored, so the host never has to guarantee cancellation itself.

use crate::clock::{ClockAdvance, ElapsedCounter, PlaybackClock};
use crate::layout::{
    LayoutMetrics, ScriptLayout, TRIGGER_LINE_FRACTION, Viewport, clamp_trigger_fraction,
    estimate_layout,
};
use crate::pause::{PauseDurations, PauseMachine, PlaybackPhase, TimerId};
use crate::recording::{RecordingBridge, RecordingOptions, RecordingSignal};
use crate::script::{PauseKind, Segment, parse_script};
use crate::settings::{PresentationSettings, SettingsPatch};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Started,
    Paused,
    Resumed,
    AutoPaused {
        segment: usize,
        kind: PauseKind,
        timer: TimerId,
        resume_after: Duration,
    },
    AutoResumed {
        timer: TimerId,
    },
    Restarted,
    Completed,
    SpeedChanged(f32),
    Recording(RecordingSignal),
}

#[derive(Debug, Clone)]
pub struct Teleprompter {
    script: String,
    segments: Vec<Segment>,
    settings: PresentationSettings,
    viewport: Viewport,
    trigger_fraction: f32,
    layout: ScriptLayout,
    clock: PlaybackClock,
    elapsed: ElapsedCounter,
    machine: PauseMachine,
    durations: PauseDurations,
    bridge: RecordingBridge,
    mounted: bool,
}

impl Teleprompter {
    pub fn new(script: &str, settings: PresentationSettings) -> Self {
        let segments = parse_script(script);
        let viewport = Viewport::default();
        let mut engine = Teleprompter {
            script: script.to_string(),
            machine: PauseMachine::new(segments.len()),
            segments,
            settings: settings.clamped(),
            viewport,
            trigger_fraction: TRIGGER_LINE_FRACTION,
            layout: ScriptLayout::empty(viewport),
            clock: PlaybackClock::default(),
            elapsed: ElapsedCounter::default(),
            durations: PauseDurations::default(),
            bridge: RecordingBridge::default(),
            mounted: false,
        };
        engine.relayout();
        engine
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.clock.set_speed(speed);
        self
    }

    pub fn with_pause_durations(mut self, durations: PauseDurations) -> Self {
        self.durations = durations;
        self
    }

    pub fn with_recording(mut self, options: RecordingOptions) -> Self {
        self.bridge.set_options(options);
        self
    }

    pub fn with_trigger_fraction(mut self, fraction: f32) -> Self {
        self.trigger_fraction = clamp_trigger_fraction(fraction);
        self.relayout();
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport.sanitized();
        self.relayout();
        self
    }

    // Lifecycle.

    pub fn mount(&mut self) -> Vec<PlaybackEvent> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        info!(segments = self.segments.len(), "Teleprompter mounted");
        self.bridge
            .on_mount()
            .map(PlaybackEvent::Recording)
            .into_iter()
            .collect()
    }

    /// Stop every activity. Position and trigger marks are left as they are.
    pub fn unmount(&mut self) -> Vec<PlaybackEvent> {
        let was_playing = self.is_playing();
        if let Some(timer) = self.machine.halt() {
            debug!(%timer, "Dropped pending pause timer on unmount");
        }
        self.clock.reset_frame_reference();
        self.mounted = false;
        info!(was_playing, "Teleprompter unmounted");
        self.stop_recording_if(was_playing).into_iter().collect()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // Controls.

    pub fn start(&mut self) -> Vec<PlaybackEvent> {
        if self.phase() != PlaybackPhase::Idle {
            return Vec::new();
        }
        let mut events = Vec::new();
        if self.clock.position() > 0.0 && self.clock.is_at_end(self.max_scroll()) {
            events.extend(self.restart());
        }
        self.machine.start();
        self.clock.reset_frame_reference();
        info!(
            position = self.clock.position(),
            speed = self.clock.speed(),
            "Playback started"
        );
        events.push(PlaybackEvent::Started);
        if let Some(signal) = self.bridge.on_playback_started() {
            events.push(PlaybackEvent::Recording(signal));
        }
        events
    }

    pub fn pause(&mut self) -> Vec<PlaybackEvent> {
        match self.machine.manual_pause() {
            Some(cancelled) => {
                if let Some(timer) = cancelled {
                    debug!(%timer, "Manual pause cancelled pending auto-resume");
                }
                self.clock.reset_frame_reference();
                info!(position = self.clock.position(), "Playback paused");
                vec![PlaybackEvent::Paused]
            }
            None => Vec::new(),
        }
    }

    pub fn resume(&mut self) -> Vec<PlaybackEvent> {
        if !self.machine.resume() {
            return Vec::new();
        }
        self.clock.reset_frame_reference();
        info!(position = self.clock.position(), "Playback resumed");
        vec![PlaybackEvent::Resumed]
    }

    pub fn toggle_play_pause(&mut self) -> Vec<PlaybackEvent> {
        match self.phase() {
            PlaybackPhase::Idle => self.start(),
            PlaybackPhase::Running | PlaybackPhase::AutoPaused { .. } => self.pause(),
            PlaybackPhase::ManualPaused => self.resume(),
        }
    }

    pub fn restart(&mut self) -> Vec<PlaybackEvent> {
        let was_playing = self.is_playing();
        if let Some(timer) = self.machine.restart() {
            debug!(%timer, "Restart cancelled pending auto-resume");
        }
        self.clock.reset();
        self.elapsed.reset();
        info!(was_playing, "Playback restarted");

        let mut events = vec![PlaybackEvent::Restarted];
        events.extend(self.stop_recording_if(was_playing));
        events
    }

    pub fn set_speed(&mut self, speed: f32) -> Vec<PlaybackEvent> {
        let before = self.clock.speed();
        let applied = self.clock.set_speed(speed);
        if (applied - before).abs() < f32::EPSILON {
            return Vec::new();
        }
        debug!(requested = speed, applied, "Speed changed");
        vec![PlaybackEvent::SpeedChanged(applied)]
    }

    pub fn nudge_speed(&mut self, delta: f32) -> Vec<PlaybackEvent> {
        self.set_speed(self.clock.speed() + delta)
    }

    /// Direct scroll from a user gesture. Never changes the playback phase.
    pub fn manual_scroll(&mut self, position: f32) -> Vec<PlaybackEvent> {
        let applied = self.clock.scroll_to(position, self.max_scroll());
        debug!(requested = position, applied, "Manual scroll");
        Vec::new()
    }

    pub fn scroll_by(&mut self, delta: f32) -> Vec<PlaybackEvent> {
        self.manual_scroll(self.clock.position() + delta)
    }

    // Host-driven activities.

    pub fn frame(&mut self, now_ms: f64) -> Vec<PlaybackEvent> {
        if !self.wants_frames() {
            return Vec::new();
        }
        let advance = self.clock.advance(now_ms, self.max_scroll());

        if let Some(event) = self.detect_trigger() {
            return vec![event];
        }

        match advance {
            ClockAdvance::ReachedEnd => self.complete(),
            ClockAdvance::Primed | ClockAdvance::Moved(_) => Vec::new(),
        }
    }

    pub fn tick_second(&mut self) -> Vec<PlaybackEvent> {
        if self.wants_ticks() {
            self.elapsed.tick();
        }
        Vec::new()
    }

    pub fn pause_timer_elapsed(&mut self, timer: TimerId) -> Vec<PlaybackEvent> {
        if !self.machine.timer_elapsed(timer) {
            return Vec::new();
        }
        self.clock.reset_frame_reference();
        debug!(%timer, position = self.clock.position(), "Auto-pause elapsed");
        vec![PlaybackEvent::AutoResumed { timer }]
    }

    // Configuration.

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<PlaybackEvent> {
        let viewport = viewport.sanitized();
        if viewport == self.viewport {
            return Vec::new();
        }
        self.viewport = viewport;
        self.relayout();
        Vec::new()
    }

    pub fn apply_settings(&mut self, patch: &SettingsPatch) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        if let Some(speed) = patch.speed {
            events.extend(self.set_speed(speed));
        }
        if patch.apply_to(&mut self.settings) {
            debug!(
                font_size = self.settings.font_size,
                font_family = %self.settings.font_family,
                show_pause_tags = self.settings.show_pause_tags,
                "Presentation changed; re-estimating layout"
            );
            self.relayout();
        }
        events
    }

    pub fn set_pause_durations(&mut self, durations: PauseDurations) {
        self.durations = durations;
    }

    pub fn set_recording_options(&mut self, options: RecordingOptions) {
        self.bridge.set_options(options);
    }

    pub fn set_trigger_fraction(&mut self, fraction: f32) {
        self.trigger_fraction = clamp_trigger_fraction(fraction);
        self.relayout();
    }

    /// Explicit edit: re-parse, re-lay-out and restart from the top.
    pub fn replace_script(&mut self, script: &str) -> Vec<PlaybackEvent> {
        let was_playing = self.is_playing();
        self.script = script.to_string();
        self.segments = parse_script(script);
        if let Some(timer) = self.machine.reset_segments(self.segments.len()) {
            debug!(%timer, "Script edit cancelled pending auto-resume");
        }
        self.clock.reset();
        self.elapsed.reset();
        self.relayout();
        info!(segments = self.segments.len(), "Script replaced");

        let mut events = vec![PlaybackEvent::Restarted];
        events.extend(self.stop_recording_if(was_playing));
        events
    }

    // Queries.

    pub fn phase(&self) -> PlaybackPhase {
        self.machine.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.phase().is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.phase().is_paused()
    }

    pub fn current_pause_kind(&self) -> Option<PauseKind> {
        self.machine.current_pause_kind()
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.machine.pending_timer()
    }

    pub fn scroll_position(&self) -> f32 {
        self.clock.position()
    }

    pub fn max_scroll(&self) -> f32 {
        self.layout.max_scroll()
    }

    /// Scroll progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return if self.clock.position() > 0.0 { 1.0 } else { 0.0 };
        }
        (self.clock.position() / max).clamp(0.0, 1.0)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.seconds()
    }

    pub fn elapsed_label(&self) -> String {
        self.elapsed.label()
    }

    pub fn speed(&self) -> f32 {
        self.clock.speed()
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn layout(&self) -> &ScriptLayout {
        &self.layout
    }

    pub fn settings(&self) -> &PresentationSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pause_durations(&self) -> PauseDurations {
        self.durations
    }

    pub fn recording_options(&self) -> RecordingOptions {
        self.bridge.options()
    }

    pub fn is_triggered(&self, idx: usize) -> bool {
        self.machine.marks().is_triggered(idx)
    }

    pub fn wants_frames(&self) -> bool {
        self.phase() == PlaybackPhase::Running
    }

    pub fn wants_ticks(&self) -> bool {
        self.phase() == PlaybackPhase::Running
    }

    fn relayout(&mut self) {
        let metrics =
            LayoutMetrics::from_settings(&self.settings, self.viewport, self.trigger_fraction);
        self.layout = estimate_layout(&self.segments, &metrics, self.settings.show_pause_tags);
        let max_scroll = self.layout.max_scroll();
        self.clock.scroll_to(self.clock.position(), max_scroll);
    }

    fn detect_trigger(&mut self) -> Option<PlaybackEvent> {
        let position = self.clock.position();
        let crossing: Vec<(usize, Option<PauseKind>)> = self
            .segments
            .iter()
            .enumerate()
            .filter(|(idx, segment)| {
                segment.is_marker()
                    && !self.machine.marks().is_triggered(*idx)
                    && self.layout.crosses_trigger(*idx, position)
            })
            .map(|(idx, segment)| (idx, segment.pause_kind()))
            .collect();

        let mut paused_at = None;
        for (idx, kind) in crossing {
            match kind {
                Some(kind) => {
                    paused_at = Some((idx, kind));
                    break;
                }
                None => {
                    if self.machine.mark_passed(idx) {
                        debug!(segment = idx, position, "Passed topic change");
                    }
                }
            }
        }
        let (segment, kind) = paused_at?;

        let timer = self.machine.trigger(segment, kind)?;
        let resume_after = self.durations.duration_for(kind);
        self.clock.reset_frame_reference();
        info!(
            segment,
            %kind,
            %timer,
            resume_after_ms = resume_after.as_millis() as u64,
            position,
            "Auto-paused at marker"
        );
        Some(PlaybackEvent::AutoPaused {
            segment,
            kind,
            timer,
            resume_after,
        })
    }

    fn stop_recording_if(&self, was_playing: bool) -> Option<PlaybackEvent> {
        if !was_playing {
            return None;
        }
        self.bridge
            .on_playback_stopped()
            .map(PlaybackEvent::Recording)
    }

    fn complete(&mut self) -> Vec<PlaybackEvent> {
        if !self.machine.complete() {
            return Vec::new();
        }
        info!(
            elapsed = self.elapsed.seconds(),
            position = self.clock.position(),
            "Script complete"
        );
        let mut events = vec![PlaybackEvent::Completed];
        if let Some(signal) = self.bridge.on_script_complete() {
            events.push(PlaybackEvent::Recording(signal));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 16.0;

    fn settings() -> PresentationSettings {
        PresentationSettings {
            font_size: 20,
            line_spacing: 1.5,
            margin_horizontal: 0,
            ..PresentationSettings::default()
        }
    }

    fn engine(script: &str, viewport: Viewport) -> Teleprompter {
        Teleprompter::new(script, settings())
            .with_speed(50.0)
            .with_viewport(viewport)
    }

    /// Drive frames and resolve auto-pauses until completion or `limit_ms`.
    fn run_to_completion(engine: &mut Teleprompter, limit_ms: f64) -> Vec<PlaybackEvent> {
        let mut now = 0.0;
        let mut log = Vec::new();
        while now < limit_ms {
            let events = engine.frame(now);
            let mut completed = false;
            for event in events {
                if let PlaybackEvent::AutoPaused {
                    timer,
                    resume_after,
                    ..
                } = event
                {
                    // Frames arriving during the pause must not move anything.
                    let held = engine.scroll_position();
                    assert!(engine.frame(now + FRAME_MS).is_empty());
                    assert_eq!(engine.scroll_position(), held);
                    now += resume_after.as_millis() as f64;
                    log.push(event);
                    log.extend(engine.pause_timer_elapsed(timer));
                    continue;
                }
                completed |= event == PlaybackEvent::Completed;
                log.push(event);
            }
            if completed {
                break;
            }
            now += FRAME_MS;
        }
        log
    }

    fn auto_pause_kinds(events: &[PlaybackEvent]) -> Vec<PauseKind> {
        events
            .iter()
            .filter_map(|event| match event {
                PlaybackEvent::AutoPaused { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn intro_middle_end_scenario_pauses_short_then_long_then_completes() {
        let mut engine = engine(
            "Intro text<pause-short>Middle<pause-long>End",
            Viewport::new(2000.0, 600.0),
        );
        assert_eq!(engine.start(), vec![PlaybackEvent::Started]);

        let events = run_to_completion(&mut engine, 120_000.0);

        assert_eq!(
            auto_pause_kinds(&events),
            vec![PauseKind::Short, PauseKind::Long]
        );
        assert_eq!(events.last(), Some(&PlaybackEvent::Completed));
        assert!(!engine.is_playing());
        assert!(!engine.is_paused());
        assert_eq!(engine.scroll_position(), engine.max_scroll());
        assert!(!engine.wants_frames());
    }

    #[test]
    fn short_pause_fires_when_middle_reaches_the_trigger_line() {
        let mut engine = engine(
            "Intro text\n<pause-short>Middle\n<pause-long>End",
            Viewport::new(800.0, 600.0),
        );
        engine.start();
        let mut now = 0.0;
        loop {
            let events = engine.frame(now);
            if let Some(PlaybackEvent::AutoPaused { segment, kind, .. }) = events.first() {
                assert_eq!(*kind, PauseKind::Short);
                assert_eq!(*segment, 1);
                assert!(engine.layout().crosses_trigger(2, engine.scroll_position()));
                assert_eq!(engine.current_pause_kind(), Some(PauseKind::Short));
                break;
            }
            assert!(now < 60_000.0, "pause never fired");
            now += FRAME_MS;
        }
    }

    #[test]
    fn frames_are_ignored_unless_running() {
        let mut engine = engine("some text to scroll", Viewport::default());
        assert!(engine.frame(0.0).is_empty());
        assert!(engine.frame(10_000.0).is_empty());
        assert_eq!(engine.scroll_position(), 0.0);
    }

    #[test]
    fn clock_is_monotonic_while_running() {
        let mut engine = engine(&"plain words ".repeat(300), Viewport::new(600.0, 400.0));
        engine.start();
        let mut previous = 0.0;
        for step in 0..500 {
            engine.frame(step as f64 * 33.0);
            assert!(engine.scroll_position() >= previous);
            assert!(engine.scroll_position() <= engine.max_scroll());
            previous = engine.scroll_position();
        }
    }

    #[test]
    fn reaching_the_end_stops_playback() {
        let mut engine = engine("short", Viewport::new(800.0, 600.0)).with_speed(300.0);
        engine.start();
        let events = run_to_completion(&mut engine, 60_000.0);
        assert!(events.contains(&PlaybackEvent::Completed));
        assert!(!engine.is_playing());
        assert!(!engine.wants_frames());
        let end = engine.scroll_position();
        assert!(engine.frame(1e9).is_empty());
        assert_eq!(engine.scroll_position(), end);
    }

    #[test]
    fn medium_pause_fires_once_per_run_and_again_after_restart() {
        let script = "before<pause-medium>after";
        let mut engine = engine(script, Viewport::new(800.0, 600.0));
        engine.start();
        let first = run_to_completion(&mut engine, 120_000.0);
        assert_eq!(auto_pause_kinds(&first), vec![PauseKind::Medium]);
        assert!(engine.is_triggered(1));

        engine.restart();
        assert!(!engine.is_triggered(1));
        engine.start();
        let second = run_to_completion(&mut engine, 120_000.0);
        assert_eq!(auto_pause_kinds(&second), vec![PauseKind::Medium]);
    }

    #[test]
    fn manual_pause_cancels_the_pending_auto_resume() {
        let mut engine = engine("lead<pause-long>tail", Viewport::new(800.0, 600.0));
        engine.start();
        let mut now = 0.0;
        let timer = loop {
            if let Some(PlaybackEvent::AutoPaused { timer, .. }) = engine.frame(now).first() {
                break *timer;
            }
            now += FRAME_MS;
        };

        assert_eq!(engine.pause(), vec![PlaybackEvent::Paused]);
        assert_eq!(engine.pending_timer(), None);
        assert!(engine.pause_timer_elapsed(timer).is_empty());
        assert_eq!(engine.phase(), PlaybackPhase::ManualPaused);

        engine.resume();
        assert!(engine.pause_timer_elapsed(timer).is_empty());
        assert_eq!(engine.phase(), PlaybackPhase::Running);
    }

    #[test]
    fn restart_resets_everything() {
        let mut engine = engine("one<pause>two<pause-short>three", Viewport::new(800.0, 600.0));
        engine.start();
        let mut now = 0.0;
        while engine.pending_timer().is_none() {
            engine.frame(now);
            engine.tick_second();
            now += FRAME_MS;
        }
        assert!(engine.elapsed_seconds() > 0);
        let stale = engine.pending_timer().expect("pending timer");

        let events = engine.restart();
        assert_eq!(events.first(), Some(&PlaybackEvent::Restarted));
        assert_eq!(engine.scroll_position(), 0.0);
        assert_eq!(engine.elapsed_seconds(), 0);
        assert!(!engine.is_playing());
        assert!(!engine.is_paused());
        assert_eq!(engine.current_pause_kind(), None);
        assert!((0..engine.segments().len()).all(|idx| !engine.is_triggered(idx)));
        assert!(engine.pause_timer_elapsed(stale).is_empty());
    }

    #[test]
    fn stale_frame_after_restart_applies_no_delta() {
        let mut engine = engine(&"text ".repeat(200), Viewport::new(800.0, 600.0));
        engine.start();
        engine.frame(0.0);
        engine.frame(500.0);
        engine.restart();
        engine.start();
        engine.frame(90_000.0);
        assert_eq!(engine.scroll_position(), 0.0);
    }

    #[test]
    fn pausing_while_stopped_is_a_no_op() {
        let mut engine = engine("text", Viewport::default());
        assert!(engine.pause().is_empty());
        assert!(!engine.is_paused());
        assert!(engine.resume().is_empty());
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut engine = engine("text", Viewport::default());
        engine.tick_second();
        assert_eq!(engine.elapsed_seconds(), 0);
        engine.start();
        engine.tick_second();
        engine.pause();
        engine.tick_second();
        assert_eq!(engine.elapsed_seconds(), 1);
    }

    #[test]
    fn speed_changes_are_clamped_and_independent_of_phase() {
        let mut engine = engine("text", Viewport::default());
        assert_eq!(
            engine.set_speed(1_000.0),
            vec![PlaybackEvent::SpeedChanged(crate::clock::MAX_SPEED)]
        );
        assert!(engine.set_speed(1_000.0).is_empty());
        engine.nudge_speed(-10_000.0);
        assert_eq!(engine.speed(), crate::clock::MIN_SPEED);
        assert_eq!(engine.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn manual_scroll_is_clamped_and_keeps_phase() {
        let mut engine = engine(&"text ".repeat(400), Viewport::new(600.0, 400.0));
        engine.start();
        engine.pause();
        engine.manual_scroll(1e9);
        assert_eq!(engine.scroll_position(), engine.max_scroll());
        engine.scroll_by(-1e9);
        assert_eq!(engine.scroll_position(), 0.0);
        assert_eq!(engine.phase(), PlaybackPhase::ManualPaused);
    }

    #[test]
    fn start_after_completion_restarts_first() {
        let mut engine = engine("tiny", Viewport::new(800.0, 600.0)).with_speed(300.0);
        engine.start();
        run_to_completion(&mut engine, 60_000.0);
        let events = engine.start();
        assert_eq!(
            events,
            vec![PlaybackEvent::Restarted, PlaybackEvent::Started]
        );
        assert_eq!(engine.scroll_position(), 0.0);
    }

    #[test]
    fn toggle_cycles_through_phases() {
        let mut engine = engine("text", Viewport::default());
        engine.toggle_play_pause();
        assert_eq!(engine.phase(), PlaybackPhase::Running);
        engine.toggle_play_pause();
        assert_eq!(engine.phase(), PlaybackPhase::ManualPaused);
        engine.toggle_play_pause();
        assert_eq!(engine.phase(), PlaybackPhase::Running);
    }

    #[test]
    fn hidden_pause_tags_still_trigger() {
        let mut engine = engine("lead in<pause-short>tail", Viewport::new(800.0, 600.0));
        engine.apply_settings(&SettingsPatch {
            show_pause_tags: Some(false),
            ..SettingsPatch::default()
        });
        engine.start();
        let events = run_to_completion(&mut engine, 120_000.0);
        assert_eq!(auto_pause_kinds(&events), vec![PauseKind::Short]);
    }

    #[test]
    fn topic_changes_never_pause() {
        let mut engine = engine("one<topic-change>two", Viewport::new(800.0, 600.0));
        engine.start();
        let events = run_to_completion(&mut engine, 120_000.0);
        assert!(auto_pause_kinds(&events).is_empty());
        assert!(events.contains(&PlaybackEvent::Completed));
    }

    #[test]
    fn settings_change_does_not_touch_playback_state() {
        let mut engine = engine(&"text ".repeat(200), Viewport::new(800.0, 600.0));
        engine.start();
        engine.frame(0.0);
        engine.frame(1_000.0);
        engine.apply_settings(&SettingsPatch {
            font_size: Some(48),
            text_color: Some(crate::settings::RgbColor::new(1, 2, 3)),
            ..SettingsPatch::default()
        });
        assert_eq!(engine.phase(), PlaybackPhase::Running);
        assert!(engine.scroll_position() <= engine.max_scroll());
    }

    #[test]
    fn replace_script_rebuilds_segments_and_stops() {
        let mut engine = engine("old<pause>", Viewport::default());
        engine.start();
        let events = engine.replace_script("new text<pause-long><topic-change>");
        assert_eq!(events.first(), Some(&PlaybackEvent::Restarted));
        assert_eq!(engine.segments().len(), 3);
        assert_eq!(engine.script(), "new text<pause-long><topic-change>");
        assert!(!engine.is_playing());
    }

    #[test]
    fn recording_edges_follow_playback() {
        let mut engine = engine("text", Viewport::default()).with_recording(RecordingOptions {
            auto_enable_on_mount: true,
            auto_start_on_play: true,
            auto_stop_on_complete: true,
        });
        assert_eq!(
            engine.mount(),
            vec![PlaybackEvent::Recording(RecordingSignal::Enable)]
        );
        assert!(engine.mount().is_empty());
        assert_eq!(
            engine.start(),
            vec![
                PlaybackEvent::Started,
                PlaybackEvent::Recording(RecordingSignal::Start)
            ]
        );
        engine.pause();
        assert_eq!(engine.resume(), vec![PlaybackEvent::Resumed]);
        assert_eq!(
            engine.unmount(),
            vec![PlaybackEvent::Recording(RecordingSignal::Stop)]
        );
        assert!(!engine.is_playing());
    }

    #[test]
    fn completion_emits_stop_signal_when_configured() {
        let mut engine = engine("x", Viewport::new(800.0, 600.0))
            .with_speed(300.0)
            .with_recording(RecordingOptions {
                auto_enable_on_mount: false,
                auto_start_on_play: false,
                auto_stop_on_complete: true,
            });
        engine.start();
        let events = run_to_completion(&mut engine, 60_000.0);
        let tail = &events[events.len() - 2..];
        assert_eq!(
            tail,
            [
                PlaybackEvent::Completed,
                PlaybackEvent::Recording(RecordingSignal::Stop)
            ]
        );
        assert!(!events.contains(&PlaybackEvent::Recording(RecordingSignal::Start)));
    }

    #[test]
    fn topic_change_is_marked_without_pausing() {
        let mut engine = engine("one\n<topic-change>\ntwo", Viewport::new(800.0, 600.0))
            .with_speed(300.0);
        engine.start();
        let events = run_to_completion(&mut engine, 60_000.0);

        assert!(auto_pause_kinds(&events).is_empty());
        assert!(events.contains(&PlaybackEvent::Completed));
        assert!(engine.is_triggered(1));
        assert!(!engine.is_triggered(0));

        engine.restart();
        assert!(!engine.is_triggered(1));
    }

    #[test]
    fn unmount_cancels_pending_auto_resume() {
        let mut engine = engine(
            "Opening line<pause-long>Closing line",
            Viewport::new(2000.0, 600.0),
        );
        engine.mount();
        engine.start();

        let mut now = 0.0;
        let timer = loop {
            let paused = engine.frame(now).into_iter().find_map(|event| match event {
                PlaybackEvent::AutoPaused { timer, .. } => Some(timer),
                _ => None,
            });
            if let Some(timer) = paused {
                break timer;
            }
            assert!(now < 60_000.0, "pause never fired");
            now += FRAME_MS;
        };
        assert_eq!(engine.pending_timer(), Some(timer));

        engine.unmount();
        assert_eq!(engine.pending_timer(), None);
        assert_eq!(engine.phase(), PlaybackPhase::Idle);
        assert!(engine.pause_timer_elapsed(timer).is_empty());
        assert_eq!(engine.phase(), PlaybackPhase::Idle);

        let held = engine.scroll_position();
        assert!(engine.frame(now + 5_000.0).is_empty());
        assert_eq!(engine.scroll_position(), held);
    }
}
