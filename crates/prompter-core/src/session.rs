use crate::bundle::{Reference, ScriptBundle};
use crate::cache;
use crate::config::{self, AppConfig};
use crate::engine::{PlaybackEvent, Teleprompter};
use crate::layout::{Viewport, segment_label};
use crate::pause::TimerId;
use crate::script::{PauseKind, SegmentKind, strip_markers};
use crate::settings::{FontFamily, SettingsPatch};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;
use ts_rs::TS;

const READ_WPM: f64 = 150.0;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SegmentView {
    pub index: usize,
    pub kind: SegmentKind,
    pub content: String,
    /// Text drawn on the surface; `None` when the segment renders as a
    /// zero-size placeholder.
    pub label: Option<String>,
    pub triggered: bool,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PrompterSettingsView {
    pub theme: config::ThemeMode,
    pub font_family: FontFamily,
    pub font_size: u32,
    pub line_spacing: f32,
    pub text_color: String,
    pub background_color: String,
    pub show_pause_tags: bool,
    pub margin_horizontal: u16,
    pub speed: f32,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PlaybackView {
    pub phase: String,
    pub is_playing: bool,
    pub is_paused: bool,
    pub current_pause_kind: Option<PauseKind>,
    pub pending_timer: Option<TimerId>,
    pub scroll_position: f32,
    pub max_scroll: f32,
    pub progress_pct: f64,
    pub elapsed_seconds: u64,
    pub elapsed_label: String,
    pub speed: f32,
    pub trigger_line: f32,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ScriptStats {
    pub word_count: usize,
    pub pause_count: usize,
    pub topic_change_count: usize,
    pub pause_time_secs: f64,
    pub estimated_read_secs: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PrompterSnapshot {
    pub title: String,
    pub source_path: Option<String>,
    pub script: String,
    pub segments: Vec<SegmentView>,
    pub references: Vec<Reference>,
    pub settings: PrompterSettingsView,
    pub playback: PlaybackView,
    pub stats: ScriptStats,
}

#[derive(Debug, Clone)]
pub enum SessionCommand {
    GetSnapshot,
    Mount,
    Unmount,
    Start,
    Pause,
    Resume,
    TogglePlayPause,
    Restart,
    SetSpeed { speed: f32 },
    NudgeSpeed { delta: f32 },
    ManualScroll { position: f32 },
    ScrollBy { delta: f32 },
    Frame { now_ms: f64 },
    TickSecond,
    PauseTimerElapsed { timer: TimerId },
    SetViewport { width: f32, height: f32 },
    ApplySettings { patch: SettingsPatch },
    EditScript { script: String },
}

impl SessionCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetSnapshot => "prompter_get_snapshot",
            Self::Mount => "prompter_mount",
            Self::Unmount => "prompter_unmount",
            Self::Start => "prompter_start",
            Self::Pause => "prompter_pause",
            Self::Resume => "prompter_resume",
            Self::TogglePlayPause => "prompter_toggle_play_pause",
            Self::Restart => "prompter_restart",
            Self::SetSpeed { .. } => "prompter_set_speed",
            Self::NudgeSpeed { .. } => "prompter_nudge_speed",
            Self::ManualScroll { .. } => "prompter_manual_scroll",
            Self::ScrollBy { .. } => "prompter_scroll_by",
            Self::Frame { .. } => "prompter_frame",
            Self::TickSecond => "prompter_tick_second",
            Self::PauseTimerElapsed { .. } => "prompter_pause_timer_elapsed",
            Self::SetViewport { .. } => "prompter_set_viewport",
            Self::ApplySettings { .. } => "prompter_apply_settings",
            Self::EditScript { .. } => "prompter_edit_script",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub action: &'static str,
    pub snapshot: PrompterSnapshot,
    pub events: Vec<PlaybackEvent>,
}

#[derive(Debug, Clone)]
pub struct PrompterSession {
    pub source_path: Option<PathBuf>,
    title: String,
    references: Vec<Reference>,
    pub config: AppConfig,
    engine: Teleprompter,
}

impl PrompterSession {
    pub fn new(bundle: ScriptBundle, config: AppConfig) -> Self {
        let engine = Teleprompter::new(&bundle.script, config.presentation())
            .with_speed(config.speed)
            .with_pause_durations(config.pause_durations())
            .with_recording(config.recording_options())
            .with_trigger_fraction(config.trigger_line);
        let mut session = Self {
            source_path: None,
            title: bundle.title,
            references: bundle.references,
            config,
            engine,
        };
        session.sync_config();
        session
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn engine(&self) -> &Teleprompter {
        &self.engine
    }

    pub fn apply_command(&mut self, command: SessionCommand) -> SessionEvent {
        let action = command.action();
        let events = self.dispatch(command);
        SessionEvent {
            action,
            snapshot: self.snapshot(),
            events,
        }
    }

    /// Run a command without building a snapshot. Used on the frame path.
    pub fn dispatch(&mut self, command: SessionCommand) -> Vec<PlaybackEvent> {
        match command {
            SessionCommand::GetSnapshot => Vec::new(),
            SessionCommand::Mount => self.engine.mount(),
            SessionCommand::Unmount => self.engine.unmount(),
            SessionCommand::Start => self.engine.start(),
            SessionCommand::Pause => self.engine.pause(),
            SessionCommand::Resume => self.engine.resume(),
            SessionCommand::TogglePlayPause => self.engine.toggle_play_pause(),
            SessionCommand::Restart => self.engine.restart(),
            SessionCommand::SetSpeed { speed } => {
                let events = self.engine.set_speed(speed);
                self.sync_config();
                events
            }
            SessionCommand::NudgeSpeed { delta } => {
                let events = self.engine.nudge_speed(delta);
                self.sync_config();
                events
            }
            SessionCommand::ManualScroll { position } => self.engine.manual_scroll(position),
            SessionCommand::ScrollBy { delta } => self.engine.scroll_by(delta),
            SessionCommand::Frame { now_ms } => self.engine.frame(now_ms),
            SessionCommand::TickSecond => self.engine.tick_second(),
            SessionCommand::PauseTimerElapsed { timer } => self.engine.pause_timer_elapsed(timer),
            SessionCommand::SetViewport { width, height } => {
                self.engine.set_viewport(Viewport::new(width, height))
            }
            SessionCommand::ApplySettings { patch } => {
                let events = self.engine.apply_settings(&patch);
                self.sync_config();
                events
            }
            SessionCommand::EditScript { script } => self.engine.replace_script(&script),
        }
    }

    pub fn settings_view(&self) -> PrompterSettingsView {
        let settings = self.engine.settings();
        PrompterSettingsView {
            theme: self.config.theme,
            font_family: settings.font_family,
            font_size: settings.font_size,
            line_spacing: settings.line_spacing,
            text_color: settings.text_color.to_hex(),
            background_color: settings.background_color.to_hex(),
            show_pause_tags: settings.show_pause_tags,
            margin_horizontal: settings.margin_horizontal,
            speed: self.engine.speed(),
        }
    }

    pub fn playback_view(&self) -> PlaybackView {
        let engine = &self.engine;
        PlaybackView {
            phase: engine.phase().label().to_string(),
            is_playing: engine.is_playing(),
            is_paused: engine.is_paused(),
            current_pause_kind: engine.current_pause_kind(),
            pending_timer: engine.pending_timer(),
            scroll_position: engine.scroll_position(),
            max_scroll: engine.max_scroll(),
            progress_pct: (engine.progress() as f64 * 100.0).clamp(0.0, 100.0),
            elapsed_seconds: engine.elapsed_seconds(),
            elapsed_label: engine.elapsed_label(),
            speed: engine.speed(),
            trigger_line: engine.layout().trigger_line(),
        }
    }

    pub fn segment_views(&self) -> Vec<SegmentView> {
        let show_pause_tags = self.engine.settings().show_pause_tags;
        let layout = self.engine.layout();
        self.engine
            .segments()
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let (top, bottom) = layout
                    .boxes
                    .get(index)
                    .map(|b| (b.top, b.bottom))
                    .unwrap_or_default();
                SegmentView {
                    index,
                    kind: segment.kind,
                    content: segment.content.clone(),
                    label: segment_label(segment, show_pause_tags),
                    triggered: self.engine.is_triggered(index),
                    top,
                    bottom,
                }
            })
            .collect()
    }

    pub fn stats(&self) -> ScriptStats {
        let word_count = strip_markers(self.engine.script())
            .split_whitespace()
            .count();
        let durations = self.engine.pause_durations();
        let mut pause_count = 0;
        let mut topic_change_count = 0;
        let mut pause_ms = 0u64;
        for segment in self.engine.segments() {
            match segment.kind {
                SegmentKind::Pause(kind) => {
                    pause_count += 1;
                    pause_ms += durations.duration_ms(kind);
                }
                SegmentKind::TopicChange => topic_change_count += 1,
                SegmentKind::Text => {}
            }
        }
        let pause_time_secs = pause_ms as f64 / 1000.0;
        ScriptStats {
            word_count,
            pause_count,
            topic_change_count,
            pause_time_secs,
            estimated_read_secs: word_count as f64 / READ_WPM * 60.0 + pause_time_secs,
        }
    }

    pub fn snapshot(&self) -> PrompterSnapshot {
        PrompterSnapshot {
            title: self.title.clone(),
            source_path: self
                .source_path
                .as_ref()
                .map(|path| path.to_string_lossy().to_string()),
            script: self.engine.script().to_string(),
            segments: self.segment_views(),
            references: self.references.clone(),
            settings: self.settings_view(),
            playback: self.playback_view(),
            stats: self.stats(),
        }
    }

    /// Persist the live settings as this script's overrides.
    pub fn persist_script_config(&self) -> anyhow::Result<()> {
        match &self.source_path {
            Some(path) => cache::save_script_config(path, &self.config),
            None => Ok(()),
        }
    }

    fn sync_config(&mut self) {
        self.config.store_presentation(self.engine.settings());
        self.config.speed = self.engine.speed();
    }
}

/// Load a bundle from disk with base config plus any per-script overrides.
pub fn load_session_for_source(path: &Path, base: &AppConfig) -> anyhow::Result<PrompterSession> {
    let bundle = crate::bundle::load_bundle(path)?;
    let config = cache::merge_with_base(base, cache::load_script_config(path));
    Ok(PrompterSession::new(bundle, config).with_source_path(path))
}

/// Best-effort save on shutdown.
pub fn persist_session_housekeeping(session: &PrompterSession) {
    if let Err(err) = session.persist_script_config() {
        warn!("Failed to persist per-script config: {err:#}");
    }
}
