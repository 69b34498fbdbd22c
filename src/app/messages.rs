use iced::keyboard::{Key, Modifiers};
use iced::widget::text_editor;
use prompter_core::TimerId;
use prompter_core::settings::{FontFamily, RgbColor};
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    Start,
    Pause,
    Resume,
    TogglePlayPause,
    Restart,
    SpeedChanged(f32),
    NudgeSpeed(f32),
    FontFamilyChanged(FontFamily),
    FontSizeChanged(u32),
    LineSpacingChanged(f32),
    MarginHorizontalChanged(u16),
    ColorPresetSelected(ColorPreset),
    ShowPauseTagsToggled(bool),
    ToggleTheme,
    ToggleSettings,
    ToggleReferences,
    ToggleEdit,
    EditorAction(text_editor::Action),
    ApplyEdit,
    ScrollBy(f32),
    Scrolled {
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Frame(Instant),
    Tick(Instant),
    PauseTimerElapsed(TimerId),
    PollSystemSignals,
    SafeQuit,
}

/// Text/background pairs offered in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPreset {
    Classic,
    Amber,
    Paper,
    Studio,
}

impl ColorPreset {
    pub const ALL: [ColorPreset; 4] = [
        ColorPreset::Classic,
        ColorPreset::Amber,
        ColorPreset::Paper,
        ColorPreset::Studio,
    ];

    /// `(text, background)`.
    pub fn colors(self) -> (RgbColor, RgbColor) {
        match self {
            ColorPreset::Classic => (RgbColor::WHITE, RgbColor::BLACK),
            ColorPreset::Amber => (
                RgbColor::new(0xff, 0xc1, 0x07),
                RgbColor::new(0x12, 0x12, 0x12),
            ),
            ColorPreset::Paper => (
                RgbColor::new(0x1b, 0x1b, 0x1b),
                RgbColor::new(0xf5, 0xf1, 0xe6),
            ),
            ColorPreset::Studio => (
                RgbColor::new(0xe8, 0xf4, 0xff),
                RgbColor::new(0x0b, 0x1e, 0x3a),
            ),
        }
    }

    pub fn matching(text: RgbColor, background: RgbColor) -> Option<ColorPreset> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.colors() == (text, background))
    }
}

impl std::fmt::Display for ColorPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ColorPreset::Classic => "White on black",
            ColorPreset::Amber => "Amber",
            ColorPreset::Paper => "Paper",
            ColorPreset::Studio => "Studio blue",
        };
        write!(f, "{}", label)
    }
}
