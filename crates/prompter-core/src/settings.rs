//! Presentation settings for the script surface.
//!
//! Pure display configuration. Nothing in here touches playback state; the
//! engine only re-estimates the layout when these change.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

/// Minimum allowed font size (points).
pub const MIN_FONT_SIZE: u32 = 16;
/// Maximum allowed font size (points).
pub const MAX_FONT_SIZE: u32 = 96;
pub const MIN_LINE_SPACING: f32 = 1.0;
pub const MAX_LINE_SPACING: f32 = 3.0;
pub const MAX_HORIZONTAL_MARGIN: u16 = 400;

/// Font families the surface may use.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Monospace,
    Lexend,
    OpenDyslexic,
    Courier,
    AtkinsonHyperlegible,
}

impl FontFamily {
    pub const ALL: [FontFamily; 7] = [
        FontFamily::Sans,
        FontFamily::Serif,
        FontFamily::Monospace,
        FontFamily::Lexend,
        FontFamily::OpenDyslexic,
        FontFamily::Courier,
        FontFamily::AtkinsonHyperlegible,
    ];

    /// Average glyph advance as a fraction of the font size.
    pub fn glyph_scale(self) -> f32 {
        match self {
            FontFamily::Monospace | FontFamily::Courier => 0.62,
            FontFamily::Serif => 0.54,
            FontFamily::Lexend => 0.56,
            FontFamily::OpenDyslexic => 0.64,
            FontFamily::AtkinsonHyperlegible => 0.57,
            FontFamily::Sans => 0.55,
        }
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FontFamily::Sans => "Sans",
            FontFamily::Serif => "Serif",
            FontFamily::Monospace => "Monospace",
            FontFamily::Lexend => "Lexend",
            FontFamily::OpenDyslexic => "OpenDyslexic",
            FontFamily::Courier => "Courier",
            FontFamily::AtkinsonHyperlegible => "Atkinson Hyperlegible",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in color: {0:?}")]
    BadDigits(String),
}

/// An opaque sRGB colour, stored as `#rrggbb` in config and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor::new(0xff, 0xff, 0xff);
    pub const BLACK: RgbColor = RgbColor::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled into `0.0..=1.0`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl FromStr for RgbColor {
    type Err = ColorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let Some(hex) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(raw.to_string()));
        };
        if hex.len() != 6 {
            return Err(ColorParseError::BadLength(raw.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigits(raw.to_string()))
        };
        Ok(RgbColor {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl TryFrom<String> for RgbColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PresentationSettings {
    pub font_family: FontFamily,
    pub font_size: u32,
    pub line_spacing: f32,
    #[ts(as = "String")]
    pub text_color: RgbColor,
    #[ts(as = "String")]
    pub background_color: RgbColor,
    /// When off, pause markers render as zero-size placeholders that still
    /// take part in trigger detection.
    pub show_pause_tags: bool,
    pub margin_horizontal: u16,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        PresentationSettings {
            font_family: FontFamily::Sans,
            font_size: 36,
            line_spacing: 1.5,
            text_color: RgbColor::WHITE,
            background_color: RgbColor::BLACK,
            show_pause_tags: true,
            margin_horizontal: 48,
        }
    }
}

impl PresentationSettings {
    /// Pull every field back into its valid range.
    pub fn clamped(mut self) -> Self {
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.line_spacing = if self.line_spacing.is_finite() {
            self.line_spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING)
        } else {
            PresentationSettings::default().line_spacing
        };
        self.margin_horizontal = self.margin_horizontal.min(MAX_HORIZONTAL_MARGIN);
        self
    }
}

/// Partial update for presentation settings plus playback speed.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct SettingsPatch {
    #[ts(optional)]
    pub speed: Option<f32>,
    #[ts(optional)]
    pub font_family: Option<FontFamily>,
    #[ts(optional)]
    pub font_size: Option<u32>,
    #[ts(optional)]
    pub line_spacing: Option<f32>,
    #[ts(as = "Option<String>", optional)]
    pub text_color: Option<RgbColor>,
    #[ts(as = "Option<String>", optional)]
    pub background_color: Option<RgbColor>,
    #[ts(optional)]
    pub show_pause_tags: Option<bool>,
    #[ts(optional)]
    pub margin_horizontal: Option<u16>,
}

impl SettingsPatch {
    /// Apply the presentation part of the patch. Returns whether anything
    /// that affects layout changed.
    pub fn apply_to(&self, settings: &mut PresentationSettings) -> bool {
        let before = settings.clone();

        if let Some(font_family) = self.font_family {
            settings.font_family = font_family;
        }
        if let Some(font_size) = self.font_size {
            settings.font_size = font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
        if let Some(line_spacing) = self.line_spacing.filter(|v| v.is_finite()) {
            settings.line_spacing = line_spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
        }
        if let Some(text_color) = self.text_color {
            settings.text_color = text_color;
        }
        if let Some(background_color) = self.background_color {
            settings.background_color = background_color;
        }
        if let Some(show_pause_tags) = self.show_pause_tags {
            settings.show_pause_tags = show_pause_tags;
        }
        if let Some(margin) = self.margin_horizontal {
            settings.margin_horizontal = margin.min(MAX_HORIZONTAL_MARGIN);
        }

        before.font_family != settings.font_family
            || before.font_size != settings.font_size
            || before.line_spacing != settings.line_spacing
            || before.show_pause_tags != settings.show_pause_tags
            || before.margin_horizontal != settings.margin_horizontal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex_colors() {
        let color: RgbColor = "#1a2B3c".parse().expect("valid color");
        assert_eq!(color, RgbColor::new(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_hex(), "#1a2b3c");
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(matches!(
            "ffffff".parse::<RgbColor>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#fff".parse::<RgbColor>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#gg0000".parse::<RgbColor>(),
            Err(ColorParseError::BadDigits(_))
        ));
    }

    #[test]
    fn color_round_trips_through_toml_string() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            color: RgbColor,
        }
        let holder: Holder = toml::from_str("color = \"#ff8800\"").expect("parse holder");
        assert_eq!(holder.color, RgbColor::new(0xff, 0x88, 0x00));
        let encoded = toml::to_string(&holder).expect("encode holder");
        assert!(encoded.contains("#ff8800"));
    }

    #[test]
    fn patch_clamps_font_size_and_spacing() {
        let mut settings = PresentationSettings::default();
        let changed = SettingsPatch {
            font_size: Some(400),
            line_spacing: Some(0.2),
            ..SettingsPatch::default()
        }
        .apply_to(&mut settings);

        assert!(changed);
        assert_eq!(settings.font_size, MAX_FONT_SIZE);
        assert!((settings.line_spacing - MIN_LINE_SPACING).abs() < f32::EPSILON);
    }

    #[test]
    fn color_only_patch_does_not_require_relayout() {
        let mut settings = PresentationSettings::default();
        let changed = SettingsPatch {
            text_color: Some(RgbColor::new(0xee, 0xdd, 0x00)),
            ..SettingsPatch::default()
        }
        .apply_to(&mut settings);

        assert!(!changed);
        assert_eq!(settings.text_color, RgbColor::new(0xee, 0xdd, 0x00));
    }

    #[test]
    fn clamped_repairs_out_of_range_values() {
        let settings = PresentationSettings {
            font_size: 2,
            line_spacing: f32::NAN,
            margin_horizontal: 9000,
            ..PresentationSettings::default()
        }
        .clamped();
        assert_eq!(settings.font_size, MIN_FONT_SIZE);
        assert!((settings.line_spacing - 1.5).abs() < f32::EPSILON);
        assert_eq!(settings.margin_horizontal, MAX_HORIZONTAL_MARGIN);
    }
}
