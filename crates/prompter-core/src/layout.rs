//! Estimated geometry of the rendered script.
//!
//! The host draws the script as wrapped rich text; the core never sees the
//! real glyph boxes. Instead we approximate how many glyph units fit on a
//! line for the current font and width and flow the segments through that,
//! which is stable enough to place the trigger line and the scroll extent.
//!
//! Wrapping in the host can differ from this estimate, so a marker may fire a
//! line or two before or after it visually reaches the trigger hint.

use crate::script::{PauseKind, Segment, SegmentKind};
use crate::settings::PresentationSettings;
use serde::Serialize;
use ts_rs::TS;

/// Default position of the trigger line, as a fraction of viewport height.
pub const TRIGGER_LINE_FRACTION: f32 = 0.30;
pub const MIN_TRIGGER_LINE_FRACTION: f32 = 0.10;
pub const MAX_TRIGGER_LINE_FRACTION: f32 = 0.90;
/// Blank space above the first line, as a fraction of viewport height.
pub const LEAD_IN_FRACTION: f32 = 0.50;
const MIN_UNITS_PER_LINE: f32 = 8.0;
/// Inline glyph drawn for a topic change.
pub const TOPIC_CHANGE_LABEL: &str = "· ◆ ·";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 960.0,
            height: 640.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }.sanitized()
    }

    pub fn sanitized(self) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Viewport {
            width: clean(self.width),
            height: clean(self.height),
        }
    }
}

/// Label drawn for a visible pause tag.
pub fn pause_tag_label(kind: PauseKind) -> String {
    format!("[pause: {kind}]")
}

/// What the surface draws for a segment; `None` for a hidden pause tag.
pub fn segment_label(segment: &Segment, show_pause_tags: bool) -> Option<String> {
    match segment.kind {
        SegmentKind::Text => Some(segment.content.clone()),
        SegmentKind::Pause(kind) => show_pause_tags.then(|| pause_tag_label(kind)),
        SegmentKind::TopicChange => Some(TOPIC_CHANGE_LABEL.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub viewport: Viewport,
    pub line_height: f32,
    pub glyph_width: f32,
    pub text_width: f32,
    pub trigger_fraction: f32,
}

impl LayoutMetrics {
    pub fn from_settings(
        settings: &PresentationSettings,
        viewport: Viewport,
        trigger_fraction: f32,
    ) -> Self {
        let viewport = viewport.sanitized();
        let font_size = settings.font_size.max(1) as f32;
        let margin_total = (settings.margin_horizontal as f32 * 2.0).min(viewport.width * 0.9);
        LayoutMetrics {
            viewport,
            line_height: (font_size * settings.line_spacing.max(1.0)).max(1.0),
            glyph_width: (font_size * settings.font_family.glyph_scale()).max(1.0),
            text_width: (viewport.width - margin_total).max(1.0),
            trigger_fraction: clamp_trigger_fraction(trigger_fraction),
        }
    }

    fn units_per_line(&self) -> f32 {
        (self.text_width / self.glyph_width).max(MIN_UNITS_PER_LINE)
    }
}

pub fn clamp_trigger_fraction(fraction: f32) -> f32 {
    if fraction.is_finite() {
        fraction.clamp(MIN_TRIGGER_LINE_FRACTION, MAX_TRIGGER_LINE_FRACTION)
    } else {
        TRIGGER_LINE_FRACTION
    }
}

/// Vertical extent of one segment, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SegmentBox {
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLayout {
    pub boxes: Vec<SegmentBox>,
    pub content_extent: f32,
    pub viewport_extent: f32,
    pub trigger_fraction: f32,
}

impl ScriptLayout {
    pub fn empty(viewport: Viewport) -> Self {
        let viewport = viewport.sanitized();
        ScriptLayout {
            boxes: Vec::new(),
            content_extent: viewport.height,
            viewport_extent: viewport.height,
            trigger_fraction: TRIGGER_LINE_FRACTION,
        }
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Distance of the trigger line from the top of the viewport.
    pub fn trigger_line(&self) -> f32 {
        self.viewport_extent * self.trigger_fraction
    }

    /// Whether the segment's leading edge is at or above the trigger line
    /// while some of it is still inside the viewport.
    pub fn crosses_trigger(&self, idx: usize, scroll: f32) -> bool {
        let Some(segment_box) = self.boxes.get(idx) else {
            return false;
        };
        let top = segment_box.top - scroll;
        let bottom = segment_box.bottom - scroll;
        top <= self.trigger_line() && bottom >= 0.0
    }

    /// Scroll position at which the segment's leading edge meets the trigger line.
    pub fn scroll_for_segment(&self, idx: usize) -> Option<f32> {
        let segment_box = self.boxes.get(idx)?;
        Some((segment_box.top - self.trigger_line()).clamp(0.0, self.max_scroll()))
    }
}

/// Flow the segments through the estimated line width.
pub fn estimate_layout(
    segments: &[Segment],
    metrics: &LayoutMetrics,
    show_pause_tags: bool,
) -> ScriptLayout {
    let viewport = metrics.viewport;
    let lead_in = viewport.height * LEAD_IN_FRACTION;
    let max_units = metrics.units_per_line();
    let line_height = metrics.line_height;

    let mut line = 0usize;
    let mut line_units = 0.0f32;
    let mut boxes = Vec::with_capacity(segments.len());

    let place = |units: f32, line: &mut usize, line_units: &mut f32| {
        if *line_units > 0.0 && *line_units + units > max_units {
            *line += 1;
            *line_units = units;
        } else {
            *line_units += units;
        }
    };

    for segment in segments {
        let start_line = line;
        match segment.kind {
            SegmentKind::Text => {
                let mut first_visible: Option<usize> = None;
                for ch in segment.content.chars() {
                    if ch == '\n' {
                        line += 1;
                        line_units = 0.0;
                        continue;
                    }
                    place(glyph_units(ch), &mut line, &mut line_units);
                    if first_visible.is_none() && !ch.is_whitespace() {
                        first_visible = Some(line);
                    }
                }
                let top_line = first_visible.unwrap_or(start_line);
                boxes.push(SegmentBox {
                    top: lead_in + top_line as f32 * line_height,
                    bottom: lead_in + (line + 1) as f32 * line_height,
                });
            }
            SegmentKind::Pause(kind) if show_pause_tags => {
                let units = pause_tag_label(kind).chars().map(glyph_units).sum::<f32>();
                place(units, &mut line, &mut line_units);
                boxes.push(SegmentBox {
                    top: lead_in + line as f32 * line_height,
                    bottom: lead_in + (line + 1) as f32 * line_height,
                });
            }
            SegmentKind::Pause(_) => {
                let y = lead_in + line as f32 * line_height;
                boxes.push(SegmentBox { top: y, bottom: y });
            }
            SegmentKind::TopicChange => {
                let units = TOPIC_CHANGE_LABEL.chars().map(glyph_units).sum::<f32>();
                place(units, &mut line, &mut line_units);
                boxes.push(SegmentBox {
                    top: lead_in + line as f32 * line_height,
                    bottom: lead_in + (line + 1) as f32 * line_height,
                });
            }
        }
    }

    let text_height = if segments.is_empty() {
        0.0
    } else {
        (line + 1) as f32 * line_height
    };
    // The lead-out lets the final line travel up to the trigger line.
    let lead_out = viewport.height * (1.0 - metrics.trigger_fraction);

    ScriptLayout {
        boxes,
        content_extent: lead_in + text_height + lead_out,
        viewport_extent: viewport.height,
        trigger_fraction: metrics.trigger_fraction,
    }
}

fn glyph_units(ch: char) -> f32 {
    if ch.is_whitespace() {
        0.5
    } else if ch.is_ascii_punctuation() {
        0.6
    } else if ch.is_ascii() {
        1.0
    } else {
        1.6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn metrics(width: f32, height: f32) -> LayoutMetrics {
        let settings = PresentationSettings {
            font_size: 20,
            line_spacing: 1.5,
            margin_horizontal: 0,
            ..PresentationSettings::default()
        };
        LayoutMetrics::from_settings(&settings, Viewport::new(width, height), TRIGGER_LINE_FRACTION)
    }

    #[test]
    fn one_box_per_segment_in_document_order() {
        let segments = parse_script("first line\n<pause-short>second\n<topic-change>third");
        let layout = estimate_layout(&segments, &metrics(800.0, 600.0), true);
        assert_eq!(layout.boxes.len(), segments.len());
        for pair in layout.boxes.windows(2) {
            assert!(pair[1].top + 1e-3 >= pair[0].top);
        }
    }

    #[test]
    fn hidden_pause_tags_are_zero_height_but_positioned() {
        let segments = parse_script("alpha\n<pause-long>\nbeta");
        let layout = estimate_layout(&segments, &metrics(800.0, 600.0), false);
        let pause_box = layout.boxes[1];
        assert_eq!(pause_box.top, pause_box.bottom);
        assert!(pause_box.top > layout.boxes[0].top);
    }

    #[test]
    fn narrow_viewport_wraps_onto_more_lines() {
        let segments = parse_script(&"word ".repeat(200));
        let wide = estimate_layout(&segments, &metrics(1600.0, 600.0), true);
        let narrow = estimate_layout(&segments, &metrics(400.0, 600.0), true);
        assert!(narrow.content_extent > wide.content_extent);
    }

    #[test]
    fn every_segment_can_reach_the_trigger_line() {
        let segments = parse_script(&"line of script text\n".repeat(40));
        let layout = estimate_layout(&segments, &metrics(800.0, 600.0), true);
        for idx in 0..layout.boxes.len() {
            let scroll = layout.boxes[idx].top - layout.trigger_line();
            assert!(scroll <= layout.max_scroll() + 1e-3);
        }
    }

    #[test]
    fn crossing_requires_top_above_trigger_and_bottom_in_view() {
        let segments = parse_script("intro\n<pause>\noutro");
        let layout = estimate_layout(&segments, &metrics(800.0, 600.0), true);
        let at = layout.scroll_for_segment(1).expect("pause box");
        assert!(!layout.crosses_trigger(1, at - 1.0));
        assert!(layout.crosses_trigger(1, at + 0.5));
        assert!(!layout.crosses_trigger(1, layout.boxes[1].bottom + 1.0));
    }

    #[test]
    fn empty_script_has_no_scroll_range_beyond_padding() {
        let layout = estimate_layout(&[], &metrics(800.0, 600.0), true);
        assert!(layout.boxes.is_empty());
        assert!(layout.max_scroll() >= 0.0);
    }

    #[test]
    fn viewport_sanitizes_garbage_dimensions() {
        let viewport = Viewport::new(f32::NAN, -20.0);
        assert_eq!(viewport, Viewport { width: 1.0, height: 1.0 });
    }
}
