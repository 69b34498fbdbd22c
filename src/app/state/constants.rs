use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Fixed chrome around the script surface.
pub(crate) const TOOLBAR_HEIGHT_PX: f32 = 56.0;
pub(crate) const SIDE_PANEL_WIDTH_PX: f32 = 320.0;
pub(crate) const SURFACE_PADDING_PX: f32 = 12.0;
/// Scrollable offsets this close to a requested offset are echoes of it.
pub(crate) const MANUAL_SCROLL_TOLERANCE_PX: f32 = 0.5;
/// How many of our own scroll requests may still be echoed back.
pub(crate) const RECENT_SCROLL_REQUESTS: usize = 8;
pub(crate) const SIGNAL_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const ELAPSED_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub(crate) const TRIGGER_HINT_ALPHA: f32 = 0.35;
pub(crate) const PAUSE_TAG_ALPHA: f32 = 0.55;
pub(crate) static TEXT_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("script-scroll"));
