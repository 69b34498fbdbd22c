//! Script parsing.
//!
//! A script is plain text that may carry inline marker tokens. Parsing splits
//! it into an ordered list of segments; concatenating every segment's
//! `content` gives back the original text byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Matches exactly the recognised marker tokens. Longer names come first so
/// `<pause>` never shadows `<pause-short>` and friends.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:pause-short|pause-medium|pause-long|pause|topic-change)>")
        .expect("marker pattern is valid")
});

/// How long an inline pause lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum PauseKind {
    Short,
    Medium,
    Long,
    Normal,
}

impl PauseKind {
    pub const ALL: [PauseKind; 4] = [
        PauseKind::Short,
        PauseKind::Medium,
        PauseKind::Long,
        PauseKind::Normal,
    ];

    /// The literal marker token for this pause kind.
    pub fn token(self) -> &'static str {
        match self {
            PauseKind::Short => "<pause-short>",
            PauseKind::Medium => "<pause-medium>",
            PauseKind::Long => "<pause-long>",
            PauseKind::Normal => "<pause>",
        }
    }
}

impl std::fmt::Display for PauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PauseKind::Short => "short",
            PauseKind::Medium => "medium",
            PauseKind::Long => "long",
            PauseKind::Normal => "normal",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SegmentKind {
    Text,
    Pause(PauseKind),
    TopicChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Raw substring for text, or the original marker token.
    pub content: String,
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment {
            kind: SegmentKind::Text,
            content: content.into(),
        }
    }

    pub fn pause(kind: PauseKind) -> Self {
        Segment {
            kind: SegmentKind::Pause(kind),
            content: kind.token().to_string(),
        }
    }

    pub fn topic_change() -> Self {
        Segment {
            kind: SegmentKind::TopicChange,
            content: TOPIC_CHANGE_TOKEN.to_string(),
        }
    }

    pub fn pause_kind(&self) -> Option<PauseKind> {
        match self.kind {
            SegmentKind::Pause(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        !matches!(self.kind, SegmentKind::Text)
    }
}

pub const TOPIC_CHANGE_TOKEN: &str = "<topic-change>";

fn classify_marker(token: &str) -> Option<SegmentKind> {
    match token {
        "<pause-short>" => Some(SegmentKind::Pause(PauseKind::Short)),
        "<pause-medium>" => Some(SegmentKind::Pause(PauseKind::Medium)),
        "<pause-long>" => Some(SegmentKind::Pause(PauseKind::Long)),
        "<pause>" => Some(SegmentKind::Pause(PauseKind::Normal)),
        TOPIC_CHANGE_TOKEN => Some(SegmentKind::TopicChange),
        _ => None,
    }
}

/// Split a script into text and marker segments. Never fails; anything that
/// is not an exact marker token stays literal text.
pub fn parse_script(script: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0usize;

    for found in MARKER_RE.find_iter(script) {
        if found.start() > cursor {
            segments.push(Segment::text(&script[cursor..found.start()]));
        }
        if let Some(kind) = classify_marker(found.as_str()) {
            segments.push(Segment {
                kind,
                content: found.as_str().to_string(),
            });
        }
        cursor = found.end();
    }

    if cursor < script.len() {
        segments.push(Segment::text(&script[cursor..]));
    }
    segments
}

/// Inverse of [`parse_script`].
pub fn reassemble(segments: &[Segment]) -> String {
    segments.iter().map(|segment| segment.content.as_str()).collect()
}

/// Script text with every marker token removed.
pub fn strip_markers(script: &str) -> String {
    MARKER_RE.replace_all(script, "").into_owned()
}
