//! Fixed pools the generators draw from.

use crate::core::state::{
    ComponentHealth, EventStatus, FeedHealth, StreamStatus, TrackKind,
};

pub const FEED_NAMES: &[&str] = &[
    "Global Wire",
    "Tech Pulse",
    "Markets Daily",
    "Civic Watch",
    "Science Desk",
];

pub const HEADLINE_POOL: &[&str] = &[
    "Global markets stabilize after early turbulence.",
    "AI safety coalition announces new guardrails.",
    "Satellite imagery confirms arctic melt acceleration.",
    "Major rail corridor restored after overnight outage.",
    "Health agency updates vaccination guidance.",
    "Municipal elections see record turnout.",
];

pub const TRACK_CATALOG: &[(&str, TrackKind)] = &[
    ("Anchor Voice", TrackKind::Voice),
    ("Ambient Bed", TrackKind::Music),
    ("Breaking SFX", TrackKind::Effects),
    ("Field Reporter", TrackKind::Voice),
];

/// Components covered by the periodic health sweep. Operator actions are
/// not limited to these keys.
pub const COMPONENT_KEYS: &[&str] = &[
    "Ingestion Guardrails",
    "Segment Planner",
    "Prompt Templates",
    "Script Guardrails",
    "TTS Engine",
    "Music Library",
    "Buffer & Fallback",
    "Encoder (FFmpeg)",
    "Streaming Server",
    "Metrics",
    "Audit Trail",
    "Policies",
    "System Settings",
    "System",
];

/// Script roles in reading order with their inclusive line-count ranges.
pub const SCRIPT_ROLES: &[(&str, u32, u32)] = &[
    ("Anchor", 4, 7),
    ("Analyst", 3, 6),
    ("Reporter", 2, 5),
];

pub const STREAM_URL: &str = "https://stream.ai-news-radio.example/live";
pub const OPERATOR: &str = "Control Room";

pub const EVENT_COUNT: usize = 5;
pub const TIMELINE_LEN: usize = 6;
pub const TIMELINE_SPACING_MINUTES: i64 = 3;

pub const DUCKING_FACTOR: f64 = 0.6;

pub const FEED_WEIGHTS: &[(FeedHealth, f64)] = &[
    (FeedHealth::Healthy, 0.7),
    (FeedHealth::Lagging, 0.2),
    (FeedHealth::Error, 0.1),
];

pub const EVENT_WEIGHTS: &[(EventStatus, f64)] = &[
    (EventStatus::Breaking, 0.2),
    (EventStatus::Ongoing, 0.5),
    (EventStatus::Resolved, 0.3),
];

pub const STREAM_WEIGHTS: &[(StreamStatus, f64)] = &[
    (StreamStatus::Live, 0.75),
    (StreamStatus::Degraded, 0.2),
    (StreamStatus::Offline, 0.05),
];

pub const COMPONENT_WEIGHTS: &[(ComponentHealth, f64)] = &[
    (ComponentHealth::Healthy, 0.7),
    (ComponentHealth::Warning, 0.2),
    (ComponentHealth::Degraded, 0.1),
];
