use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FeedHealth {
    Healthy,
    Lagging,
    Error,
}

impl FeedHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedHealth::Healthy => "Healthy",
            FeedHealth::Lagging => "Lagging",
            FeedHealth::Error => "Error",
        }
    }
}

/// Overall ingestion label derived from the latest polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum IngestionHealth {
    #[default]
    Idle,
    Healthy,
    Degraded,
}

impl IngestionHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            IngestionHealth::Idle => "Idle",
            IngestionHealth::Healthy => "Healthy",
            IngestionHealth::Degraded => "Degraded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EventStatus {
    Breaking,
    Ongoing,
    Resolved,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Breaking => "Breaking",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Resolved => "Resolved",
        }
    }
}

/// Memory label, escalated by the most urgent event status present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum MemoryHealth {
    #[default]
    Idle,
    Breaking,
    Monitoring,
    Stable,
}

impl MemoryHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            MemoryHealth::Idle => "Idle",
            MemoryHealth::Breaking => "Breaking",
            MemoryHealth::Monitoring => "Monitoring",
            MemoryHealth::Stable => "Stable",
        }
    }

    pub fn from_statuses(statuses: &[EventStatus]) -> Self {
        if statuses.contains(&EventStatus::Breaking) {
            MemoryHealth::Breaking
        } else if statuses.contains(&EventStatus::Ongoing) {
            MemoryHealth::Monitoring
        } else {
            MemoryHealth::Stable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TrackKind {
    Voice,
    Music,
    Effects,
}

impl TrackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Voice => "Voice",
            TrackKind::Music => "Music",
            TrackKind::Effects => "Effects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum StreamStatus {
    Live,
    Degraded,
    #[default]
    Offline,
    Restarting,
}

impl StreamStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamStatus::Live => "Live",
            StreamStatus::Degraded => "Degraded",
            StreamStatus::Offline => "Offline",
            StreamStatus::Restarting => "Restarting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Health label drawn by the periodic component sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentHealth {
    Healthy,
    Warning,
    Degraded,
}

impl ComponentHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentHealth::Healthy => "Healthy",
            ComponentHealth::Warning => "Warning",
            ComponentHealth::Degraded => "Degraded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FeedStatus {
    pub name: String,
    pub status: FeedHealth,
    pub last_fetch: String,
    pub items: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EventEntry {
    pub id: String,
    pub title: String,
    pub status: EventStatus,
    pub timestamp: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TimelineEntry {
    pub timestamp: String,
    pub description: String,
}

/// A rundown slot. `remaining_seconds` is the only field mutated in place,
/// by the scheduler tick.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SegmentEntry {
    pub title: String,
    pub start_time: String,
    pub duration_seconds: u32,
    pub remaining_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScriptRole {
    pub role: String,
    pub lines: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TrackEntry {
    pub name: String,
    pub kind: TrackKind,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct StreamStats {
    pub status: StreamStatus,
    pub bitrate_kbps: u32,
    pub listeners: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub component: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}: {}",
            self.timestamp,
            self.component,
            self.severity.as_str(),
            self.message
        )
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricEntry {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConfigState {
    pub system_name: String,
    pub timezone: String,
    pub retention_days: u16,
    pub auto_update: bool,
    pub policy_mode: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            system_name: "AI News Radio".to_string(),
            timezone: "UTC".to_string(),
            retention_days: 30,
            auto_update: true,
            policy_mode: "Balanced".to_string(),
        }
    }
}
