pub mod bus;
pub mod types;

use std::collections::{BTreeMap, HashMap, VecDeque};

pub use bus::{EventBus, Subscriber, SubscriptionId, Topic};
pub use types::{
    ComponentHealth, ConfigState, EventEntry, EventStatus, FeedHealth, FeedStatus,
    IngestionHealth, LogEntry, MemoryHealth, MetricEntry, ScriptRole, SegmentEntry, Severity,
    StreamStats, StreamStatus, TimelineEntry, TrackEntry, TrackKind,
};

/// Default number of log entries retained before the oldest are evicted.
pub const LOG_CAPACITY: usize = 300;

#[derive(Debug, Clone, serde::Serialize)]
pub struct IngestionSnapshot {
    pub feeds: Vec<FeedStatus>,
    pub last_fetch: String,
    pub status: IngestionHealth,
}

impl Default for IngestionSnapshot {
    fn default() -> Self {
        Self {
            feeds: Vec::new(),
            last_fetch: "Never".to_string(),
            status: IngestionHealth::Idle,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MemorySnapshot {
    pub events: Vec<EventEntry>,
    pub timeline: Vec<TimelineEntry>,
    pub status: MemoryHealth,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SchedulerSnapshot {
    pub rundown: Vec<SegmentEntry>,
    pub upcoming: Vec<SegmentEntry>,
    pub paused: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ScriptingSnapshot {
    pub script: String,
    pub roles: Vec<ScriptRole>,
    pub humor: u8,
    pub tone: u8,
}

impl Default for ScriptingSnapshot {
    fn default() -> Self {
        Self {
            script: String::new(),
            roles: Vec::new(),
            humor: 40,
            tone: 55,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AudioSnapshot {
    pub tracks: Vec<TrackEntry>,
    pub ducking: bool,
    pub fallback: bool,
}

/// Open, string-keyed registry of per-component status, details and last
/// update time. Keys are free-form: operator actions may target any name.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ComponentRegistry {
    pub status: HashMap<String, String>,
    pub details: HashMap<String, BTreeMap<String, String>>,
    pub last_update: HashMap<String, String>,
}

impl ComponentRegistry {
    pub fn status_of(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    pub fn details_of(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.details.get(key)
    }

    pub fn last_update_of(&self, key: &str) -> Option<&str> {
        self.last_update.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.status.keys().map(String::as_str)
    }
}

/// The process-wide store holding the latest snapshot of every subsystem.
///
/// Every update replaces its group wholesale and then fires exactly one
/// notification for that group. No update validates its input: the
/// generators that call these are trusted to produce well-formed values.
#[derive(Debug, serde::Serialize)]
pub struct AppState {
    ingestion: IngestionSnapshot,
    memory: MemorySnapshot,
    scheduler: SchedulerSnapshot,
    scripting: ScriptingSnapshot,
    audio: AudioSnapshot,
    streaming: StreamStats,
    logs: VecDeque<LogEntry>,
    metrics: Vec<MetricEntry>,
    config: ConfigState,
    components: ComponentRegistry,
    #[serde(skip)]
    log_capacity: usize,
    #[serde(skip)]
    bus: EventBus,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_log_capacity(LOG_CAPACITY)
    }

    pub fn with_log_capacity(log_capacity: usize) -> Self {
        Self {
            ingestion: IngestionSnapshot::default(),
            memory: MemorySnapshot::default(),
            scheduler: SchedulerSnapshot::default(),
            scripting: ScriptingSnapshot::default(),
            audio: AudioSnapshot::default(),
            streaming: StreamStats::default(),
            logs: VecDeque::with_capacity(log_capacity.min(LOG_CAPACITY)),
            metrics: Vec::new(),
            config: ConfigState::default(),
            components: ComponentRegistry::default(),
            log_capacity: log_capacity.max(1),
            bus: EventBus::default(),
        }
    }

    // --- Subscriptions ---

    pub fn subscribe(&mut self, topic: Topic, callback: Subscriber) -> SubscriptionId {
        self.bus.subscribe(topic, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn notify(&self, topic: Topic) {
        self.bus.dispatch(topic, self);
    }

    // --- Reads ---

    pub fn ingestion(&self) -> &IngestionSnapshot {
        &self.ingestion
    }

    pub fn memory(&self) -> &MemorySnapshot {
        &self.memory
    }

    pub fn scheduler(&self) -> &SchedulerSnapshot {
        &self.scheduler
    }

    pub fn scripting(&self) -> &ScriptingSnapshot {
        &self.scripting
    }

    pub fn audio(&self) -> &AudioSnapshot {
        &self.audio
    }

    pub fn streaming(&self) -> &StreamStats {
        &self.streaming
    }

    pub fn logs(&self) -> &VecDeque<LogEntry> {
        &self.logs
    }

    /// The newest `count` entries, oldest first, optionally only those from
    /// one component (matched case-insensitively).
    pub fn recent_logs(&self, count: usize, component: Option<&str>) -> Vec<&LogEntry> {
        let mut tail: Vec<&LogEntry> = self
            .logs
            .iter()
            .rev()
            .filter(|entry| component.is_none_or(|c| entry.component.eq_ignore_ascii_case(c)))
            .take(count)
            .collect();
        tail.reverse();
        tail
    }

    pub fn log_capacity(&self) -> usize {
        self.log_capacity
    }

    pub fn metrics(&self) -> &[MetricEntry] {
        &self.metrics
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    // --- Updates ---

    pub fn update_ingestion(
        &mut self,
        feeds: Vec<FeedStatus>,
        last_fetch: String,
        status: IngestionHealth,
    ) {
        self.ingestion = IngestionSnapshot {
            feeds,
            last_fetch,
            status,
        };
        self.notify(Topic::Ingestion);
    }

    pub fn update_memory(
        &mut self,
        events: Vec<EventEntry>,
        timeline: Vec<TimelineEntry>,
        status: MemoryHealth,
    ) {
        self.memory = MemorySnapshot {
            events,
            timeline,
            status,
        };
        self.notify(Topic::Memory);
    }

    pub fn update_scheduler(
        &mut self,
        rundown: Vec<SegmentEntry>,
        upcoming: Vec<SegmentEntry>,
        paused: bool,
    ) {
        self.scheduler = SchedulerSnapshot {
            rundown,
            upcoming,
            paused,
        };
        self.notify(Topic::Scheduler);
    }

    pub fn update_scripting(&mut self, script: String, roles: Vec<ScriptRole>, humor: u8, tone: u8) {
        self.scripting = ScriptingSnapshot {
            script,
            roles,
            humor,
            tone,
        };
        self.notify(Topic::Scripting);
    }

    pub fn update_audio(&mut self, tracks: Vec<TrackEntry>, ducking: bool, fallback: bool) {
        self.audio = AudioSnapshot {
            tracks,
            ducking,
            fallback,
        };
        self.notify(Topic::Audio);
    }

    pub fn update_streaming(&mut self, stats: StreamStats) {
        self.streaming = stats;
        self.notify(Topic::Streaming);
    }

    /// Append one entry, evicting from the front once over capacity.
    pub fn push_log(&mut self, entry: LogEntry) {
        self.logs.push_back(entry);
        while self.logs.len() > self.log_capacity {
            self.logs.pop_front();
        }
        self.notify(Topic::Observability);
    }

    /// Replace the whole log collection, keeping only the newest entries
    /// that fit.
    pub fn replace_logs(&mut self, logs: Vec<LogEntry>) {
        let skip = logs.len().saturating_sub(self.log_capacity);
        self.logs = logs.into_iter().skip(skip).collect();
        self.notify(Topic::Observability);
    }

    pub fn update_metrics(&mut self, metrics: Vec<MetricEntry>) {
        self.metrics = metrics;
        self.notify(Topic::Observability);
    }

    pub fn update_config(&mut self, config: ConfigState) {
        self.config = config;
        self.notify(Topic::Config);
    }

    /// Merge one component's summary into the registry. Fires the coarse
    /// `System` topic, independent of any per-subsystem notification.
    pub fn update_component_summary(
        &mut self,
        key: &str,
        status: &str,
        details: BTreeMap<String, String>,
        last_update: String,
    ) {
        self.components
            .status
            .insert(key.to_string(), status.to_string());
        self.components.details.insert(key.to_string(), details);
        self.components
            .last_update
            .insert(key.to_string(), last_update);
        self.notify(Topic::System);
    }
}
