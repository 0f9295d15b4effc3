pub mod catalog;
mod commands;
pub mod deferred;
mod generators;

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::core::config::RadioConfig;
use crate::core::error::RadioError;
use crate::core::lifecycle::LifecycleComponent;
use crate::core::sampling::WeightedChoice;
use crate::core::scheduler::SegmentScheduler;
use crate::core::state::{
    AppState, ComponentHealth, EventStatus, FeedHealth, LogEntry, ScriptRole, Severity,
    StreamStatus, Subscriber, SubscriptionId, Topic,
};

pub use commands::{Command, ConfigEdit};
pub use deferred::{DeferredAction, DeferredQueue, DeferredTask};
pub use generators::track_level;

/// Weighted categorical draws used by the generators, built once.
#[derive(Debug, Clone)]
struct Draws {
    feed: WeightedChoice<FeedHealth>,
    event: WeightedChoice<EventStatus>,
    stream: WeightedChoice<StreamStatus>,
    component: WeightedChoice<ComponentHealth>,
}

impl Draws {
    fn new() -> Result<Self, RadioError> {
        Ok(Self {
            feed: WeightedChoice::new("feed status", catalog::FEED_WEIGHTS)?,
            event: WeightedChoice::new("event status", catalog::EVENT_WEIGHTS)?,
            stream: WeightedChoice::new("stream status", catalog::STREAM_WEIGHTS)?,
            component: WeightedChoice::new("component health", catalog::COMPONENT_WEIGHTS)?,
        })
    }
}

/// The last script produced, plus the cosmetic knobs re-published with it.
#[derive(Debug, Clone, Default)]
struct ScriptDesk {
    text: String,
    roles: Vec<ScriptRole>,
    humor: u8,
    tone: u8,
}

/// The synthetic backend: owns the state store and every piece of private
/// simulation state the generators and operator commands need.
///
/// All methods run to completion on the caller's turn. Delayed work is
/// queued in a [`DeferredQueue`] for the runtime to execute later.
pub struct ControlRoom {
    state: AppState,
    rng: StdRng,
    draws: Draws,
    scheduler: SegmentScheduler,
    desk: ScriptDesk,
    ducking: bool,
    fallback: bool,
    restart_in_progress: bool,
    restart_delay: Duration,
    metrics_period: Duration,
    deferred: DeferredQueue,
}

impl ControlRoom {
    /// Build an unpopulated control room. Call [`ControlRoom::boot`] to run
    /// every generator once.
    pub fn new(config: &RadioConfig) -> Result<Self, RadioError> {
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = AppState::with_log_capacity(config.simulation.log_capacity);
        state.update_config(config.station.clone());

        Ok(Self {
            state,
            rng,
            draws: Draws::new()?,
            scheduler: SegmentScheduler::new(),
            desk: ScriptDesk {
                humor: config.scripting.humor,
                tone: config.scripting.tone,
                ..ScriptDesk::default()
            },
            ducking: false,
            fallback: false,
            restart_in_progress: false,
            restart_delay: config.simulation.restart_delay(),
            metrics_period: Duration::from_millis(config.timers.metrics_ms),
            deferred: DeferredQueue::default(),
        })
    }

    /// Deterministic, fully booted control room with stock settings.
    pub fn seeded(seed: u64) -> Result<Self, RadioError> {
        let mut room = Self::new(&RadioConfig::default().with_seed(seed))?;
        room.boot();
        Ok(room)
    }

    /// Populate every subsystem once.
    pub fn boot(&mut self) {
        self.generate_ingestion();
        self.generate_memory();
        self.scheduler.reinitialize(&mut self.rng);
        self.publish_scheduler();
        self.generate_script();
        self.generate_audio();
        self.generate_streaming();
        self.generate_metrics();
        self.sweep_component_health();
        self.log("System", Severity::Info, "Control room initialized.");
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn scheduler(&self) -> &SegmentScheduler {
        &self.scheduler
    }

    pub fn ducking(&self) -> bool {
        self.ducking
    }

    pub fn fallback(&self) -> bool {
        self.fallback
    }

    pub fn restart_in_progress(&self) -> bool {
        self.restart_in_progress
    }

    pub fn subscribe(&mut self, topic: Topic, callback: Subscriber) -> SubscriptionId {
        self.state.subscribe(topic, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Hand over all delayed work queued since the last call.
    pub fn take_deferred(&mut self) -> Vec<DeferredTask> {
        self.deferred.drain()
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Execute a deferred action whose delay has elapsed.
    pub fn run_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::FinishEncoderRestart => self.finish_encoder_restart(),
        }
    }

    /// Append a log entry to the store and mirror it to tracing.
    fn log(&mut self, component: &str, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Debug => debug!(component = %component, "{}", message),
            Severity::Info => info!(component = %component, "{}", message),
            Severity::Warn => warn!(component = %component, "{}", message),
            Severity::Error => error!(component = %component, "{}", message),
        }
        self.state.push_log(LogEntry {
            timestamp: now(),
            component: component.to_string(),
            severity,
            message,
        });
    }

    fn publish_scheduler(&mut self) {
        let (rundown, upcoming) = self.scheduler.snapshot();
        let paused = self.scheduler.is_paused();
        self.state.update_scheduler(rundown, upcoming, paused);
    }

    fn publish_script(&mut self) {
        self.state.update_scripting(
            self.desk.text.clone(),
            self.desk.roles.clone(),
            self.desk.humor,
            self.desk.tone,
        );
    }
}

#[async_trait::async_trait]
impl LifecycleComponent for ControlRoom {
    async fn on_init(&mut self) -> anyhow::Result<()> {
        self.boot();
        Ok(())
    }

    async fn on_start(&mut self) -> anyhow::Result<()> {
        let name = self.state.config().system_name.clone();
        self.log("System", Severity::Info, format!("{} is on air.", name));
        Ok(())
    }

    async fn on_shutdown(&mut self) -> anyhow::Result<()> {
        self.log("System", Severity::Info, "Control room signing off.");
        Ok(())
    }
}

pub(crate) fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn now_short() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn details<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
