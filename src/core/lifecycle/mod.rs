use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use crate::core::backend::{ControlRoom, DeferredTask};
use crate::core::config::TimerConfig;

#[derive(Debug, PartialEq)]
pub enum LifecycleState {
    Init,
    Ready,
    Shutdown,
}

#[async_trait::async_trait]
pub trait LifecycleComponent {
    async fn on_init(&mut self) -> Result<()> {
        Ok(())
    }
    async fn on_start(&mut self) -> Result<()> {
        Ok(())
    }
    async fn on_shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The periodic jobs that keep the simulation moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Ingestion,
    Memory,
    Scheduler,
    Scripting,
    Audio,
    Streaming,
    Metrics,
    Components,
}

impl Generator {
    pub const ALL: [Generator; 8] = [
        Generator::Ingestion,
        Generator::Memory,
        Generator::Scheduler,
        Generator::Scripting,
        Generator::Audio,
        Generator::Streaming,
        Generator::Metrics,
        Generator::Components,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Generator::Ingestion => "ingestion",
            Generator::Memory => "memory",
            Generator::Scheduler => "scheduler",
            Generator::Scripting => "scripting",
            Generator::Audio => "audio",
            Generator::Streaming => "streaming",
            Generator::Metrics => "metrics",
            Generator::Components => "components",
        }
    }

    pub fn period(self, timers: &TimerConfig) -> Duration {
        let ms = match self {
            Generator::Ingestion => timers.ingestion_ms,
            Generator::Memory => timers.memory_ms,
            Generator::Scheduler => timers.scheduler_ms,
            Generator::Scripting => timers.scripting_ms,
            Generator::Audio => timers.audio_ms,
            Generator::Streaming => timers.streaming_ms,
            Generator::Metrics => timers.metrics_ms,
            Generator::Components => timers.components_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn run(self, room: &mut ControlRoom) {
        match self {
            Generator::Ingestion => room.generate_ingestion(),
            Generator::Memory => room.generate_memory(),
            Generator::Scheduler => room.tick_scheduler(),
            Generator::Scripting => room.generate_script(),
            Generator::Audio => room.generate_audio(),
            Generator::Streaming => room.generate_streaming(),
            Generator::Metrics => room.generate_metrics(),
            Generator::Components => room.sweep_component_health(),
        }
    }
}

/// Shared access to the control room. Every job and operator command runs
/// to completion under the lock, so each turn is atomic to observers.
#[derive(Clone)]
pub struct RadioHandle {
    room: Arc<Mutex<ControlRoom>>,
}

impl RadioHandle {
    pub fn new(room: ControlRoom) -> Self {
        Self {
            room: Arc::new(Mutex::new(room)),
        }
    }

    pub fn shared(&self) -> Arc<Mutex<ControlRoom>> {
        self.room.clone()
    }

    /// Run one turn against the control room, then hand any delayed work it
    /// queued to the tokio timer.
    pub async fn with_room<T>(&self, turn: impl FnOnce(&mut ControlRoom) -> T) -> T {
        let (out, tasks) = {
            let mut room = self.room.lock().await;
            let out = turn(&mut room);
            (out, room.take_deferred())
        };
        spawn_deferred(self.room.clone(), tasks);
        out
    }
}

fn spawn_deferred(room: Arc<Mutex<ControlRoom>>, tasks: Vec<DeferredTask>) {
    for task in tasks {
        let room = room.clone();
        tokio::spawn(async move {
            tokio::time::sleep(task.delay).await;
            let follow_up = {
                let mut guard = room.lock().await;
                guard.run_deferred(task.action);
                guard.take_deferred()
            };
            spawn_deferred(room, follow_up);
        });
    }
}

pub struct LifecycleManager {
    state: LifecycleState,
    components: Vec<Arc<Mutex<dyn LifecycleComponent + Send + Sync>>>,
    pub scheduler: JobScheduler,
}

impl LifecycleManager {
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self {
            state: LifecycleState::Init,
            components: Vec::new(),
            scheduler,
        })
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn attach(&mut self, component: Arc<Mutex<dyn LifecycleComponent + Send + Sync>>) {
        self.components.push(component);
    }

    /// Register one repeated job per generator, each on its own period.
    pub async fn attach_generators(
        &mut self,
        handle: &RadioHandle,
        timers: &TimerConfig,
    ) -> Result<()> {
        for generator in Generator::ALL {
            let period = generator.period(timers);
            let handle = handle.clone();
            match Job::new_repeated_async(period, move |_uuid, _l| {
                let handle = handle.clone();
                Box::pin(async move {
                    handle.with_room(|room| generator.run(room)).await;
                })
            }) {
                Ok(job) => {
                    self.scheduler.add(job).await?;
                    info!("Scheduled {} generator every {:?}", generator.name(), period);
                }
                Err(e) => {
                    error!("Failed to schedule {} generator: {}", generator.name(), e);
                }
            }
        }
        Ok(())
    }

    pub async fn start(&mut self) -> Result<()> {
        info!("Lifecycle Phase: Init");
        self.state = LifecycleState::Init;
        for comp in &self.components {
            comp.lock().await.on_init().await?;
        }
        for comp in &self.components {
            comp.lock().await.on_start().await?;
        }

        info!("Lifecycle Phase: Ready (Starting Scheduler)");
        self.scheduler.start().await?;
        self.state = LifecycleState::Ready;

        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Lifecycle Phase: Shutdown");
        self.state = LifecycleState::Shutdown;

        if let Err(e) = self.scheduler.shutdown().await {
            warn!("Scheduler shutdown error: {}", e);
        }
        for comp in &self.components {
            if let Err(e) = comp.lock().await.on_shutdown().await {
                warn!("Component shutdown error: {}", e);
            }
        }

        Ok(())
    }
}
