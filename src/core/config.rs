use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::core::error::RadioError;
use crate::core::state::{ConfigState, LOG_CAPACITY};

pub const DEFAULT_CONFIG_FILE: &str = "radio.toml";

/// Largest accepted `simulation.log_capacity`.
pub const MAX_LOG_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RadioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub timers: TimerConfig,

    #[serde(default)]
    pub station: ConfigState,

    #[serde(default)]
    pub scripting: ScriptingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the config was read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible runs; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

/// Generator periods in milliseconds. Each runs on its own timer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub ingestion_ms: u64,
    pub memory_ms: u64,
    pub scheduler_ms: u64,
    pub scripting_ms: u64,
    pub audio_ms: u64,
    pub streaming_ms: u64,
    pub metrics_ms: u64,
    pub components_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptingConfig {
    pub humor: u8,
    pub tone: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_capacity() -> usize {
    LOG_CAPACITY
}
fn default_restart_delay_ms() -> u64 {
    2000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_capacity: default_log_capacity(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            ingestion_ms: 8000,
            memory_ms: 7000,
            scheduler_ms: 1000,
            scripting_ms: 12000,
            audio_ms: 1500,
            streaming_ms: 2500,
            metrics_ms: 5000,
            components_ms: 9000,
        }
    }
}

impl Default for ScriptingConfig {
    fn default() -> Self {
        Self { humor: 40, tone: 55 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SimulationConfig {
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

impl TimerConfig {
    pub fn periods(&self) -> [(&'static str, u64); 8] {
        [
            ("ingestion", self.ingestion_ms),
            ("memory", self.memory_ms),
            ("scheduler", self.scheduler_ms),
            ("scripting", self.scripting_ms),
            ("audio", self.audio_ms),
            ("streaming", self.streaming_ms),
            ("metrics", self.metrics_ms),
            ("components", self.components_ms),
        ]
    }
}

impl RadioConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read(path).await?;
        info!("{}", config.summary());
        Ok(config)
    }

    /// Read and validate without logging, for callers that install the
    /// subscriber only once the configured level is known.
    pub async fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        let mut config = Self::parse(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// One line describing where the settings came from.
    pub fn summary(&self) -> String {
        match &self.source {
            Some(path) => format!(
                "Loaded radio config from {}: station={}, seed={:?}, log_capacity={}, scheduler={}ms",
                path.display(),
                self.station.system_name,
                self.simulation.seed,
                self.simulation.log_capacity,
                self.timers.scheduler_ms
            ),
            None => format!(
                "No {} found, using default simulation settings.",
                DEFAULT_CONFIG_FILE
            ),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: RadioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), RadioError> {
        validate_station(&self.station)?;
        if !(1..=MAX_LOG_CAPACITY).contains(&self.simulation.log_capacity) {
            return Err(RadioError::InvalidConfig(format!(
                "simulation.log_capacity must be between 1 and {}, got {}",
                MAX_LOG_CAPACITY, self.simulation.log_capacity
            )));
        }
        if self.scripting.humor > 100 || self.scripting.tone > 100 {
            return Err(RadioError::InvalidConfig(
                "scripting.humor and scripting.tone must be between 0 and 100".into(),
            ));
        }
        if let Some((name, _)) = self.timers.periods().iter().find(|(_, ms)| *ms == 0) {
            return Err(RadioError::InvalidConfig(format!(
                "timers.{}_ms must be greater than zero",
                name
            )));
        }
        Ok(())
    }
}

/// Check operator-supplied station settings before they reach the store.
pub fn validate_station(station: &ConfigState) -> Result<(), RadioError> {
    if station.system_name.trim().is_empty() {
        return Err(RadioError::InvalidConfig(
            "station.system_name must not be empty".into(),
        ));
    }
    if station.timezone.trim().is_empty() {
        return Err(RadioError::InvalidConfig(
            "station.timezone must not be empty".into(),
        ));
    }
    if !(1..=365).contains(&station.retention_days) {
        return Err(RadioError::InvalidConfig(format!(
            "station.retention_days must be between 1 and 365, got {}",
            station.retention_days
        )));
    }
    Ok(())
}
