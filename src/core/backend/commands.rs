use super::catalog::{OPERATOR, STREAM_URL};
use super::deferred::DeferredAction;
use super::{ControlRoom, details, now, now_short};
use crate::core::config::validate_station;
use crate::core::error::RadioError;
use crate::core::scheduler::{SchedulerState, SkipOutcome};
use crate::core::state::{ConfigState, Severity, StreamStats, StreamStatus};

/// One operator request. Every variant is fire-and-forget: dispatching it
/// always succeeds and the effect shows up in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RefreshIngestion,
    RefreshMemory,
    RefreshStreaming,
    RefreshMetrics,
    RefreshAll,
    Pause,
    Resume,
    TogglePause,
    Skip,
    RegenerateScript,
    SetHumor(u8),
    SetTone(u8),
    ToggleDucking,
    ToggleFallback,
    RestartEncoder,
    ClearLogs,
    ApplyConfig(ConfigState),
    EditConfig(ConfigEdit),
    ComponentAction { component: String, action: String },
}

/// A single-field change to the station settings, applied on top of the
/// current values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    SystemName(String),
    Timezone(String),
    RetentionDays(u16),
    AutoUpdate(bool),
    PolicyMode(String),
}

impl ConfigEdit {
    pub fn apply_to(&self, config: &mut ConfigState) {
        match self {
            ConfigEdit::SystemName(v) => config.system_name = v.clone(),
            ConfigEdit::Timezone(v) => config.timezone = v.clone(),
            ConfigEdit::RetentionDays(v) => config.retention_days = *v,
            ConfigEdit::AutoUpdate(v) => config.auto_update = *v,
            ConfigEdit::PolicyMode(v) => config.policy_mode = v.clone(),
        }
    }

    fn parse(field: &str, value: &str) -> Result<Self, RadioError> {
        let value = value.trim();
        let edit = match field {
            "name" | "system-name" => ConfigEdit::SystemName(value.to_string()),
            "timezone" | "tz" => ConfigEdit::Timezone(value.to_string()),
            "retention" | "retention-days" => {
                let days: u16 = value
                    .parse()
                    .map_err(|_| RadioError::invalid_argument("config retention", "a number of days"))?;
                ConfigEdit::RetentionDays(days)
            }
            "auto-update" => match value {
                "on" | "true" | "yes" => ConfigEdit::AutoUpdate(true),
                "off" | "false" | "no" => ConfigEdit::AutoUpdate(false),
                _ => return Err(RadioError::invalid_argument("config auto-update", "on or off")),
            },
            "policy" | "policy-mode" => ConfigEdit::PolicyMode(value.to_string()),
            other => return Err(RadioError::UnknownCommand(format!("config {}", other))),
        };

        let mut candidate = ConfigState::default();
        edit.apply_to(&mut candidate);
        validate_station(&candidate)?;
        Ok(edit)
    }
}

impl Command {
    /// Parse one line of operator console input.
    ///
    /// ```text
    /// refresh ingestion|memory|streaming|metrics|all
    /// pause | skip | script | duck | fallback | restart-encoder | clear-logs
    /// humor <0-100> | tone <0-100>
    /// config <name|timezone|retention|auto-update|policy> <value>
    /// action <component>: <action>
    /// ```
    pub fn parse(line: &str) -> Result<Command, RadioError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "refresh" => match rest {
                "ingestion" => Command::RefreshIngestion,
                "memory" => Command::RefreshMemory,
                "streaming" | "stream" => Command::RefreshStreaming,
                "metrics" => Command::RefreshMetrics,
                "all" | "" => Command::RefreshAll,
                _ => {
                    return Err(RadioError::invalid_argument(
                        "refresh",
                        "one of ingestion, memory, streaming, metrics, all",
                    ));
                }
            },
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "toggle-pause" => Command::TogglePause,
            "skip" => Command::Skip,
            "script" => Command::RegenerateScript,
            "humor" => Command::SetHumor(parse_percent("humor", rest)?),
            "tone" => Command::SetTone(parse_percent("tone", rest)?),
            "duck" | "ducking" => Command::ToggleDucking,
            "fallback" => Command::ToggleFallback,
            "restart-encoder" => Command::RestartEncoder,
            "clear-logs" => Command::ClearLogs,
            "config" => {
                let Some((field, value)) = rest.split_once(char::is_whitespace) else {
                    return Err(RadioError::invalid_argument("config", "<field> <value>"));
                };
                Command::EditConfig(ConfigEdit::parse(field, value)?)
            }
            "action" => {
                let Some((component, action)) = rest.split_once(':') else {
                    return Err(RadioError::invalid_argument("action", "<component>: <action>"));
                };
                let (component, action) = (component.trim(), action.trim());
                if component.is_empty() || action.is_empty() {
                    return Err(RadioError::invalid_argument("action", "<component>: <action>"));
                }
                Command::ComponentAction {
                    component: component.to_string(),
                    action: action.to_string(),
                }
            }
            other => return Err(RadioError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn parse_percent(command: &str, value: &str) -> Result<u8, RadioError> {
    match value.parse::<u8>() {
        Ok(v) if v <= 100 => Ok(v),
        _ => Err(RadioError::invalid_argument(command, "a value between 0 and 100")),
    }
}

impl ControlRoom {
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::RefreshIngestion => self.refresh_ingestion(),
            Command::RefreshMemory => self.refresh_memory(),
            Command::RefreshStreaming => self.refresh_streaming(),
            Command::RefreshMetrics => self.refresh_metrics(),
            Command::RefreshAll => self.refresh_all(),
            Command::Pause => self.set_scheduler_paused(true),
            Command::Resume => self.set_scheduler_paused(false),
            Command::TogglePause => self.toggle_scheduler_pause(),
            Command::Skip => self.skip_current_segment(),
            Command::RegenerateScript => self.regenerate_script(),
            Command::SetHumor(v) => self.set_scripting_humor(v),
            Command::SetTone(v) => self.set_scripting_tone(v),
            Command::ToggleDucking => self.toggle_ducking(),
            Command::ToggleFallback => self.toggle_fallback(),
            Command::RestartEncoder => self.restart_encoder(),
            Command::ClearLogs => self.clear_logs(),
            Command::ApplyConfig(config) => self.apply_config(config),
            Command::EditConfig(edit) => {
                let mut config = self.state.config().clone();
                edit.apply_to(&mut config);
                self.apply_config(config);
            }
            Command::ComponentAction { component, action } => {
                self.component_action(&component, &action)
            }
        }
    }

    pub fn refresh_ingestion(&mut self) {
        self.log("Ingestion", Severity::Warn, "Manual refresh requested.");
        self.generate_ingestion();
    }

    pub fn refresh_memory(&mut self) {
        self.generate_memory();
    }

    pub fn refresh_streaming(&mut self) {
        self.generate_streaming();
    }

    pub fn refresh_metrics(&mut self) {
        self.generate_metrics();
    }

    /// Re-run every generator except the scheduler tick.
    pub fn refresh_all(&mut self) {
        self.generate_ingestion();
        self.generate_memory();
        self.generate_script();
        self.generate_audio();
        self.generate_streaming();
        self.generate_metrics();
        self.sweep_component_health();
        self.log("System", Severity::Info, "Full refresh executed.");
    }

    pub fn toggle_scheduler_pause(&mut self) {
        let state = self.scheduler.toggle_pause();
        self.publish_scheduler();
        match state {
            SchedulerState::Paused => self.log("Scheduling", Severity::Warn, "Scheduler paused."),
            SchedulerState::Running => {
                self.log("Scheduling", Severity::Info, "Scheduler resumed.")
            }
        }
    }

    /// Pause or resume; does nothing when the scheduler is already there.
    pub fn set_scheduler_paused(&mut self, paused: bool) {
        if self.scheduler.is_paused() != paused {
            self.toggle_scheduler_pause();
        }
    }

    pub fn skip_current_segment(&mut self) {
        let outcome = self.scheduler.skip(&mut self.rng);
        self.publish_scheduler();
        match outcome {
            SkipOutcome::Skipped(segment) => {
                let message = format!("Segment skipped: {}.", segment.title);
                self.log("Scheduling", Severity::Warn, message);
            }
            SkipOutcome::Reinitialized => {
                self.log("Scheduling", Severity::Info, "Rundown rebuilt.");
            }
        }
    }

    pub fn regenerate_script(&mut self) {
        self.log("Scripting", Severity::Info, "Manual script regeneration.");
        self.generate_script();
    }

    /// Script text and roles stay as they are; only the knob is republished.
    pub fn set_scripting_humor(&mut self, value: u8) {
        self.desk.humor = value.min(100);
        self.publish_script();
    }

    pub fn set_scripting_tone(&mut self, value: u8) {
        self.desk.tone = value.min(100);
        self.publish_script();
    }

    pub fn toggle_ducking(&mut self) {
        self.ducking = !self.ducking;
        let message = if self.ducking {
            "Ducking enabled."
        } else {
            "Ducking disabled."
        };
        self.log("Audio", Severity::Info, message);
        self.generate_audio();
    }

    pub fn toggle_fallback(&mut self) {
        self.fallback = !self.fallback;
        let message = if self.fallback {
            "Fallback engaged."
        } else {
            "Fallback cleared."
        };
        self.log("Audio", Severity::Warn, message);
        self.generate_audio();
    }

    /// Publish a transitional `Restarting` status and queue the completion.
    /// A second request while one is in flight is ignored.
    pub fn restart_encoder(&mut self) {
        if self.restart_in_progress {
            return;
        }
        self.restart_in_progress = true;
        self.log("Streaming", Severity::Warn, "Encoder restart initiated.");
        let listeners = self.state.streaming().listeners;
        self.state.update_streaming(StreamStats {
            status: StreamStatus::Restarting,
            bitrate_kbps: 0,
            listeners,
            url: STREAM_URL.to_string(),
        });
        self.deferred
            .schedule(self.restart_delay, DeferredAction::FinishEncoderRestart);
    }

    pub fn finish_encoder_restart(&mut self) {
        if !self.restart_in_progress {
            return;
        }
        self.restart_in_progress = false;
        self.log("Streaming", Severity::Info, "Encoder restart complete.");
        self.generate_streaming();
    }

    pub fn clear_logs(&mut self) {
        self.state.replace_logs(Vec::new());
    }

    pub fn apply_config(&mut self, config: ConfigState) {
        let fields = details([
            ("Timezone", config.timezone.clone()),
            ("Retention", format!("{} days", config.retention_days)),
            ("Policy", config.policy_mode.clone()),
        ]);
        self.state.update_config(config);
        self.log("Configuration", Severity::Info, "Configuration updated.");
        self.state
            .update_component_summary("System Settings", "Healthy", fields, now());
    }

    /// Run an operator action against any component key, swept or not.
    pub fn component_action(&mut self, component: &str, action: &str) {
        self.log(component, Severity::Info, format!("{} triggered.", action));
        self.state.update_component_summary(
            component,
            "Healthy",
            details([
                ("Last Action", action.to_string()),
                ("Operator", OPERATOR.to_string()),
                ("Timestamp", now_short()),
            ]),
            now(),
        );
    }
}
