use chrono::{Local, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;

use super::catalog::{
    COMPONENT_KEYS, DUCKING_FACTOR, EVENT_COUNT, FEED_NAMES, HEADLINE_POOL, SCRIPT_ROLES,
    STREAM_URL, TIMELINE_LEN, TIMELINE_SPACING_MINUTES, TRACK_CATALOG,
};
use super::{ControlRoom, details, now, now_short};
use crate::core::scheduler::TickOutcome;
use crate::core::state::{
    EventEntry, FeedHealth, FeedStatus, IngestionHealth, MemoryHealth, MetricEntry, ScriptRole,
    Severity, StreamStats, StreamStatus, TimelineEntry, TrackEntry, TrackKind,
};

/// Mixer level for a track given its sampled base level. Music beds are
/// attenuated while ducking is on; voice and effects never are.
pub fn track_level(base: u8, kind: TrackKind, ducking: bool) -> u8 {
    if kind == TrackKind::Music && ducking {
        (f64::from(base) * DUCKING_FACTOR).round() as u8
    } else {
        base
    }
}

impl ControlRoom {
    pub fn generate_ingestion(&mut self) {
        let mut feeds = Vec::with_capacity(FEED_NAMES.len());
        let mut error_count = 0;
        for name in FEED_NAMES {
            let status = self.draws.feed.sample(&mut self.rng);
            if status == FeedHealth::Error {
                error_count += 1;
            }
            feeds.push(FeedStatus {
                name: name.to_string(),
                status,
                last_fetch: now_short(),
                items: self.rng.gen_range(12..=120),
            });
        }
        let overall = if error_count > 0 {
            IngestionHealth::Degraded
        } else {
            IngestionHealth::Healthy
        };
        let last_fetch = now();
        let feed_count = feeds.len();
        self.state
            .update_ingestion(feeds, last_fetch.clone(), overall);
        self.state.update_component_summary(
            "Ingestion",
            overall.as_str(),
            details([
                ("Feeds Active", feed_count.to_string()),
                ("Errors", error_count.to_string()),
                ("Last Fetch", last_fetch.clone()),
            ]),
            last_fetch,
        );
        self.log("Ingestion", Severity::Info, "Feed polling cycle completed.");
    }

    pub fn generate_memory(&mut self) {
        let mut events = Vec::with_capacity(EVENT_COUNT);
        let mut statuses = Vec::with_capacity(EVENT_COUNT);
        for idx in 1..=EVENT_COUNT {
            let status = self.draws.event.sample(&mut self.rng);
            statuses.push(status);
            let title = pick_headline(&mut self.rng);
            events.push(EventEntry {
                id: format!("E{:03}", idx),
                title: title.to_string(),
                status,
                timestamp: now_short(),
                detail: format!(
                    "{} Analysts are tracking updates and verifying sources.",
                    title
                ),
            });
        }

        let current = Local::now();
        let timeline: Vec<TimelineEntry> = (0..TIMELINE_LEN)
            .map(|step| {
                let at = current - TimeDelta::minutes(step as i64 * TIMELINE_SPACING_MINUTES);
                TimelineEntry {
                    timestamp: at.format("%H:%M:%S").to_string(),
                    description: pick_headline(&mut self.rng).to_string(),
                }
            })
            .collect();

        let status = MemoryHealth::from_statuses(&statuses);
        let last_update = now();
        let event_count = events.len();
        let timeline_len = timeline.len();
        self.state.update_memory(events, timeline, status);
        self.state.update_component_summary(
            "Memory",
            status.as_str(),
            details([
                ("Active Events", event_count.to_string()),
                ("Timeline Entries", timeline_len.to_string()),
                ("Last Sync", last_update.clone()),
            ]),
            last_update,
        );
        self.log("Memory", Severity::Info, "Event store synchronized.");
    }

    /// One scheduler period: count down, rotate, or hold while paused.
    pub fn tick_scheduler(&mut self) {
        let outcome = self.scheduler.tick(&mut self.rng);
        match &outcome {
            TickOutcome::Held => {
                self.publish_scheduler();
                return;
            }
            TickOutcome::Completed(finished) => {
                let message = format!("Segment completed: {}.", finished.title);
                self.log("Scheduling", Severity::Info, message);
            }
            TickOutcome::Reinitialized => {
                self.log("Scheduling", Severity::Info, "Rundown rebuilt.");
            }
            TickOutcome::Counted => {}
        }

        self.publish_scheduler();
        let last_update = now();
        let status = if self.scheduler.is_paused() {
            "Paused"
        } else {
            "Running"
        };
        self.state.update_component_summary(
            "Scheduling",
            status,
            details([
                ("Rundown Segments", self.scheduler.rundown().len().to_string()),
                ("Upcoming Segments", self.scheduler.upcoming().len().to_string()),
                ("Last Tick", last_update.clone()),
            ]),
            last_update,
        );
    }

    /// Draw three distinct headlines and hand one to each fixed role.
    pub fn generate_script(&mut self) {
        let mut picks: Vec<&str> = HEADLINE_POOL
            .choose_multiple(&mut self.rng, SCRIPT_ROLES.len())
            .copied()
            .collect();
        picks.shuffle(&mut self.rng);

        let text = SCRIPT_ROLES
            .iter()
            .zip(&picks)
            .map(|((role, _, _), headline)| format!("{}: {}", role, headline))
            .collect::<Vec<_>>()
            .join("\n\n");
        let roles: Vec<ScriptRole> = SCRIPT_ROLES
            .iter()
            .map(|(role, lo, hi)| ScriptRole {
                role: role.to_string(),
                lines: self.rng.gen_range(*lo..=*hi),
            })
            .collect();

        self.desk.text = text;
        self.desk.roles = roles;
        self.publish_script();

        let last_update = now();
        self.state.update_component_summary(
            "Scripting",
            "Active",
            details([
                ("Last Script", last_update.clone()),
                ("Roles", self.desk.roles.len().to_string()),
                ("Tone", self.desk.tone.to_string()),
            ]),
            last_update,
        );
        self.log("Scripting", Severity::Info, "New script generated.");
    }

    pub fn generate_audio(&mut self) {
        let tracks: Vec<TrackEntry> = TRACK_CATALOG
            .iter()
            .map(|(name, kind)| {
                let base: u8 = self.rng.gen_range(40..=90);
                TrackEntry {
                    name: name.to_string(),
                    kind: *kind,
                    level: track_level(base, *kind, self.ducking),
                }
            })
            .collect();
        let track_count = tracks.len();
        self.state.update_audio(tracks, self.ducking, self.fallback);

        let last_update = now();
        let status = if self.fallback { "Fallback" } else { "Active" };
        let ducking = if self.ducking { "Enabled" } else { "Disabled" };
        self.state.update_component_summary(
            "Audio",
            status,
            details([
                ("Active Tracks", track_count.to_string()),
                ("Ducking", ducking.to_string()),
                ("Last Mix", last_update.clone()),
            ]),
            last_update,
        );
        self.log("Audio", Severity::Debug, "Mix levels refreshed.");
    }

    /// Sample a streaming heartbeat. Does nothing while an encoder restart
    /// is in flight.
    pub fn generate_streaming(&mut self) {
        if self.restart_in_progress {
            return;
        }
        let status = self.draws.stream.sample(&mut self.rng);
        let (bitrate, listeners) = if status == StreamStatus::Offline {
            (0, 0)
        } else {
            (self.rng.gen_range(96..=256), self.rng.gen_range(18..=140))
        };
        self.state.update_streaming(StreamStats {
            status,
            bitrate_kbps: bitrate,
            listeners,
            url: STREAM_URL.to_string(),
        });

        self.state.update_component_summary(
            "Streaming",
            status.as_str(),
            details([
                ("Bitrate", format!("{} kbps", bitrate)),
                ("Listeners", listeners.to_string()),
                ("Endpoint", "Primary".to_string()),
            ]),
            now(),
        );
        self.log(
            "Streaming",
            Severity::Info,
            format!("Streaming heartbeat: {}.", status.as_str()),
        );
    }

    pub fn generate_metrics(&mut self) {
        let ranges: [(&str, f64, f64, &str, &str); 6] = [
            ("CPU Usage", 22.0, 74.0, "%", "System"),
            ("Memory Usage", 40.0, 85.0, "%", "System"),
            ("Ingestion Lag", 0.2, 4.8, "min", "Ingestion"),
            ("Script Queue", 1.0, 6.0, "items", "Scripting"),
            ("Audio Buffer", 30.0, 90.0, "%", "Audio"),
            ("Outbound Latency", 0.5, 2.5, "s", "Streaming"),
        ];
        let metrics: Vec<MetricEntry> = ranges
            .iter()
            .map(|(name, lo, hi, unit, component)| MetricEntry {
                name: name.to_string(),
                value: self.rng.gen_range(*lo..=*hi),
                unit: unit.to_string(),
                component: component.to_string(),
            })
            .collect();
        let series = metrics.len();
        self.state.update_metrics(metrics);

        let last_update = now();
        self.state.update_component_summary(
            "Metrics",
            "Healthy",
            details([
                ("Series", series.to_string()),
                ("Refresh", format!("{}s", self.metrics_period.as_secs_f64())),
                ("Last Update", last_update.clone()),
            ]),
            last_update,
        );
        self.log("Metrics", Severity::Debug, "Metrics sampled.");
    }

    /// Re-draw the health of every swept component, with a few key-specific
    /// detail fields on top of the common ones.
    pub fn sweep_component_health(&mut self) {
        for key in COMPONENT_KEYS {
            let status = self.draws.component.sample(&mut self.rng);
            let mut fields = details([
                ("Last Check", now_short()),
                ("Throughput", format!("{}%", self.rng.gen_range(85..=110))),
                ("Queue Depth", self.rng.gen_range(0..=12).to_string()),
            ]);
            match *key {
                "System Settings" | "Policies" => {
                    fields.insert("Mode".into(), self.state.config().policy_mode.clone());
                }
                "Audit Trail" => {
                    fields.insert("Entries".into(), self.rng.gen_range(120..=220).to_string());
                }
                "Streaming Server" => {
                    fields.insert("Connections".into(), self.rng.gen_range(1..=4).to_string());
                }
                "Encoder (FFmpeg)" => {
                    fields.insert("Profile".into(), "AAC 128k".into());
                }
                "Buffer & Fallback" => {
                    let fallback = if self.fallback { "Enabled" } else { "Idle" };
                    fields.insert("Fallback".into(), fallback.into());
                }
                _ => {}
            }
            self.state
                .update_component_summary(key, status.as_str(), fields, now());
        }
        self.log(
            "System",
            Severity::Debug,
            "Component health sweep completed.",
        );
    }
}

fn pick_headline<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    HEADLINE_POOL
        .choose(rng)
        .copied()
        .unwrap_or("Global markets stabilize after early turbulence.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ducking_scales_music_only() {
        assert_eq!(track_level(80, TrackKind::Music, true), 48);
        assert_eq!(track_level(45, TrackKind::Music, true), 27);
        assert_eq!(track_level(41, TrackKind::Music, true), 25);
        assert_eq!(track_level(80, TrackKind::Music, false), 80);
        assert_eq!(track_level(80, TrackKind::Voice, true), 80);
        assert_eq!(track_level(80, TrackKind::Effects, true), 80);
    }
}
