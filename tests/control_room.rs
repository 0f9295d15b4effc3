use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ai_radio_control::core::backend::{Command, ControlRoom};
use ai_radio_control::core::config::RadioConfig;
use ai_radio_control::core::state::{
    AppState, ConfigState, IngestionHealth, MemoryHealth, Severity, StreamStatus, Topic, TrackKind,
};

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

fn record_topics(room: &mut ControlRoom) -> Arc<Mutex<HashMap<Topic, usize>>> {
    let seen = Arc::new(Mutex::new(HashMap::new()));
    for topic in Topic::ALL {
        let seen = seen.clone();
        room.subscribe(
            topic,
            Box::new(move |_: &AppState| {
                *seen.lock().unwrap().entry(topic).or_insert(0) += 1;
            }),
        );
    }
    seen
}

fn count(seen: &Arc<Mutex<HashMap<Topic, usize>>>, topic: Topic) -> usize {
    seen.lock().unwrap().get(&topic).copied().unwrap_or(0)
}

#[test]
fn boot_populates_every_subsystem() -> TestResult<()> {
    let room = ControlRoom::seeded(1)?;
    let state = room.state();

    assert_eq!(state.ingestion().feeds.len(), 5);
    assert_ne!(state.ingestion().status, IngestionHealth::Idle);
    assert_eq!(state.memory().events.len(), 5);
    assert_eq!(state.memory().events[0].id, "E001");
    assert_eq!(state.memory().timeline.len(), 6);
    assert_ne!(state.memory().status, MemoryHealth::Idle);
    assert_eq!(state.scheduler().rundown.len(), 3);
    assert_eq!(state.scheduler().upcoming.len(), 4);
    assert_eq!(state.scripting().roles.len(), 3);
    assert_eq!(state.scripting().script.split("\n\n").count(), 3);
    assert_eq!(state.audio().tracks.len(), 4);
    assert_eq!(state.metrics().len(), 6);
    assert_ne!(state.streaming().status, StreamStatus::Restarting);
    assert!(state.components().status_of("TTS Engine").is_some());
    Ok(())
}

#[test]
fn ingestion_is_degraded_exactly_when_a_feed_errors() -> TestResult<()> {
    let mut room = ControlRoom::seeded(2)?;
    for _ in 0..200 {
        room.refresh_ingestion();
        let ingestion = room.state().ingestion();
        let any_error = ingestion
            .feeds
            .iter()
            .any(|feed| feed.status.as_str() == "Error");
        let expected = if any_error {
            IngestionHealth::Degraded
        } else {
            IngestionHealth::Healthy
        };
        assert_eq!(ingestion.status, expected);
        assert!(ingestion.feeds.iter().all(|f| (12..=120).contains(&f.items)));
    }
    Ok(())
}

#[test]
fn streaming_bounds_hold_across_heartbeats() -> TestResult<()> {
    let mut room = ControlRoom::seeded(3)?;
    for _ in 0..300 {
        room.refresh_streaming();
        let stats = room.state().streaming();
        if stats.status == StreamStatus::Offline {
            assert_eq!((stats.bitrate_kbps, stats.listeners), (0, 0));
        } else {
            assert!((96..=256).contains(&stats.bitrate_kbps));
            assert!((18..=140).contains(&stats.listeners));
        }
    }
    Ok(())
}

#[test]
fn skip_shifts_both_queues_by_one() -> TestResult<()> {
    let mut room = ControlRoom::seeded(4)?;
    let before = room.state().scheduler().clone();

    room.dispatch(Command::Skip);

    let after = room.state().scheduler();
    assert_eq!(after.rundown[..2], before.rundown[1..]);
    assert_eq!(after.rundown[2], before.upcoming[0]);
    assert_eq!(after.upcoming[..3], before.upcoming[1..]);
    assert_eq!(after.upcoming.len(), 4);

    let last = room.state().logs().back().ok_or("no log entry")?;
    assert_eq!(last.severity, Severity::Warn);
    assert_eq!(
        last.message,
        format!("Segment skipped: {}.", before.rundown[0].title)
    );
    Ok(())
}

#[test]
fn paused_ticks_leave_the_head_untouched() -> TestResult<()> {
    let mut room = ControlRoom::seeded(5)?;
    room.dispatch(Command::TogglePause);
    let head = room.state().scheduler().rundown[0].remaining_seconds;

    for _ in 0..50 {
        room.tick_scheduler();
        assert_eq!(room.state().scheduler().rundown[0].remaining_seconds, head);
    }

    room.dispatch(Command::TogglePause);
    room.tick_scheduler();
    assert_eq!(room.state().scheduler().rundown[0].remaining_seconds, head - 1);
    Ok(())
}

#[test]
fn scheduler_never_runs_dry() -> TestResult<()> {
    let mut room = ControlRoom::seeded(6)?;
    for _ in 0..2_000 {
        room.tick_scheduler();
        let scheduler = room.state().scheduler();
        assert!(!scheduler.rundown.is_empty());
        let head = &scheduler.rundown[0];
        assert!(head.remaining_seconds <= head.duration_seconds);
    }
    assert!(
        room.state()
            .logs()
            .iter()
            .any(|entry| entry.message.starts_with("Segment completed: "))
    );
    Ok(())
}

#[test]
fn encoder_restart_is_idempotent_until_it_completes() -> TestResult<()> {
    let mut room = ControlRoom::seeded(7)?;
    room.dispatch(Command::RestartEncoder);
    room.dispatch(Command::RestartEncoder);

    let initiated = room
        .state()
        .logs()
        .iter()
        .filter(|entry| entry.message == "Encoder restart initiated.")
        .count();
    assert_eq!(initiated, 1);
    assert_eq!(room.state().streaming().status, StreamStatus::Restarting);

    let tasks = room.take_deferred();
    assert_eq!(tasks.len(), 1);
    for task in tasks {
        room.run_deferred(task.action);
    }
    assert!(!room.restart_in_progress());
    assert_ne!(room.state().streaming().status, StreamStatus::Restarting);

    room.dispatch(Command::RestartEncoder);
    assert!(room.restart_in_progress());
    Ok(())
}

#[test]
fn ducking_only_touches_music() -> TestResult<()> {
    let mut room = ControlRoom::seeded(8)?;
    room.dispatch(Command::ToggleDucking);
    for _ in 0..100 {
        room.generate_audio();
        for track in &room.state().audio().tracks {
            match track.kind {
                TrackKind::Music => assert!((24..=54).contains(&track.level)),
                _ => assert!((40..=90).contains(&track.level)),
            }
        }
    }
    Ok(())
}

#[test]
fn each_update_fires_one_notification_for_its_group() -> TestResult<()> {
    let mut room = ControlRoom::seeded(9)?;
    let seen = record_topics(&mut room);

    room.dispatch(Command::SetHumor(70));
    assert_eq!(count(&seen, Topic::Scripting), 1);
    assert_eq!(count(&seen, Topic::System), 0);

    room.dispatch(Command::ClearLogs);
    assert_eq!(count(&seen, Topic::Observability), 1);

    room.refresh_streaming();
    assert_eq!(count(&seen, Topic::Streaming), 1);
    assert_eq!(count(&seen, Topic::System), 1);

    room.dispatch(Command::ComponentAction {
        component: "Music Library".into(),
        action: "Reset".into(),
    });
    assert_eq!(count(&seen, Topic::System), 2);
    Ok(())
}

#[test]
fn applied_config_reads_back_unchanged() -> TestResult<()> {
    let mut room = ControlRoom::seeded(10)?;
    let config = ConfigState {
        system_name: "Harbour FM".into(),
        timezone: "America/Halifax".into(),
        retention_days: 7,
        auto_update: false,
        policy_mode: "Permissive".into(),
    };
    room.dispatch(Command::ApplyConfig(config.clone()));

    assert_eq!(room.state().config(), &config);
    let settings = room
        .state()
        .components()
        .details_of("System Settings")
        .ok_or("missing System Settings")?;
    assert_eq!(settings["Policy"], "Permissive");
    assert_eq!(settings["Retention"], "7 days");
    assert_eq!(settings["Timezone"], "America/Halifax");
    Ok(())
}

#[test]
fn logs_stay_bounded() -> TestResult<()> {
    let config = RadioConfig::parse("[simulation]\nseed = 11\nlog_capacity = 25\n")?;
    let mut room = ControlRoom::new(&config)?;
    room.boot();
    for i in 0..100 {
        room.component_action("Audit Trail", &format!("Check {}", i));
    }
    let logs = room.state().logs();
    assert_eq!(logs.len(), 25);
    assert_eq!(logs.back().ok_or("empty")?.message, "Check 99 triggered.");
    assert_eq!(logs.front().ok_or("empty")?.message, "Check 75 triggered.");
    Ok(())
}

#[test]
fn parsed_console_lines_drive_the_room() -> TestResult<()> {
    let mut room = ControlRoom::seeded(12)?;
    for line in ["duck", "fallback", "tone 80", "config retention 60"] {
        room.dispatch(Command::parse(line)?);
    }
    assert!(room.ducking());
    assert!(room.fallback());
    assert_eq!(room.state().scripting().tone, 80);
    assert_eq!(room.state().config().retention_days, 60);
    assert!(Command::parse("launch rockets").is_err());
    Ok(())
}

#[test]
fn same_seed_same_simulation() -> TestResult<()> {
    let a = ControlRoom::seeded(99)?;
    let b = ControlRoom::seeded(99)?;

    let feeds = |room: &ControlRoom| {
        room.state()
            .ingestion()
            .feeds
            .iter()
            .map(|f| (f.status, f.items))
            .collect::<Vec<_>>()
    };
    assert_eq!(feeds(&a), feeds(&b));
    assert_eq!(a.state().scripting().script, b.state().scripting().script);
    assert_eq!(a.state().audio().tracks, b.state().audio().tracks);
    Ok(())
}

#[test]
fn snapshot_serializes_to_json() -> TestResult<()> {
    let room = ControlRoom::seeded(13)?;
    let json = serde_json::to_value(room.state())?;
    for key in [
        "ingestion",
        "memory",
        "scheduler",
        "scripting",
        "audio",
        "streaming",
        "logs",
        "metrics",
        "config",
        "components",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert!(json.get("bus").is_none());
    Ok(())
}
