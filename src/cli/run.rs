use anyhow::Result;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use ai_radio_control::core::backend::{Command, ControlRoom};
use ai_radio_control::core::config::RadioConfig;
use ai_radio_control::core::lifecycle::{LifecycleManager, RadioHandle};
use ai_radio_control::core::state::{AppState, StreamStatus, Topic};
use ai_radio_control::core::terminal::{self, GuideSection};
use ai_radio_control::logging::{self, LogTarget};

use super::RunArgs;

const DEFAULT_LOG_TAIL: usize = 10;

fn print_console_help() {
    GuideSection::new("Operator Console")
        .command("status", "Show the station dashboard")
        .command("logs [n] [component]", "Show the last n log entries, optionally for one component")
        .command("refresh <subsystem>", "ingestion, memory, streaming, metrics or all")
        .command("pause", "Pause the scheduler")
        .command("resume", "Resume the scheduler")
        .command("skip", "Skip the segment on air")
        .command("script", "Regenerate the script")
        .command("humor <0-100>", "Set scripting humor")
        .command("tone <0-100>", "Set scripting tone")
        .command("duck", "Toggle music ducking")
        .command("fallback", "Toggle audio fallback")
        .command("restart-encoder", "Restart the stream encoder")
        .command("clear-logs", "Empty the log store")
        .command("config <field> <value>", "name, timezone, retention, auto-update, policy")
        .command("action <component>: <action>", "Trigger an action on any component")
        .command("quit", "Take the station off air")
        .print();
}

pub async fn run_station(args: RunArgs) -> Result<()> {
    let mut config = RadioConfig::read(&args.common.config).await?;
    if let Some(seed) = args.common.seed {
        config = config.with_seed(seed);
    }
    let level = log_level(args.common.log_level.as_deref(), &config);
    logging::init(&level, LogTarget::Stdout)?;
    info!("{}", config.summary());

    info!(
        "Starting {} (seed: {:?}, log capacity: {})",
        config.station.system_name, config.simulation.seed, config.simulation.log_capacity
    );

    let handle = RadioHandle::new(ControlRoom::new(&config)?);
    handle
        .with_room(|room| {
            room.subscribe(
                Topic::Streaming,
                Box::new(|state: &AppState| {
                    if state.streaming().status == StreamStatus::Offline {
                        terminal::print_warn("Stream went offline.");
                    }
                }),
            )
        })
        .await;

    let mut lifecycle = LifecycleManager::new().await?;
    lifecycle.attach(handle.shared());
    lifecycle.attach_generators(&handle, &config.timers).await?;
    lifecycle.start().await?;

    terminal::print_banner();
    terminal::print_success(&format!("{} is on air.", config.station.system_name));
    print_console_help();

    let deadline = async {
        match args.duration_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = &mut deadline => {
                info!("Run duration elapsed.");
                break;
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => {
                    if !handle_line(&handle, &line).await {
                        break;
                    }
                }
                // With a fixed duration the station stays on air after input ends.
                None if args.duration_secs.is_some() => {
                    terminal::print_info("Input closed, staying on air until the run ends.");
                    stdin_open = false;
                }
                None => break,
            },
        }
    }

    lifecycle.shutdown().await?;
    terminal::print_goodbye();
    Ok(())
}

/// `--log-level` wins over `[logging] level`.
fn log_level(flag: Option<&str>, config: &RadioConfig) -> String {
    flag.map_or_else(|| config.logging.level.clone(), str::to_string)
}

/// Handle one console line. Returns `false` when the operator asked to quit.
async fn handle_line(handle: &RadioHandle, line: &str) -> bool {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    match word {
        "" => {}
        "quit" | "exit" => return false,
        "help" => print_console_help(),
        "status" => {
            handle
                .with_room(|room| terminal::print_dashboard(room.state()))
                .await
        }
        "logs" => {
            let (count, component) = parse_logs_args(rest);
            handle
                .with_room(|room| {
                    for entry in room.state().recent_logs(count, component) {
                        terminal::print_log_entry(entry);
                    }
                })
                .await
        }
        _ => match Command::parse(line) {
            Ok(command) => handle.with_room(|room| room.dispatch(command)).await,
            Err(e) => terminal::print_error(&e.to_string()),
        },
    }
    true
}

/// Split `logs` arguments into a count and an optional component name.
/// A leading number is the count; whatever follows names the component.
fn parse_logs_args(rest: &str) -> (usize, Option<&str>) {
    let rest = rest.trim();
    let (first, tail) = rest.split_once(' ').unwrap_or((rest, ""));
    let (count, component) = match first.parse::<usize>() {
        Ok(count) => (count, tail.trim()),
        Err(_) => (DEFAULT_LOG_TAIL, rest),
    };
    let component = (!component.is_empty()).then_some(component);
    (count, component)
}
