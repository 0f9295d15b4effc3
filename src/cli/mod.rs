mod run;
mod snapshot;

use anyhow::{Context, Result, bail};
use console::style;
use std::path::PathBuf;

use ai_radio_control::core::config::DEFAULT_CONFIG_FILE;
use ai_radio_control::core::terminal::{self, GuideSection};

fn print_help() {
    terminal::print_banner();

    GuideSection::new("Commands")
        .command("run", "Put the station on air and accept operator commands")
        .command("snapshot", "Print the dashboard state as JSON")
        .command("help", "Show this help")
        .print();

    GuideSection::new("Options")
        .command("--config <path>", "Config file (default: radio.toml)")
        .command("--seed <n>", "Fixed random seed for a reproducible run")
        .command("--log-level <level>", "trace, debug, info, warn or error")
        .command("--duration <secs>", "run: stop after this many seconds")
        .command("--ticks <n>", "snapshot: advance the scheduler n ticks first")
        .print();

    println!(
        " {} {} <command> [options]\n",
        style("Usage:").bold(),
        style("ai-radio").green()
    );
}

/// Options shared by every command that builds a control room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommonArgs {
    pub config: PathBuf,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            seed: None,
            log_level: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct RunArgs {
    pub common: CommonArgs,
    pub duration_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SnapshotArgs {
    pub common: CommonArgs,
    pub ticks: u32,
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value", flag))
}

/// Consume a shared flag at `args[i]`. Returns how many arguments were used,
/// or `None` when the flag is not a shared one.
fn parse_common_flag(args: &[String], i: usize, common: &mut CommonArgs) -> Result<Option<usize>> {
    match args[i].as_str() {
        "--config" | "-c" => {
            common.config = PathBuf::from(flag_value(args, i, "--config")?);
            Ok(Some(2))
        }
        "--seed" => {
            let raw = flag_value(args, i, "--seed")?;
            common.seed = Some(raw.parse().with_context(|| format!("invalid seed '{}'", raw))?);
            Ok(Some(2))
        }
        "--log-level" => {
            common.log_level = Some(flag_value(args, i, "--log-level")?.to_string());
            Ok(Some(2))
        }
        _ => Ok(None),
    }
}

pub(crate) fn parse_run_args(args: &[String], start: usize) -> Result<RunArgs> {
    let mut parsed = RunArgs::default();
    let mut i = start;
    while i < args.len() {
        if let Some(used) = parse_common_flag(args, i, &mut parsed.common)? {
            i += used;
            continue;
        }
        match args[i].as_str() {
            "--duration" | "-d" => {
                let raw = flag_value(args, i, "--duration")?;
                parsed.duration_secs = Some(
                    raw.parse()
                        .with_context(|| format!("invalid duration '{}'", raw))?,
                );
                i += 2;
            }
            other => bail!("unknown option for run: {}", other),
        }
    }
    Ok(parsed)
}

pub(crate) fn parse_snapshot_args(args: &[String], start: usize) -> Result<SnapshotArgs> {
    let mut parsed = SnapshotArgs::default();
    let mut i = start;
    while i < args.len() {
        if let Some(used) = parse_common_flag(args, i, &mut parsed.common)? {
            i += used;
            continue;
        }
        match args[i].as_str() {
            "--ticks" | "-t" => {
                let raw = flag_value(args, i, "--ticks")?;
                parsed.ticks = raw
                    .parse()
                    .with_context(|| format!("invalid tick count '{}'", raw))?;
                i += 2;
            }
            other => bail!("unknown option for snapshot: {}", other),
        }
    }
    Ok(parsed)
}

pub async fn run_main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let cmd = args.get(1).map(String::as_str).unwrap_or("help");
    match cmd {
        "run" => run::run_station(parse_run_args(&args, 2)?).await,
        "snapshot" => snapshot::print_snapshot(parse_snapshot_args(&args, 2)?).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => {
            print_help();
            bail!("unknown command '{}'", other)
        }
    }
}
