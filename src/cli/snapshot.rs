use anyhow::Result;

use ai_radio_control::core::backend::ControlRoom;
use ai_radio_control::core::config::RadioConfig;
use ai_radio_control::logging::{self, LogTarget};

use super::SnapshotArgs;

/// Boot a control room, optionally advance the scheduler, and print the
/// whole store as JSON. Logs go to stderr so stdout stays parseable.
pub async fn print_snapshot(args: SnapshotArgs) -> Result<()> {
    let level = args.common.log_level.clone().unwrap_or_else(|| "warn".to_string());
    logging::init(&level, LogTarget::Stderr)?;

    let mut config = RadioConfig::load(&args.common.config).await?;
    if let Some(seed) = args.common.seed {
        config = config.with_seed(seed);
    }

    let mut room = ControlRoom::new(&config)?;
    room.boot();
    for _ in 0..args.ticks {
        room.tick_scheduler();
    }

    println!("{}", serde_json::to_string_pretty(room.state())?);
    Ok(())
}
