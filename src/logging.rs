use anyhow::{Result, anyhow};
use std::io::Write;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Where formatted tracing output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Keeps stdout clean for machine-readable output.
    Stderr,
    Silent,
}

#[derive(Clone)]
pub struct ConsoleMakeWriter {
    pub target: LogTarget,
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            target: self.target,
        }
    }
}

pub struct ConsoleWriter {
    target: LogTarget,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.target {
            LogTarget::Stdout => std::io::stdout().write_all(buf)?,
            LogTarget::Stderr => std::io::stderr().write_all(buf)?,
            LogTarget::Silent => {}
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.target {
            LogTarget::Stdout => std::io::stdout().flush(),
            LogTarget::Stderr => std::io::stderr().flush(),
            LogTarget::Silent => Ok(()),
        }
    }
}

pub fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| anyhow!("unknown log level '{}'", level))
}

/// Install the global subscriber. A second call is ignored.
pub fn init(level: &str, target: LogTarget) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level)?)
        .with_writer(ConsoleMakeWriter { target })
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    Ok(())
}
