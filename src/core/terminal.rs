use console::{Emoji, style};

use crate::core::state::{AppState, AudioSnapshot, LogEntry, Severity};

pub static SUCCESS_ICON: Emoji<'_, '_> = Emoji("✅ ", "");
pub static INFO_ICON: Emoji<'_, '_> = Emoji("ℹ️  ", "");
pub static WARN_ICON: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub static ERROR_ICON: Emoji<'_, '_> = Emoji("❌ ", "");
pub static RADIO: Emoji<'_, '_> = Emoji("📻 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

pub fn print_success(msg: &str) {
    println!("{} {}", SUCCESS_ICON, style(msg).green());
}

pub fn print_info(msg: &str) {
    println!("{} {}", INFO_ICON, style(msg).blue());
}

pub fn print_warn(msg: &str) {
    println!("{} {}", WARN_ICON, style(msg).yellow());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", ERROR_ICON, style(msg).red().bold());
}

pub fn print_status(label: &str, msg: &str) {
    println!("  {} {}: {}", GEAR, style(label).bold().cyan(), msg);
}

pub fn print_banner() {
    println!();
    println!(
        "{} {}",
        RADIO,
        style("AI News Radio :: Control Room").bold().cyan()
    );
    println!("{}\n", style("Synthetic newsroom, always on air.").dim());
}

pub fn print_goodbye() {
    println!("\n{} {}", SPARKLE, style("Off air. Goodbye!").bold().cyan());
}

/// A titled block of `command  description` rows for help output.
pub struct GuideSection {
    title: String,
    rows: Vec<(String, String)>,
}

impl GuideSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn command(mut self, name: &str, description: &str) -> Self {
        self.rows.push((name.to_string(), description.to_string()));
        self
    }

    pub fn render(&self) -> String {
        let width = self.rows.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        let mut out = format!(" {}\n", style(&self.title).bold().underlined());
        for (name, description) in &self.rows {
            let padded = format!("{:<width$}", name, width = width);
            out.push_str(&format!("   {}  {}\n", style(padded).green(), description));
        }
        out
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

/// Echo a kernel log entry with a severity-coloured tag.
pub fn print_log_entry(entry: &LogEntry) {
    let tag = match entry.severity {
        Severity::Debug => style(entry.severity.as_str()).dim(),
        Severity::Info => style(entry.severity.as_str()).blue(),
        Severity::Warn => style(entry.severity.as_str()).yellow(),
        Severity::Error => style(entry.severity.as_str()).red().bold(),
    };
    println!(
        "  {} {} {}: {}",
        style(&entry.timestamp).dim(),
        style(format!("[{}]", entry.component)).cyan(),
        tag,
        entry.message
    );
}

/// One-screen overview of the station: the on-air segment, stream health
/// and every component in the registry.
pub fn print_dashboard(state: &AppState) {
    println!("\n{} {}", RADIO, style(&state.config().system_name).bold());

    let scheduler = state.scheduler();
    match scheduler.rundown.first() {
        Some(segment) => print_status(
            "On Air",
            &format!(
                "{} ({}s left of {}s){}",
                segment.title,
                segment.remaining_seconds,
                segment.duration_seconds,
                if scheduler.paused { " [paused]" } else { "" }
            ),
        ),
        None => print_status("On Air", "nothing scheduled"),
    }

    let stream = state.streaming();
    print_status(
        "Stream",
        &format!(
            "{} | {} kbps | {} listeners",
            stream.status.as_str(),
            stream.bitrate_kbps,
            stream.listeners
        ),
    );
    print_status("Ingestion", state.ingestion().status.as_str());
    print_status("Memory", state.memory().status.as_str());
    print_status("Mix", &mix_line(state.audio()));

    let components = state.components();
    let mut keys: Vec<&str> = components.keys().collect();
    keys.sort_unstable();
    let width = keys.iter().map(|k| k.len()).max().unwrap_or(0);
    println!();
    for key in keys {
        let status = components.status_of(key).unwrap_or("Unknown");
        let styled = match status {
            "Healthy" | "Active" | "Live" | "Running" | "Stable" => style(status).green(),
            "Warning" | "Paused" | "Monitoring" | "Fallback" | "Restarting" => {
                style(status).yellow()
            }
            _ => style(status).red(),
        };
        println!("   {:<width$}  {}", key, styled, width = width);
    }
    println!();
}

/// Track levels with their kinds, plus the ducking and fallback flags.
pub fn mix_line(audio: &AudioSnapshot) -> String {
    let mut parts: Vec<String> = audio
        .tracks
        .iter()
        .map(|t| format!("{} [{}] {}", t.name, t.kind.as_str(), t.level))
        .collect();
    if audio.ducking {
        parts.push("ducking".to_string());
    }
    if audio.fallback {
        parts.push("fallback".to_string());
    }
    if parts.is_empty() {
        return "no tracks".to_string();
    }
    parts.join(" | ")
}
