//! `/about` content - bot statistics and credits.

use crate::core::{embed::EmbedContent, help::BULLET};
use std::time::Duration;

/// Host resource usage, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemUsage {
    /// Global CPU usage
    pub cpu_percent: f32,
    /// Used share of physical memory
    pub memory_percent: f64,
}

/// Numbers shown in the BOT STATS and DEV STUFF fields.
#[derive(Debug, Clone, PartialEq)]
pub struct BotStats {
    /// Guilds in the cache
    pub guild_count: usize,
    /// Gateway heartbeat latency
    pub bot_latency: Duration,
    /// Round trip of the first reply
    pub api_latency: Duration,
    /// Time since startup
    pub uptime: Duration,
    /// Host usage, if it could be sampled
    pub system: Option<SystemUsage>,
}

/// Formats an integer with `,` thousands separators.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

fn format_millis(duration: Duration) -> String {
    format_count(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Uptime with sub-second precision dropped, e.g. `1day 2h 3m 4s`.
#[must_use]
pub fn format_uptime(uptime: Duration) -> String {
    humantime::format_duration(Duration::from_secs(uptime.as_secs())).to_string()
}

/// Samples CPU and memory usage of the host.
///
/// CPU usage needs two measurements, so this waits for sysinfo's minimum
/// update interval.
pub async fn sample_system_usage() -> SystemUsage {
    let mut system = sysinfo::System::new();
    system.refresh_cpu_usage();
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    system.refresh_cpu_usage();
    system.refresh_memory();

    let total = system.total_memory();
    #[allow(clippy::cast_precision_loss)] // Byte counts far below 2^52
    let memory_percent = if total == 0 {
        0.0
    } else {
        system.used_memory() as f64 / total as f64 * 100.0
    };

    SystemUsage {
        cpu_percent: system.global_cpu_usage(),
        memory_percent,
    }
}

/// Builds the "ABOUT NAVI" embed.
#[must_use]
pub fn about_embed(stats: &BotStats, color: u32) -> EmbedContent {
    let general = [
        format!("{BULLET} {} servers", format_count(stats.guild_count as u64)),
        format!("{BULLET} {} ms bot latency", format_millis(stats.bot_latency)),
        format!("{BULLET} {} ms API latency", format_millis(stats.api_latency)),
        format!("{BULLET} Online for {}", format_uptime(stats.uptime)),
    ]
    .join("\n");

    let mut dev_stuff = vec![
        format!("{BULLET} Language: Rust"),
        format!("{BULLET} Library: poise 0.6 (serenity)"),
        format!("{BULLET} Version: {}", env!("CARGO_PKG_VERSION")),
    ];
    if let Some(system) = stats.system {
        dev_stuff.push(format!("{BULLET} System CPU usage: {:.1}%", system.cpu_percent));
        dev_stuff.push(format!("{BULLET} System RAM usage: {:.1}%", system.memory_percent));
    }

    EmbedContent::new()
        .title("ABOUT NAVI")
        .color(color)
        .field("BOT STATS", general, false)
        .field("CREATOR", format!("{BULLET} Miriel#0001"), false)
        .field("SPECIAL THANKS TO", format!("{BULLET} Swiss cheese"), false)
        .field("DEV STUFF", dev_stuff.join("\n"), false)
}
