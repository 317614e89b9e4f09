// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use senscodec::SensorData;
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the log subscriber; `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Format a duration in microseconds to human-readable string.
pub fn format_duration(micros: u64) -> String {
    let secs = micros / 1_000_000;
    let millis = (micros % 1_000_000) / 1_000;

    if secs >= 3600 {
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    } else if secs >= 60 {
        let minutes = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}m {}s", minutes, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}s", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

/// Format a capture timestamp in microseconds.
///
/// Capture devices either stamp frames with wall-clock time or with time since
/// the device started; the latter is shown as an offset.
pub fn format_timestamp(micros: u64) -> String {
    // Anything before 2001 is treated as a device-relative clock
    const WALL_CLOCK_MIN_SECS: u64 = 978_307_200;

    let secs = micros / 1_000_000;
    if secs < WALL_CLOCK_MIN_SECS {
        return format!("+{}", format_duration(micros));
    }

    let datetime = chrono::DateTime::<chrono::Utc>::from_timestamp(
        secs as i64,
        ((micros % 1_000_000) * 1_000) as u32,
    );
    match datetime {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("{} us", micros),
    }
}

/// Format a byte count.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Progress bar wrapper for consistent progress reporting.
pub struct ProgressBar {
    inner: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar; hidden unless stderr is a terminal.
    pub fn new(total: u64, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let inner = if std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new(total);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb.set_prefix(prefix);
            Some(pb)
        } else {
            None
        };

        Self { inner }
    }

    /// Advance by one step, showing `msg`.
    pub fn inc(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.inner {
            pb.set_message(msg.into());
            pb.inc(1);
        }
    }

    /// Finish the progress bar with a message.
    pub fn finish_with_message(&self, msg: String) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg);
        }
    }
}

/// Open and decode a capture, naming the file on failure.
pub fn open_sens(path: &Path) -> Result<SensorData> {
    SensorData::open(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(500_000), "500ms");
        assert_eq!(format_duration(1_500_000), "1.500s");
        assert_eq!(format_duration(90_000_000), "1m 30s");
        assert_eq!(format_duration(3_600_000_000), "1h 0m");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(33_366), "+33ms");
        assert_eq!(
            format_timestamp(1_234_567_890_250_000),
            "2009-02-13 23:31:30.250 UTC"
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
