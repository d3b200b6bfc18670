// Fri Jan 23 2026 - Alex

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};
use std::io::Write;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Diagnostics go to stderr so they never mix with graph output on stdout.
    pub fn init_logger(level: LevelFilter) {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .target(env_logger::Target::Stderr)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} {}",
                    Self::format_level(record.level()),
                    format!("[{}]", record.target()).as_str().dimmed(),
                    record.args()
                )
            })
            .try_init();
    }

    fn format_level(level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    pub fn level_for(log_level: &str, quiet: bool) -> LevelFilter {
        let level = Self::level_from_str(log_level);
        if quiet {
            level.min(LevelFilter::Warn)
        } else {
            level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_quiet_caps_at_warn() {
        assert_eq!(LoggingUtils::level_for("debug", true), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_for("error", true), LevelFilter::Error);
        assert_eq!(LoggingUtils::level_for("info", false), LevelFilter::Info);
    }
}
