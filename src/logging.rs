//! Console logging.
//!
//! Lines look like `[2026-01-01 12:00:00] [orchestrator.runner.cron:info] - Starting cron`.
//! The namespace is the log target; services log through a [`ServiceLogger`]
//! whose target is derived from the service name.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use colored::*;
use eyre::{Context, Result};
use log::{Level, LevelFilter};

/// Namespace used by the orchestrator itself
pub const ORCHESTRATOR_NAMESPACE: &str = "orchestrator";

/// Prefix of per-service namespaces
pub const RUNNER_NAMESPACE: &str = "orchestrator.runner";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pick the log level: verbose wins, then the configured level, then info.
pub fn resolve_level(configured: Option<&str>, verbose: bool) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    configured
        .and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install env_logger writing formatted lines to stdout.
///
/// Call this before anything logs; [`set_level`] adjusts the level later.
/// `RUST_LOG`, when set, overrides `level`.
pub fn init(level: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Trace);
        }
    }

    builder
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
            let line = format_line(&timestamp, record.target(), record.level(), &record.args().to_string());
            writeln!(buf, "{}", line)
        })
        .try_init()
        .context("Failed to initialize logger")?;

    set_level(level);
    Ok(())
}

/// Change the active level. No-op when `RUST_LOG` is set.
pub fn set_level(level: LevelFilter) {
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level);
    }
}

/// Render one console line.
pub fn format_line(timestamp: &str, namespace: &str, level: Level, message: &str) -> String {
    let level_name = level.as_str().to_lowercase();
    format!(
        "[{}] [{}:{}] - {}",
        timestamp.dimmed(),
        namespace,
        level_name,
        colorize(message, level)
    )
}

fn colorize(message: &str, level: Level) -> ColoredString {
    match level {
        Level::Error => message.red(),
        Level::Warn => message.yellow(),
        Level::Info => message.cyan(),
        Level::Debug | Level::Trace => message.dimmed(),
    }
}

/// Logging handle scoped to one service.
#[derive(Debug, Clone)]
pub struct ServiceLogger {
    target: String,
}

impl ServiceLogger {
    pub fn for_service(name: &str) -> Self {
        Self {
            target: format!("{}.{}", RUNNER_NAMESPACE, name),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn info(&self, message: impl Display) {
        log::info!(target: self.target.as_str(), "{}", message);
    }

    pub fn error(&self, message: impl Display) {
        log::error!(target: self.target.as_str(), "{}", message);
    }

    pub fn debug(&self, message: impl Display) {
        log::debug!(target: self.target.as_str(), "{}", message);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level_defaults_to_info() {
        assert_eq!(resolve_level(None, false), LevelFilter::Info);
        assert_eq!(resolve_level(Some("bogus"), false), LevelFilter::Info);
    }

    #[test]
    fn test_resolve_level_from_config() {
        assert_eq!(resolve_level(Some("warn"), false), LevelFilter::Warn);
        assert_eq!(resolve_level(Some(" ERROR "), false), LevelFilter::Error);
    }

    #[test]
    fn test_verbose_overrides_config() {
        assert_eq!(resolve_level(Some("error"), true), LevelFilter::Debug);
    }

    #[test]
    fn test_format_line_layout() {
        colored::control::set_override(false);
        let line = format_line("2026-01-01 12:00:00", "orchestrator.runner.cron", Level::Info, "Starting cron");
        assert_eq!(
            line,
            "[2026-01-01 12:00:00] [orchestrator.runner.cron:info] - Starting cron"
        );
    }

    #[test]
    fn test_format_line_error_level() {
        colored::control::set_override(false);
        let line = format_line("ts", ORCHESTRATOR_NAMESPACE, Level::Error, "boom");
        assert!(line.contains("[orchestrator:error]"));
        assert!(line.ends_with("- boom"));
    }

    #[test]
    fn test_service_logger_levels_use_service_target() {
        capture::install();
        let logger = ServiceLogger::for_service("levels-svc");
        logger.info("hello");
        logger.debug("details");
        logger.error("broken");

        let records = capture::matching(|r| r.target == "orchestrator.runner.levels-svc");
        let levels: Vec<Level> = records.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![Level::Info, Level::Debug, Level::Error]);
        assert_eq!(records[2].message, "broken");
    }

    #[test]
    fn test_service_logger_target() {
        let logger = ServiceLogger::for_service("nextjs");
        assert_eq!(logger.target(), "orchestrator.runner.nextjs");
    }
}
