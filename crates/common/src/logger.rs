use crate::config::AppConfig;
use crate::error::MeetbriefError;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log file name inside the configured log directory
pub const LOG_FILE_NAME: &str = "meetbrief.log";

/// Initialize logging for the long-running server
///
/// Logs go to stderr and to `{log_dir}/meetbrief.log`.
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(config: &AppConfig) -> Result<(), MeetbriefError> {
    config.ensure_directories()?;

    let log_file_path = config.get_log_path(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            MeetbriefError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter(&config.log_level));

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter(&config.log_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| MeetbriefError::config(format!("Failed to install logger: {}", e)))?;

    tracing::info!(
        "Logging initialized: level={}, log_file={}",
        config.log_level,
        log_file_path.display()
    );

    Ok(())
}

/// Console-only logging for one-shot CLI commands
///
/// Writes to stderr so stdout carries nothing but the summary.
pub fn setup_console_logging(log_level: &str) -> Result<(), MeetbriefError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter(log_level))
        .try_init()
        .map_err(|e| MeetbriefError::config(format!("Failed to install logger: {}", e)))?;

    Ok(())
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_log_level(log_level).to_string().to_lowercase()))
}

/// Parse string to tracing Level, falling back to INFO
pub fn parse_log_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
        assert_eq!(parse_log_level(" WARNING "), Level::WARN);
        assert_eq!(parse_log_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_log_file_lives_in_log_dir() {
        let mut config = AppConfig::default();
        config.log_dir = std::path::PathBuf::from("/var/log/meetbrief");
        assert_eq!(
            config.get_log_path(LOG_FILE_NAME),
            std::path::PathBuf::from("/var/log/meetbrief/meetbrief.log")
        );
    }
}
