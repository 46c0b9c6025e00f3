use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_LEVEL_ENV: &str = "TICKTODO_LOG_LEVEL";
const DEFAULT_LEVEL: &str = "warn";

/// Install the file logger; the terminal belongs to the UI
///
/// The level comes from `TICKTODO_LOG_LEVEL`, then `configured`, then warn.
/// Lines are written by a background worker until the returned guard drops,
/// so hold it until the last log call.
pub fn init_logging(configured: &str) -> Result<WorkerGuard> {
    let log_dir = get_log_directory()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let log_file_path = get_log_file_path(&log_dir);
    let file = fs::File::create(&log_file_path)
        .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;

    let filter = build_log_filter(std::env::var(LOG_LEVEL_ENV).ok().as_deref(), configured);
    let (subscriber, guard) = file_subscriber(file, filter);
    subscriber.init();

    tracing::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(guard)
}

fn file_subscriber(file: fs::File, filter: EnvFilter) -> (impl tracing::Subscriber + Send + Sync, WorkerGuard) {
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    (tracing_subscriber::registry().with(filter).with(file_layer), guard)
}

fn build_log_filter(from_env: Option<&str>, configured: &str) -> EnvFilter {
    EnvFilter::new(resolve_level(from_env, configured))
}

fn resolve_level(from_env: Option<&str>, configured: &str) -> &'static str {
    from_env
        .and_then(normalize_log_level)
        .or_else(|| normalize_log_level(configured))
        .unwrap_or(DEFAULT_LEVEL)
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

pub fn get_log_directory() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().context("Failed to determine local data directory")?;
    Ok(data_dir.join("ticktodo").join("logs"))
}

pub fn get_log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    log_dir.join(format!("ticktodo-{}.log", timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_file_path() {
        let dir = PathBuf::from("/tmp/test-logs");
        let path = get_log_file_path(&dir);
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("ticktodo-"));
        assert!(path_str.ends_with(".log"));
    }

    #[test]
    fn test_normalize_log_level() {
        assert_eq!(normalize_log_level("TRACE"), Some("trace"));
        assert_eq!(normalize_log_level("warning"), Some("warn"));
        assert_eq!(normalize_log_level("nope"), None);
    }

    #[test]
    fn test_dropping_guard_flushes_pending_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticktodo.log");
        let file = fs::File::create(&path).unwrap();

        let (subscriber, guard) = file_subscriber(file, EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(tasks = 3, "shut down");
            tracing::debug!("filtered out");
        });
        drop(guard);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("shut down"));
        assert!(contents.contains("tasks=3"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_env_level_overrides_config() {
        assert_eq!(resolve_level(Some("debug"), "error"), "debug");
        assert_eq!(resolve_level(Some("bogus"), "error"), "error");
        assert_eq!(resolve_level(None, ""), "warn");
    }
}
