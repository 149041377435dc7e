use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_ENV: &str = "GHOST_TAB_LOG_FILE";
pub const LOG_FILTER_ENV: &str = "GHOST_TAB_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum InitLoggingError {
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where log events go, read from the environment. Logging stays off when no
/// file is named: stdout carries the result and the terminal the UI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var_os(LOG_FILE_ENV).map(PathBuf::from),
            std::env::var(LOG_FILTER_ENV).ok(),
        )
    }

    fn from_vars(file: Option<PathBuf>, filter: Option<String>) -> Self {
        let file = file.filter(|path| !path.as_os_str().is_empty());
        let filter = filter
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self { file, filter }
    }
}

pub fn init_logging(config: &LogConfig) -> Result<(), InitLoggingError> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed when called twice; keep the first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File, InitLoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| InitLoggingError::OpenFile {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_is_off_without_a_file() {
        let config = LogConfig::from_vars(None, Some("debug".to_string()));
        assert_eq!(config.file, None);
        assert_eq!(config.filter, "debug");
        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = LogConfig::from_vars(Some(PathBuf::new()), Some("  ".to_string()));
        assert_eq!(config.file, None);
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn log_file_is_created_in_append_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost-tab.log");
        std::fs::write(&path, "earlier run\n").unwrap();
        drop(open_log_file(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier run\n");
    }

    #[test]
    fn unwritable_log_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let error = open_log_file(&dir.path().join("missing").join("log")).unwrap_err();
        assert!(error.to_string().starts_with("failed to open log file"));
    }
}
