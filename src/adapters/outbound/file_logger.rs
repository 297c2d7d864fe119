use crate::domains::logger::{DomainLogger, FileLogger};
use std::str::FromStr;
use std::sync::Arc;

/// Initialize the fast_log file sink and return the timestamped file logger.
/// Unknown `level` names fall back to `info`. Fails if another `log` backend
/// is already installed in this process.
pub fn init_file_logger(path: &str, level: &str) -> Result<Arc<dyn DomainLogger>, String> {
    let level = log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info);
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
