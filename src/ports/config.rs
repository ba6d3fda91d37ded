use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Where the client keeps its settings between runs.
///
/// `load` never leaves the caller without a file: a missing file is created
/// with defaults. Paths are reported so the hosting layer can show them.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<AppConfig, DomainError>;

    /// Replace the stored settings. The write is complete when this returns.
    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    fn config_path(&self) -> PathBuf;

    /// Directory holding the config file and the logs directory.
    fn data_dir(&self) -> PathBuf;

    fn logs_dir(&self) -> PathBuf;
}
