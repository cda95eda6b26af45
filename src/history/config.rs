// History configuration

use std::path::PathBuf;

/// Number of runs kept on disk
pub const DEFAULT_CAPACITY: usize = 10;

/// History configuration
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// JSON file holding the run list
    pub path: PathBuf,
    /// Maximum number of entries kept
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: dirs::home_dir()
                .map(|p| p.join(".javacoder").join("history.json"))
                .unwrap_or_else(|| PathBuf::from(".javacoder/history.json")),
            capacity: DEFAULT_CAPACITY,
        }
    }
}
