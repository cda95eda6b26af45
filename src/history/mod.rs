// History module - the last successful runs, mirrored to a JSON file

pub mod config;
pub mod error;
pub mod storage;

pub use config::HistoryConfig;
pub use storage::History;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub source_code: String,
    pub class_name: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub execution_time: u64,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Entry stamped with the current local time
    pub fn now(
        source_code: impl Into<String>,
        class_name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
        execution_time: u64,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            class_name: class_name.into(),
            input: input.into(),
            output: output.into(),
            execution_time,
            timestamp: Local::now(),
        }
    }

    /// First 100 characters of the source, for listings
    pub fn preview(&self) -> String {
        let head: String = self.source_code.chars().take(100).collect();
        format!("{}...", head)
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}ms",
            self.class_name,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.execution_time
        )
    }
}
