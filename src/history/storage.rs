// History storage and operations

use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;

use super::config::HistoryConfig;
use super::error::HistoryError;
use super::HistoryEntry;
use tracing::{debug, info};

/// Newest-first list of successful runs, capped at `config.capacity`
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    config: HistoryConfig,
}

impl History {
    /// Empty history that will persist to `config.path`
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            config,
        }
    }

    /// Load history from disk
    pub fn load(config: HistoryConfig) -> Result<Self, HistoryError> {
        if !config.path.exists() {
            info!(path = %config.path.display(), "history file not found, starting empty");
            return Ok(Self::new(config));
        }

        let content = fs::read_to_string(&config.path)
            .map_err(|e| HistoryError::LoadFailed(e.to_string()))?;

        let mut entries: VecDeque<HistoryEntry> =
            serde_json::from_str(&content).map_err(|e| HistoryError::LoadFailed(e.to_string()))?;

        entries.truncate(config.capacity);
        info!(count = entries.len(), "loaded history entries");

        Ok(Self { entries, config })
    }

    /// Prepend a run and persist. Memory only changes once the write succeeded.
    pub fn record(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        debug!(class_name = %entry.class_name, "recording run");

        let mut updated = self.entries.clone();
        updated.push_front(entry);
        updated.truncate(self.config.capacity);

        self.persist(&updated)?;
        self.entries = updated;
        Ok(())
    }

    /// Delete the file, then drop every entry
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.config.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(HistoryError::ClearFailed(e.to_string())),
        }

        self.entries.clear();

        info!(path = %self.config.path.display(), "history cleared");
        Ok(())
    }

    /// Persist entries to disk
    fn persist(&self, entries: &VecDeque<HistoryEntry>) -> Result<(), HistoryError> {
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| HistoryError::StoreFailed(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| HistoryError::StoreFailed(e.to_string()))?;

        fs::write(&self.config.path, content)
            .map_err(|e| HistoryError::StoreFailed(e.to_string()))?;

        debug!(count = entries.len(), "persisted history");

        Ok(())
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entry by position, 0 being the most recent
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
