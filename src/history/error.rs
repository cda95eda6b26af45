// History errors

use thiserror::Error;

/// History errors
#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum HistoryError {
    #[error("Failed to load history: {0}")]
    LoadFailed(String),

    #[error("Failed to store history: {0}")]
    StoreFailed(String),

    #[error("Failed to clear history: {0}")]
    ClearFailed(String),
}
