// Error types for Service module

use thiserror::Error;

/// Runtime errors from the execution service client
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Exhausted: max retries ({retries}) exceeded, last error: {last_error}")]
    Exhausted { retries: u32, last_error: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Initialization errors for the service client
#[derive(Debug, Error)]
pub enum ServiceInitError {
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientError(#[from] reqwest::Error),
}
