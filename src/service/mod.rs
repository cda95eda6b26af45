// Service module - HTTP client for the remote Java execution service

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{CodeRunner, ServiceClient};
pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceInitError};
pub use types::{ExecutionRequest, ExecutionResult, ExecutionStats};

/// Compile-and-run endpoint
pub const EXECUTE_PATH: &str = "/api/code/execute/java";
/// Visit counter endpoint
pub const VISIT_PATH: &str = "/api/visit";
/// Liveness check
pub const HEALTH_PATH: &str = "/api/code/health";
/// Supported languages list
pub const LANGUAGES_PATH: &str = "/api/code/languages";
/// Aggregate execution statistics
pub const STATS_PATH: &str = "/api/code/stats";
