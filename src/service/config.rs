// Service client configuration

/// Default backend address the service listens on
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Execution service client configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the execution service
    pub endpoint: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum retry attempts for idempotent requests
    pub max_retries: u32,
    /// Base retry delay in milliseconds
    pub base_retry_delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            max_retries: 2,
            base_retry_delay_ms: 500,
        }
    }
}

impl ServiceConfig {
    /// Build a full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Reject endpoints reqwest cannot talk to
    pub fn validate(&self) -> Result<(), String> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(format!(
                "endpoint must start with http:// or https://, got '{}'",
                self.endpoint
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("request timeout must be at least 1 second".into());
        }
        Ok(())
    }
}
