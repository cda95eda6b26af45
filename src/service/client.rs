// Service client - HTTP communication with the execution backend

use super::{
    ExecutionRequest, ExecutionResult, ExecutionStats, ServiceConfig, ServiceError,
    ServiceInitError, EXECUTE_PATH, HEALTH_PATH, LANGUAGES_PATH, STATS_PATH, VISIT_PATH,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Anything that can compile and run a Java program for a session
#[async_trait]
pub trait CodeRunner: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ServiceError>;
}

/// Client for the remote execution service
#[derive(Clone)]
pub struct ServiceClient {
    config: ServiceConfig,
    client: Client,
}

impl ServiceClient {
    /// Create a new client
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceInitError> {
        config.validate().map_err(ServiceInitError::ConfigInvalid)?;

        info!(
            endpoint = %config.endpoint,
            timeout_secs = config.request_timeout_secs,
            max_retries = config.max_retries,
            "initializing service client"
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("javacoder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServiceInitError::ClientError)?;

        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Submit source code for compilation and execution.
    ///
    /// Sent exactly once: running a program is not idempotent.
    pub async fn execute_java(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ServiceError> {
        let url = self.config.url(EXECUTE_PATH);
        info!(
            class_name = %request.class_name,
            source_bytes = request.source_code.len(),
            input_bytes = request.input.len(),
            "submitting code"
        );

        let start = Instant::now();
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "execution response received"
        );

        // Failures are reported in the same JSON shape with a 4xx/5xx status
        match serde_json::from_str::<ExecutionResult>(&body) {
            Ok(result) => {
                info!(
                    success = result.success,
                    execution_time_ms = result.execution_time.unwrap_or(0),
                    status = status.as_u16(),
                    "execution finished"
                );
                Ok(result)
            }
            Err(e) => {
                error!(status = status.as_u16(), error = %e, "undecodable execution response");
                Err(ServiceError::UnexpectedResponse {
                    status: status.as_u16(),
                    body: preview(&body),
                })
            }
        }
    }

    /// Tell the service someone opened the client. Never fails the caller.
    pub fn record_visit(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let url = self.config.url(VISIT_PATH);

        tokio::spawn(async move {
            match client.post(&url).send().await {
                Ok(response) => debug!(status = response.status().as_u16(), "visit recorded"),
                Err(e) => debug!(error = %e, "visit ping failed"),
            }
        })
    }

    /// Liveness check text
    pub async fn health(&self) -> Result<String, ServiceError> {
        self.get_with_retry(HEALTH_PATH).await
    }

    /// Languages the backend can execute
    pub async fn languages(&self) -> Result<Vec<String>, ServiceError> {
        self.get_json(LANGUAGES_PATH).await
    }

    /// Aggregate execution counters
    pub async fn stats(&self) -> Result<ExecutionStats, ServiceError> {
        self.get_json(STATS_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let body = self.get_with_retry(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_with_retry(&self, path: &str) -> Result<String, ServiceError> {
        let start = Instant::now();
        let mut retries = 0;
        let max_retries = self.config.max_retries;

        loop {
            debug!(path = %path, retry = retries, "sending GET");
            match self.get_once(path).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    retries += 1;
                    if retries > max_retries {
                        error!(
                            path = %path,
                            retries = retries,
                            total_latency_ms = start.elapsed().as_millis() as u64,
                            error = %e,
                            "request failed: exhausted retries"
                        );
                        return Err(ServiceError::Exhausted {
                            retries,
                            last_error: e.to_string(),
                        });
                    }

                    let delay = retry_delay(self.config.base_retry_delay_ms, retries);

                    warn!(
                        path = %path,
                        retry = retries,
                        max_retries = max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "request failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn get_once(&self, path: &str) -> Result<String, ServiceError> {
        let response = self.client.get(self.config.url(path)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ServiceError::UnexpectedResponse {
                status: status.as_u16(),
                body: preview(&body),
            })
        }
    }
}

#[async_trait]
impl CodeRunner for ServiceClient {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ServiceError> {
        self.execute_java(request).await
    }
}

/// Longest pause between retries
const MAX_RETRY_DELAY_MS: u64 = 30_000;

/// Exponential backoff: `base_ms * 2^(retry - 1)`, capped at 30 s
fn retry_delay(base_ms: u64, retry: u32) -> Duration {
    let multiplier = 2u64.saturating_pow(retry.saturating_sub(1));
    Duration::from_millis(base_ms.saturating_mul(multiplier).min(MAX_RETRY_DELAY_MS))
}

/// Trim a response body for error messages
fn preview(body: &str) -> String {
    if body.chars().count() > 200 {
        format!("{}...", body.chars().take(200).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles() {
        assert_eq!(retry_delay(100, 1), Duration::from_millis(100));
        assert_eq!(retry_delay(100, 2), Duration::from_millis(200));
        assert_eq!(retry_delay(100, 4), Duration::from_millis(800));
    }

    #[test]
    fn test_retry_delay_saturates_at_cap() {
        assert_eq!(retry_delay(2, 70), Duration::from_millis(MAX_RETRY_DELAY_MS));
        assert_eq!(retry_delay(u64::MAX, 2), Duration::from_millis(MAX_RETRY_DELAY_MS));
        assert_eq!(retry_delay(500, u32::MAX), Duration::from_millis(MAX_RETRY_DELAY_MS));
    }
}
