// Wire types for the execution service - camelCase JSON on both directions

use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Upper bound on source code length accepted by the service
pub const MAX_SOURCE_CHARS: usize = 10_000;
/// Upper bound on class name length accepted by the service
pub const MAX_CLASS_NAME_CHARS: usize = 100;
/// Upper bound on stdin length accepted by the service
pub const MAX_INPUT_CHARS: usize = 1_000;

/// Body of `POST /api/code/execute/java`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub source_code: String,
    pub class_name: String,
    #[serde(default)]
    pub input: String,
}

impl ExecutionRequest {
    pub fn new(
        source_code: impl Into<String>,
        class_name: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            class_name: class_name.into(),
            input: input.into(),
        }
    }

    /// Check the limits the service enforces, so obviously bad requests
    /// never leave the machine.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.source_code.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "source code cannot be empty".into(),
            ));
        }
        if self.class_name.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "class name cannot be empty".into(),
            ));
        }

        let checks = [
            ("source code", &self.source_code, MAX_SOURCE_CHARS),
            ("class name", &self.class_name, MAX_CLASS_NAME_CHARS),
            ("input", &self.input, MAX_INPUT_CHARS),
        ];
        for (field, value, max) in checks {
            let len = value.chars().count();
            if len > max {
                return Err(ServiceError::InvalidRequest(format!(
                    "{} is {} characters, limit is {}",
                    field, len, max
                )));
            }
        }

        Ok(())
    }
}

/// Response of `POST /api/code/execute/java`.
///
/// `success` discriminates which of `output` / `error` is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub execution_time: Option<u64>,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[cfg(test)]
impl ExecutionResult {
    pub fn success(output: impl Into<String>, execution_time: u64) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            execution_time: Some(execution_time),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Aggregate counters from `GET /api/code/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful_executions: u64,
    #[serde(default)]
    pub failed_executions: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub average_execution_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_keys() {
        let req = ExecutionRequest::new("class A {}", "A", "");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["sourceCode"], "class A {}");
        assert_eq!(json["className"], "A");
        assert_eq!(json["input"], "");
    }

    #[test]
    fn test_result_tolerates_missing_and_null_fields() {
        let body = r#"{"success":false,"output":null,"error":"boom","executionTime":0}"#;
        let result: ExecutionResult = serde_json::from_str(body).unwrap();
        assert!(!result.success);
        assert_eq!(result.output, None);
        assert_eq!(result.error.as_deref(), Some("boom"));

        let minimal: ExecutionResult = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(minimal.success);
        assert_eq!(minimal.execution_time, None);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(ExecutionRequest::new("  ", "A", "").validate().is_err());
        assert!(ExecutionRequest::new("class A {}", "\n", "").validate().is_err());
        assert!(ExecutionRequest::new("class A {}", "A", "").validate().is_ok());
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        // 'ş' is two bytes in UTF-8
        let input = "ş".repeat(MAX_INPUT_CHARS);
        assert!(ExecutionRequest::new("class A {}", "A", input).validate().is_ok());

        let too_long = "x".repeat(MAX_INPUT_CHARS + 1);
        let err = ExecutionRequest::new("class A {}", "A", too_long)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("input"));
    }

    #[test]
    fn test_stats_decode() {
        let body = r#"{"totalExecutions":4,"successfulExecutions":3,"failedExecutions":1,"successRate":75.0,"averageExecutionTime":120.5}"#;
        let stats: ExecutionStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.total_executions, 4);
        assert_eq!(stats.success_rate, 75.0);
    }
}
