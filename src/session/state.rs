// Session state - form fields plus the result of the last submit

use super::{format::to_string_literal, OutputFormat};
use crate::history::{History, HistoryEntry};
use crate::service::{CodeRunner, ExecutionRequest, ServiceError};
use crate::templates::{Template, DEFAULT_CLASS_NAME, DEFAULT_SOURCE};
use std::fmt::Write as _;
use tracing::{info, warn};

/// How a submit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Program compiled and ran; recorded in history
    Succeeded { execution_time: u64 },
    /// Service answered with `success: false`
    Failed,
    /// Service could not be reached or answered garbage
    ConnectionError,
    /// Request rejected locally before sending
    Rejected,
}

/// Editable form and transient result state
#[derive(Debug, Clone)]
pub struct Session {
    pub source_code: String,
    pub class_name: String,
    pub input: String,
    pub output_format: OutputFormat,
    output: String,
    error: String,
    execution_time: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh form holding the Hello World program
    pub fn new() -> Self {
        Self {
            source_code: DEFAULT_SOURCE.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            input: String::new(),
            output_format: OutputFormat::default(),
            output: String::new(),
            error: String::new(),
            execution_time: 0,
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn execution_time(&self) -> u64 {
        self.execution_time
    }

    /// Request built from the current form
    pub fn request(&self) -> ExecutionRequest {
        ExecutionRequest::new(&self.source_code, &self.class_name, &self.input)
    }

    /// Submit the form and fold the result into session state
    pub async fn execute(
        &mut self,
        runner: &dyn CodeRunner,
        history: &mut History,
    ) -> ExecutionOutcome {
        self.clear_result();
        let request = self.request();

        if let Err(e) = request.validate() {
            warn!(error = %e, "request rejected before submit");
            self.error = e.to_string();
            return ExecutionOutcome::Rejected;
        }

        match runner.execute(&request).await {
            Ok(result) if result.success => {
                self.output = result.output.unwrap_or_default();
                self.execution_time = result.execution_time.unwrap_or(0);

                let entry = HistoryEntry::now(
                    request.source_code,
                    request.class_name,
                    request.input,
                    self.output.clone(),
                    self.execution_time,
                );
                if let Err(e) = history.record(entry) {
                    warn!(error = %e, "failed to save run to history");
                }

                info!(execution_time_ms = self.execution_time, "run succeeded");
                ExecutionOutcome::Succeeded {
                    execution_time: self.execution_time,
                }
            }
            Ok(result) => {
                self.error = result.error.unwrap_or_default();
                info!("run failed");
                ExecutionOutcome::Failed
            }
            Err(e) => {
                self.error = connection_error_message(&e);
                warn!(error = %e, "execution service unreachable");
                ExecutionOutcome::ConnectionError
            }
        }
    }

    /// Replace the form with a template and wipe the last result
    pub fn load_template(&mut self, template: &Template) {
        self.source_code = template.code.to_string();
        self.class_name = template.class_name.to_string();
        self.input.clear();
        self.clear_result();
    }

    /// Restore a past run, output included
    pub fn load_from_history(&mut self, entry: &HistoryEntry) {
        self.source_code = entry.source_code.clone();
        self.class_name = entry.class_name.clone();
        self.input = entry.input.clone();
        self.output = entry.output.clone();
        self.execution_time = entry.execution_time;
        self.error.clear();
    }

    /// Back to the Hello World form
    pub fn clear_all(&mut self) {
        self.source_code = DEFAULT_SOURCE.to_string();
        self.class_name = DEFAULT_CLASS_NAME.to_string();
        self.input.clear();
        self.clear_result();
    }

    /// Output as a Java string literal expression
    pub fn to_string_output(&self) -> String {
        to_string_literal(&self.output)
    }

    /// Text block for the result panel in the given format
    pub fn render(&self, format: OutputFormat) -> String {
        let mut out = String::new();

        if self.execution_time > 0 {
            let _ = writeln!(out, "Execution time: {}ms", self.execution_time);
        }

        if !self.output.is_empty() {
            if format.shows_raw() {
                let _ = writeln!(out, "--- Output ---");
                out.push_str(&self.output);
                if !self.output.ends_with('\n') {
                    out.push('\n');
                }
            }
            if format.shows_to_string() {
                let _ = writeln!(out, "--- toString ---");
                let _ = writeln!(out, "{}", self.to_string_output());
            }
        }

        if !self.error.is_empty() {
            let _ = writeln!(out, "--- Error ---");
            let _ = writeln!(out, "{}", self.error);
        }

        out
    }

    fn clear_result(&mut self) {
        self.output.clear();
        self.error.clear();
        self.execution_time = 0;
    }
}

fn connection_error_message(e: &ServiceError) -> String {
    format!("Connection error: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryConfig;
    use crate::service::ExecutionResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Runner returning a canned answer and remembering what it was sent
    struct ScriptedRunner {
        reply: Mutex<Option<Result<ExecutionResult, ServiceError>>>,
        seen: Mutex<Vec<ExecutionRequest>>,
    }

    impl ScriptedRunner {
        fn new(reply: Result<ExecutionResult, ServiceError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CodeRunner for ScriptedRunner {
        async fn execute(
            &self,
            request: &ExecutionRequest,
        ) -> Result<ExecutionResult, ServiceError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .lock()
                .unwrap()
                .take()
                .expect("runner called more than once")
        }
    }

    fn temp_history() -> (tempfile::TempDir, History) {
        let dir = tempfile::tempdir().unwrap();
        let history = History::new(HistoryConfig {
            path: dir.path().join("history.json"),
            capacity: 10,
        });
        (dir, history)
    }

    #[tokio::test]
    async fn test_success_sets_output_and_records_history() {
        let (_dir, mut history) = temp_history();
        let runner = ScriptedRunner::new(Ok(ExecutionResult::success("Hello, World!\n", 42)));
        let mut session = Session::new();
        session.input = "stdin".into();

        let outcome = session.execute(&runner, &mut history).await;

        assert_eq!(outcome, ExecutionOutcome::Succeeded { execution_time: 42 });
        assert_eq!(session.output(), "Hello, World!\n");
        assert_eq!(session.execution_time(), 42);
        assert!(session.error().is_empty());

        assert_eq!(history.len(), 1);
        let entry = history.get(0).unwrap();
        assert_eq!(entry.class_name, "HelloWorld");
        assert_eq!(entry.input, "stdin");
        assert_eq!(entry.output, "Hello, World!\n");

        let sent = runner.seen.lock().unwrap();
        assert_eq!(sent[0].class_name, "HelloWorld");
        assert_eq!(sent[0].input, "stdin");
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_skips_history() {
        let (_dir, mut history) = temp_history();
        let runner = ScriptedRunner::new(Ok(ExecutionResult::failure("Compilation error")));
        let mut session = Session::new();

        let outcome = session.execute(&runner, &mut history).await;

        assert_eq!(outcome, ExecutionOutcome::Failed);
        assert_eq!(session.error(), "Compilation error");
        assert!(session.output().is_empty());
        assert_eq!(session.execution_time(), 0);
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_prefixed() {
        let (_dir, mut history) = temp_history();
        let runner = ScriptedRunner::new(Err(ServiceError::UnexpectedResponse {
            status: 502,
            body: "bad gateway".into(),
        }));
        let mut session = Session::new();

        let outcome = session.execute(&runner, &mut history).await;

        assert_eq!(outcome, ExecutionOutcome::ConnectionError);
        assert!(session.error().starts_with("Connection error: "));
        assert!(session.error().contains("bad gateway"));
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_blank_class_name_never_reaches_runner() {
        let (_dir, mut history) = temp_history();
        let runner = ScriptedRunner::new(Ok(ExecutionResult::success("x", 1)));
        let mut session = Session::new();
        session.class_name = "   ".into();

        let outcome = session.execute(&runner, &mut history).await;

        assert_eq!(outcome, ExecutionOutcome::Rejected);
        assert_eq!(runner.calls(), 0);
        assert!(session.error().contains("class name"));
    }

    #[tokio::test]
    async fn test_new_run_clears_previous_result() {
        let (_dir, mut history) = temp_history();
        let mut session = Session::new();

        let ok = ScriptedRunner::new(Ok(ExecutionResult::success("first", 10)));
        session.execute(&ok, &mut history).await;

        let failed = ScriptedRunner::new(Ok(ExecutionResult::failure("second")));
        session.execute(&failed, &mut history).await;

        assert!(session.output().is_empty());
        assert_eq!(session.execution_time(), 0);
        assert_eq!(session.error(), "second");
    }

    #[test]
    fn test_load_template_resets_result() {
        let mut session = Session::new();
        session.input = "old".into();
        session.error = "old error".into();
        session.output = "old output".into();
        session.execution_time = 7;

        let template = crate::templates::get(3).unwrap();
        session.load_template(template);

        assert_eq!(session.class_name, template.class_name);
        assert_eq!(session.source_code, template.code);
        assert!(session.input.is_empty());
        assert!(session.output().is_empty());
        assert!(session.error().is_empty());
        assert_eq!(session.execution_time(), 0);
    }

    #[test]
    fn test_load_from_history_restores_output() {
        let mut session = Session::new();
        session.error = "stale".into();
        let entry = HistoryEntry::now("class Q {}", "Q", "in", "out", 12);

        session.load_from_history(&entry);

        assert_eq!(session.class_name, "Q");
        assert_eq!(session.input, "in");
        assert_eq!(session.output(), "out");
        assert_eq!(session.execution_time(), 12);
        assert!(session.error().is_empty());
    }

    #[test]
    fn test_clear_all_restores_hello_world() {
        let mut session = Session::new();
        session.load_template(crate::templates::get(5).unwrap());
        session.input = "abc".into();

        session.clear_all();

        assert_eq!(session.class_name, DEFAULT_CLASS_NAME);
        assert_eq!(session.source_code, DEFAULT_SOURCE);
        assert!(session.input.is_empty());
    }

    #[test]
    fn test_render_respects_format() {
        let mut session = Session::new();
        session.output = "say \"hi\"".into();
        session.execution_time = 3;

        let raw = session.render(OutputFormat::Raw);
        assert!(raw.contains("Execution time: 3ms"));
        assert!(raw.contains("--- Output ---"));
        assert!(!raw.contains("--- toString ---"));

        let literal = session.render(OutputFormat::ToString);
        assert!(!literal.contains("--- Output ---"));
        assert!(literal.contains(r#""say \"hi\"""#));

        let both = session.render(OutputFormat::Both);
        assert!(both.contains("--- Output ---") && both.contains("--- toString ---"));
    }

    #[test]
    fn test_render_hides_time_when_zero() {
        let mut session = Session::new();
        session.error = "boom".into();

        let text = session.render(OutputFormat::Both);
        assert!(!text.contains("Execution time"));
        assert!(text.contains("--- Error ---\nboom"));
    }
}
