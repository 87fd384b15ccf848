//! Execution result assembly
//!
//! The `Runner` is the core's single boundary operation: it dispatches a
//! request to the script executor, asks the trace registry for the
//! instructional trace when one applies, and composes both into the
//! immutable `ExecutionResult` handed back to the caller. Assembly is pure
//! composition; a trace is attached only to a successful run that named an
//! algorithm id, never partially.

use crate::core_types::{ExecutionRequest, ExecutionResult, Language};
use crate::errors::SandboxError;
use crate::executors::{JsExecutor, SandboxConfig, ScriptExecutor};
use crate::trace::TraceRegistry;

pub struct Runner {
    executor: Box<dyn ScriptExecutor>,
    registry: TraceRegistry,
}

impl Runner {
    pub fn new() -> Self {
        Self::with_config(SandboxConfig::default())
    }

    pub fn with_config(config: SandboxConfig) -> Self {
        Self::with_executor(Box::new(JsExecutor::with_config(config)))
    }

    /// Substitute a different execution backend behind the same assembly.
    pub fn with_executor(executor: Box<dyn ScriptExecutor>) -> Self {
        Self {
            executor,
            registry: TraceRegistry::new(),
        }
    }

    /// Run one submission to completion and assemble its result. Never
    /// fails: every failure mode is reported through the result itself.
    pub async fn run(&self, request: ExecutionRequest) -> ExecutionResult {
        if request.language != Language::Javascript {
            let error = SandboxError::UnsupportedLanguage(request.language.as_str().to_string());
            log::warn!("rejected submission: {}", error);
            return ExecutionResult {
                success: false,
                stdout: String::new(),
                stderr: error.to_string(),
                duration_ms: 0,
                trace: Vec::new(),
                error_kind: Some(error.kind()),
            };
        }

        let run = self.executor.execute(&request.code).await;
        let success = run.succeeded();
        log::debug!(
            "script run finished: success={} elapsed={:?} algo_id={:?}",
            success,
            run.elapsed,
            request.algo_id
        );

        let trace = if success {
            self.registry.synthesize(request.algo_id.as_deref())
        } else {
            Vec::new()
        };

        ExecutionResult {
            success,
            stdout: run.capture.stdout(),
            stderr: run.capture.stderr(),
            duration_ms: run.elapsed.as_millis() as u64,
            trace,
            error_kind: run.error.as_ref().map(SandboxError::kind),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::ErrorKind;
    use std::time::Duration;

    fn runner() -> Runner {
        Runner::new()
    }

    #[tokio::test]
    async fn hello_world_round_trip() {
        let result = runner()
            .run(ExecutionRequest::javascript("console.log('hi')", None))
            .await;

        assert!(result.success);
        assert_eq!(result.stdout, "hi");
        assert_eq!(result.stderr, "");
        assert!(result.trace.is_empty());
        assert!(result.error_kind.is_none());
    }

    #[tokio::test]
    async fn successful_run_with_algo_id_carries_the_trace() {
        let result = runner()
            .run(ExecutionRequest::javascript(
                "console.log('sorting')",
                Some("bubble-sort".to_string()),
            ))
            .await;

        assert!(result.success);
        assert_eq!(result.trace.len(), 19);
        assert_eq!(result.trace[0].step, 1);
    }

    #[tokio::test]
    async fn failed_run_never_carries_a_trace() {
        let result = runner()
            .run(ExecutionRequest::javascript(
                "throw new Error('boom')",
                Some("bubble-sort".to_string()),
            ))
            .await;

        assert!(!result.success);
        assert!(result.trace.is_empty());
        assert_eq!(result.error_kind, Some(ErrorKind::Script));
        assert!(result.stderr.contains("boom"));
    }

    #[tokio::test]
    async fn unknown_algo_id_yields_an_empty_trace() {
        let result = runner()
            .run(ExecutionRequest::javascript(
                "console.log('ok')",
                Some("quick-sort".to_string()),
            ))
            .await;

        assert!(result.success);
        assert!(result.trace.is_empty());
    }

    #[tokio::test]
    async fn python_is_reported_as_unsupported() {
        let result = runner()
            .run(ExecutionRequest {
                code: "print('hi')".to_string(),
                language: Language::Python,
                algo_id: None,
            })
            .await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(ErrorKind::Unsupported));
        assert!(result.stderr.contains("UnsupportedLanguage"));
        assert_eq!(result.duration_ms, 0);
    }

    #[tokio::test]
    async fn timeout_is_distinguishable_at_the_result_surface() {
        let runner = Runner::with_config(SandboxConfig {
            timeout: Duration::from_millis(200),
            ..SandboxConfig::default()
        });

        let result = runner
            .run(ExecutionRequest::javascript("while (true) {}", None))
            .await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(ErrorKind::Timeout));
        // Elapsed time is the deadline plus bounded overhead.
        assert!(result.duration_ms >= 200);
        assert!(result.duration_ms < 2000);
    }
}
