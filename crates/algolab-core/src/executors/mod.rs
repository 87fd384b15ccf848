//! Script execution environments for sandboxed runtime evaluation.
//!
//! Provides the execution contexts untrusted scripts run in. The in-process
//! JavaScript executor is the default; the trait seam exists so an embedding
//! application can substitute a stronger isolation strategy (for example an
//! out-of-process runner) without touching result assembly.

use std::time::Duration;

use async_trait::async_trait;

use crate::capture::CaptureBuffer;
use crate::errors::SandboxError;

/// Outcome of one sandboxed evaluation: the captured output, the failure (if
/// any), and the wall-clock time spent on the attempt itself.
#[derive(Debug, Clone)]
pub struct SandboxRun {
    pub capture: CaptureBuffer,
    pub error: Option<SandboxError>,
    pub elapsed: Duration,
}

impl SandboxRun {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// An execution backend. Implementations convert every failure mode into the
/// `error` field of the returned run; `execute` itself never fails.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    async fn execute(&self, source: &str) -> SandboxRun;
}

pub mod js;

pub use js::{JsExecutor, SandboxConfig};
