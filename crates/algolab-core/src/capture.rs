//! Output capture for sandboxed script runs.
//!
//! A run's console output accumulates into a [`CaptureBuffer`] holding two
//! ordered line streams: info (`console.log`) and error (`console.error`,
//! `console.warn`, plus the executor's own failure markers). The sandbox
//! thread writes through a cloneable [`CaptureHandle`], so the host can still
//! snapshot whatever was emitted up to the abort point after it abandons a
//! run that blew its deadline.

use std::sync::{Arc, Mutex, MutexGuard};

/// Which of the two output streams a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Info,
    Error,
}

/// Ordered log lines for one run, split by stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureBuffer {
    info: Vec<String>,
    error: Vec<String>,
}

impl CaptureBuffer {
    pub fn append(&mut self, stream: StreamKind, line: String) {
        match stream {
            StreamKind::Info => self.info.push(line),
            StreamKind::Error => self.error.push(line),
        }
    }

    /// Info stream joined by newline, in emission order.
    pub fn stdout(&self) -> String {
        self.info.join("\n")
    }

    /// Error stream joined by newline, in emission order.
    pub fn stderr(&self) -> String {
        self.error.join("\n")
    }

    pub fn info_lines(&self) -> &[String] {
        &self.info
    }

    pub fn error_lines(&self) -> &[String] {
        &self.error
    }
}

/// Shared, thread-safe handle onto a [`CaptureBuffer`].
#[derive(Debug, Clone, Default)]
pub struct CaptureHandle {
    inner: Arc<Mutex<CaptureBuffer>>,
}

impl CaptureHandle {
    pub fn append(&self, stream: StreamKind, line: String) {
        self.lock().append(stream, line);
    }

    /// Clone of the buffer as of this instant. Used both on the normal exit
    /// path and when a timed-out run is abandoned mid-write.
    pub fn snapshot(&self) -> CaptureBuffer {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, CaptureBuffer> {
        // A sandbox thread that panicked poisons the lock; the lines already
        // captured are still the lines the caller is owed.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
