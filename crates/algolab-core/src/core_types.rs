//! Core type definitions for the execution boundary
//!
//! This module defines the data structures exchanged between an embedding
//! application and the execution core. The wire shape uses camelCase field
//! names so that browser-side visualizers can consume results without a
//! translation layer. An `ExecutionResult` is created fresh for every
//! request and owned by the caller afterwards; the core keeps no reference
//! to it and no state between calls.

use serde::{Deserialize, Serialize};

/// Languages a request may name. Only JavaScript is executable; a Python
/// request is reported as a failed run with an `unsupported` error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Python => "python",
        }
    }
}

/// One script submission. Transient: constructed per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: Language,
    #[serde(rename = "algoId", skip_serializing_if = "Option::is_none")]
    pub algo_id: Option<String>,
}

impl ExecutionRequest {
    /// Convenience constructor for JavaScript submissions.
    pub fn javascript(code: impl Into<String>, algo_id: Option<String>) -> Self {
        Self {
            code: code.into(),
            language: Language::Javascript,
            algo_id,
        }
    }
}

/// Failure classification surfaced to callers. Present only on failed runs,
/// so a timeout is distinguishable from a script-raised error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The script raised an error (including syntax errors).
    Script,
    /// The script did not return control within the deadline.
    Timeout,
    /// The requested language has no executor.
    Unsupported,
    /// The sandbox itself failed; not attributable to the script.
    Internal,
}

/// The single artifact returned across the core's boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
    pub trace: Vec<TraceStep>,
    #[serde(rename = "errorKind", skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

/// One unit of an instructional trace.
///
/// Within a trace, `step` values are contiguous and start at 1, and every
/// index in `highlighted_indices` is valid for the `array_snapshot` emitted
/// in the same step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: usize,
    pub description: String,
    /// Approximate source line the step illustrates; purely illustrative.
    #[serde(rename = "currentLine")]
    pub current_line: u32,
    #[serde(rename = "arraySnapshot", skip_serializing_if = "Option::is_none")]
    pub array_snapshot: Option<Vec<i64>>,
    #[serde(rename = "highlightedIndices", skip_serializing_if = "Option::is_none")]
    pub highlighted_indices: Option<Vec<usize>>,
}
