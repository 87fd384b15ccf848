//! Execution core for the algolab script playground.
//!
//! This crate runs short, untrusted scripts, bounds their running time,
//! captures their console output deterministically, and returns one
//! structured result a UI can render without re-interpreting the script.
//! For a small catalog of known algorithms it additionally synthesizes a
//! step-by-step instructional trace.
//!
//! # Architecture Overview
//!
//! - **Output capture**: per-run info/error line streams behind a handle
//!   that survives a timed-out, abandoned evaluation
//! - **Sandbox execution**: a fresh embedded JavaScript engine per call,
//!   exposing only an injected console capability, under a wall-clock
//!   deadline enforced independently of the script's behavior
//! - **Trace synthesis**: an immutable registry of pure, deterministic
//!   algorithm simulators keyed by id; traces are canned recomputations
//!   over canonical inputs, never instrumentation of the submitted code
//! - **Result assembly**: pure composition of capture, outcome and trace
//!   into the single artifact returned across the boundary
//!
//! The core holds no state between calls; concurrent requests share nothing
//! mutable and need no locking.

pub mod capture;
pub mod core_types;
pub mod errors;
pub mod executors;
pub mod runner;
pub mod trace;

pub use capture::{CaptureBuffer, CaptureHandle};
pub use core_types::{ErrorKind, ExecutionRequest, ExecutionResult, Language, TraceStep};
pub use errors::SandboxError;
pub use executors::{JsExecutor, SandboxConfig, SandboxRun, ScriptExecutor};
pub use runner::Runner;
pub use trace::TraceRegistry;
