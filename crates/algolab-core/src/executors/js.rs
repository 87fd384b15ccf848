//! In-process JavaScript executor built on the Boa engine.
//!
//! Each call gets a brand new engine context. No state leaks between calls.
//!
//! Engine contexts are `!Send`, so evaluation runs on a dedicated OS thread
//! while the async caller awaits a result channel under the wall-clock
//! deadline. A run that blows the deadline is reported as a timeout and its
//! thread abandoned; the engine's runtime limits bound how much longer an
//! abandoned evaluation can keep spinning, and convert runaway recursion
//! into a reported error instead of a host stack overflow.
//!
//! The only capability visible inside the sandbox is a `console` object with
//! `log`, `error` and `warn`. Boa's default context exposes nothing but
//! ECMAScript builtins: no filesystem, network, timer or module-loading
//! hooks exist unless the host registers them, and none are registered here
//! beyond the two emit hooks the console prelude captures and then removes
//! from the global object.

use std::thread;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use boa_engine::{js_string, Context, JsResult, JsValue, NativeFunction, Source};
use boa_gc::{Finalize, Trace};
use tokio::sync::oneshot;

use super::{SandboxRun, ScriptExecutor};
use crate::capture::{CaptureHandle, StreamKind};
use crate::errors::SandboxError;

/// Limits applied to every sandboxed evaluation.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Wall-clock deadline for one run.
    pub timeout: Duration,
    /// Maximum accepted script size in bytes.
    pub max_source_len: usize,
    /// Engine-level loop iteration cap. Generous enough that instructional
    /// scripts never hit it; its job is to stop abandoned evaluations.
    pub loop_iteration_limit: u64,
    /// Engine-level recursion cap; exceeding it raises a script error.
    pub recursion_limit: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(1000),
            max_source_len: 64 * 1024,
            loop_iteration_limit: 100_000_000,
            recursion_limit: 512,
        }
    }
}

/// Installed before user code runs. Captures the two host emit hooks,
/// removes them from the global object, and exposes `console` as the sole
/// injected capability. Strings pass through unchanged; other values are
/// JSON-serialized, falling back to `String(value)` when serialization
/// fails or yields no encoding; arguments join with a single space.
const CONSOLE_PRELUDE: &str = r#"
(function (global) {
    var emitInfo = global.__emit_info;
    var emitError = global.__emit_error;
    delete global.__emit_info;
    delete global.__emit_error;

    function render(value) {
        if (typeof value === 'string') {
            return value;
        }
        try {
            var encoded = JSON.stringify(value);
            return encoded === undefined ? String(value) : encoded;
        } catch (err) {
            return String(value);
        }
    }

    function line(args) {
        var parts = [];
        for (var i = 0; i < args.length; i++) {
            parts.push(render(args[i]));
        }
        return parts.join(' ');
    }

    global.console = {
        log: function () { emitInfo(line(arguments)); },
        error: function () { emitError(line(arguments)); },
        warn: function () { emitError(line(arguments)); }
    };
})(globalThis);
"#;

/// The in-process sandbox. Cheap to construct; holds only configuration, so
/// concurrent runs share nothing.
pub struct JsExecutor {
    config: SandboxConfig,
}

impl JsExecutor {
    pub fn new() -> Self {
        Self::with_config(SandboxConfig::default())
    }

    pub fn with_config(config: SandboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }
}

impl Default for JsExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptExecutor for JsExecutor {
    async fn execute(&self, source: &str) -> SandboxRun {
        let started = Instant::now();
        let capture = CaptureHandle::default();

        if source.len() > self.config.max_source_len {
            let error = SandboxError::SourceTooLarge {
                max: self.config.max_source_len,
                actual: source.len(),
            };
            capture.append(StreamKind::Error, error.to_string());
            return SandboxRun {
                capture: capture.snapshot(),
                error: Some(error),
                elapsed: started.elapsed(),
            };
        }

        let (tx, rx) = oneshot::channel();
        let thread_capture = capture.clone();
        let thread_config = self.config.clone();
        let source = source.to_string();

        thread::spawn(move || {
            let outcome = evaluate(&source, &thread_capture, &thread_config);
            if tx.send(outcome).is_err() {
                log::debug!("sandbox result receiver dropped before the run finished");
            }
        });

        let error = match tokio::time::timeout(self.config.timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => {
                // The sender was dropped without a result: the thread died.
                let error =
                    SandboxError::Internal("sandbox thread exited without a result".to_string());
                log::error!("{}", error);
                capture.append(StreamKind::Error, error.to_string());
                Some(error)
            }
            Err(_) => {
                let error = SandboxError::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                };
                log::warn!("sandboxed script abandoned: {}", error);
                capture.append(StreamKind::Error, error.to_string());
                Some(error)
            }
        };

        SandboxRun {
            capture: capture.snapshot(),
            error,
            elapsed: started.elapsed(),
        }
    }
}

/// Evaluate one script on the current (dedicated) thread. Every failure is
/// materialized as a marker line on the error stream plus a returned error.
fn evaluate(
    source: &str,
    capture: &CaptureHandle,
    config: &SandboxConfig,
) -> Option<SandboxError> {
    let mut context = Context::default();
    context
        .runtime_limits_mut()
        .set_loop_iteration_limit(config.loop_iteration_limit);
    context
        .runtime_limits_mut()
        .set_recursion_limit(config.recursion_limit);

    if let Err(err) = install_console(&mut context, capture) {
        let error = SandboxError::Internal(format!("console setup failed: {err}"));
        capture.append(StreamKind::Error, error.to_string());
        return Some(error);
    }

    match context.eval(Source::from_bytes(source)) {
        Ok(_) => None,
        Err(err) => {
            let error = SandboxError::Script(err.to_string());
            capture.append(StreamKind::Error, error.to_string());
            Some(error)
        }
    }
}

/// Captures for an emit hook. The handle is plain host state, invisible to
/// the garbage collector.
#[derive(Trace, Finalize)]
struct EmitHook {
    #[unsafe_ignore_trace]
    capture: CaptureHandle,
    #[unsafe_ignore_trace]
    stream: StreamKind,
}

fn emit_fn(capture: &CaptureHandle, stream: StreamKind) -> NativeFunction {
    NativeFunction::from_copy_closure_with_captures(
        |_this, args, hook, _context| {
            // The prelude always passes a single pre-formatted string.
            let line = args
                .first()
                .and_then(|value| value.as_string())
                .map(|text| text.to_std_string_escaped())
                .unwrap_or_default();
            hook.capture.append(hook.stream, line);
            Ok(JsValue::undefined())
        },
        EmitHook {
            capture: capture.clone(),
            stream,
        },
    )
}

fn install_console(context: &mut Context, capture: &CaptureHandle) -> JsResult<()> {
    context.register_global_callable(
        js_string!("__emit_info"),
        1,
        emit_fn(capture, StreamKind::Info),
    )?;
    context.register_global_callable(
        js_string!("__emit_error"),
        1,
        emit_fn(capture, StreamKind::Error),
    )?;
    context.eval(Source::from_bytes(CONSOLE_PRELUDE)).map(|_| ())
}
