//! Error types for the execution core
//!
//! Every failure mode of a sandboxed run is captured here and converted into
//! the failed-result path of an `ExecutionResult`; no error ever escapes the
//! core's boundary as a panic or a transport-level fault. The `Display`
//! implementations double as the marker lines appended to a run's error
//! stream, in the `<ErrorKindName>: <message>` form the UI surfaces verbatim.

use thiserror::Error;

use crate::core_types::ErrorKind;

#[derive(Error, Debug, Clone)]
pub enum SandboxError {
    /// The script raised an error. The engine's own display already carries
    /// the `SyntaxError:`/`TypeError:` prefix, so the message passes through.
    #[error("{0}")]
    Script(String),
    #[error("TimeoutError: execution exceeded the {timeout_ms} ms deadline")]
    Timeout { timeout_ms: u64 },
    #[error("SourceTooLarge: script is {actual} bytes, the limit is {max}")]
    SourceTooLarge { max: usize, actual: usize },
    #[error("UnsupportedLanguage: {0} execution is not implemented")]
    UnsupportedLanguage(String),
    #[error("InternalError: {0}")]
    Internal(String),
}

impl SandboxError {
    /// Classification surfaced on the `ExecutionResult`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SandboxError::Script(_) | SandboxError::SourceTooLarge { .. } => ErrorKind::Script,
            SandboxError::Timeout { .. } => ErrorKind::Timeout,
            SandboxError::UnsupportedLanguage(_) => ErrorKind::Unsupported,
            SandboxError::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_errors_display_verbatim() {
        let error = SandboxError::Script("TypeError: x is not a function".to_string());
        assert_eq!(error.to_string(), "TypeError: x is not a function");
        assert_eq!(error.kind(), ErrorKind::Script);
    }

    #[test]
    fn timeout_marker_names_the_deadline() {
        let error = SandboxError::Timeout { timeout_ms: 1000 };
        assert!(error.to_string().starts_with("TimeoutError:"));
        assert!(error.to_string().contains("1000 ms"));
        assert_eq!(error.kind(), ErrorKind::Timeout);
    }
}
