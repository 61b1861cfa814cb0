//! Engine invocation errors.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use vlf_types::ErrorCode;

/// Why a single engine invocation failed.
///
/// Three failure classes cover the subprocess boundary: launch failures
/// (the process never ran), engine failures (it ran and said no), and
/// protocol failures (it ran, claimed success, and spoke garbage). The
/// [`Display`](std::fmt::Display) text of each variant is the diagnostic
/// surfaced verbatim to the user.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Bundled binary absent at the resolved path. Checked before any
    /// launch is attempted.
    #[error("engine executable not found at: {path}")]
    BinaryMissing { path: PathBuf },

    /// The operating system refused to start the process.
    #[error("failed to start engine '{path}': {source}")]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Collecting the process result failed after a successful spawn.
    #[error("failed to await engine process: {source}")]
    WaitFailed {
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit status. Carries the captured stderr; renders the
    /// generic status text when stderr is empty.
    #[error("{}", exit_diagnostic(.code, .stderr))]
    ExitFailure { code: Option<i32>, stderr: String },

    /// Exit zero but a payload reporting `success: false`.
    #[error("{message}")]
    Reported { message: String },

    /// Exit zero but stdout did not parse as the statistics schema.
    #[error("malformed engine output")]
    MalformedOutput {
        #[source]
        source: serde_json::Error,
    },

    /// The configured invocation bound elapsed; the child was killed.
    #[error("engine timed out after {}s", .limit.as_secs())]
    TimedOut { limit: Duration },
}

fn exit_diagnostic(code: &Option<i32>, stderr: &str) -> String {
    if stderr.is_empty() {
        match code {
            Some(code) => format!("engine exited with status {code}"),
            None => "engine terminated by signal".to_string(),
        }
    } else {
        stderr.to_string()
    }
}

impl EngineError {
    /// Creates a spawn failure.
    pub fn spawn_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates an exit failure, trimming the captured stderr.
    pub fn exit_failure(code: Option<i32>, stderr: &str) -> Self {
        Self::ExitFailure {
            code,
            stderr: stderr.trim().to_string(),
        }
    }

    /// Returns `true` if the engine process never ran.
    #[must_use]
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Self::BinaryMissing { .. } | Self::SpawnFailed { .. } | Self::WaitFailed { .. }
        )
    }

    /// Returns `true` if the engine ran and reported a failure.
    #[must_use]
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Self::ExitFailure { .. } | Self::Reported { .. })
    }

    /// Returns `true` if the engine claimed success but broke the protocol.
    #[must_use]
    pub fn is_protocol_failure(&self) -> bool {
        matches!(self, Self::MalformedOutput { .. })
    }
}

impl ErrorCode for EngineError {
    fn code(&self) -> &'static str {
        match self {
            Self::BinaryMissing { .. } => "ENGINE_BINARY_MISSING",
            Self::SpawnFailed { .. } => "ENGINE_SPAWN_FAILED",
            Self::WaitFailed { .. } => "ENGINE_WAIT_FAILED",
            Self::ExitFailure { .. } => "ENGINE_EXIT_FAILURE",
            Self::Reported { .. } => "ENGINE_REPORTED_FAILURE",
            Self::MalformedOutput { .. } => "ENGINE_MALFORMED_OUTPUT",
            Self::TimedOut { .. } => "ENGINE_TIMEOUT",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // The user can pick another file or fix the input.
            Self::ExitFailure { .. } | Self::Reported { .. } | Self::TimedOut { .. } => true,
            Self::BinaryMissing { .. }
            | Self::SpawnFailed { .. }
            | Self::WaitFailed { .. }
            | Self::MalformedOutput { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlf_types::assert_error_codes;

    fn io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no such file")
    }

    #[test]
    fn binary_missing_names_path() {
        let err = EngineError::BinaryMissing {
            path: PathBuf::from("/res/engine/vlf_compress_core"),
        };
        assert_eq!(
            err.to_string(),
            "engine executable not found at: /res/engine/vlf_compress_core"
        );
        assert!(err.is_launch_failure());
    }

    #[test]
    fn spawn_failure_names_path_and_cause() {
        let err = EngineError::spawn_failed("/bin/engine", io_err());
        let text = err.to_string();
        assert!(text.contains("/bin/engine"));
        assert!(text.contains("no such file"));
    }

    #[test]
    fn exit_failure_prefers_stderr() {
        let err = EngineError::exit_failure(Some(1), "Invalid Base32 encoding\n");
        assert_eq!(err.to_string(), "Invalid Base32 encoding");
        assert!(err.is_engine_failure());
    }

    #[test]
    fn exit_failure_empty_stderr_is_generic() {
        let err = EngineError::exit_failure(Some(3), "   ");
        assert_eq!(err.to_string(), "engine exited with status 3");
    }

    #[test]
    fn exit_failure_without_code_mentions_signal() {
        let err = EngineError::exit_failure(None, "");
        assert_eq!(err.to_string(), "engine terminated by signal");
    }

    #[test]
    fn malformed_output_is_generic() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = EngineError::MalformedOutput { source };
        assert_eq!(err.to_string(), "malformed engine output");
        assert!(err.is_protocol_failure());
    }

    #[test]
    fn timeout_names_the_bound() {
        let err = EngineError::TimedOut {
            limit: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "engine timed out after 30s");
        assert!(err.is_recoverable());
    }

    #[test]
    fn error_codes_follow_conventions() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_error_codes(
            &[
                EngineError::BinaryMissing { path: "/p".into() },
                EngineError::spawn_failed("/p", io_err()),
                EngineError::WaitFailed { source: io_err() },
                EngineError::exit_failure(Some(1), "x"),
                EngineError::Reported {
                    message: "x".into(),
                },
                EngineError::MalformedOutput { source },
                EngineError::TimedOut {
                    limit: Duration::from_secs(1),
                },
            ],
            "ENGINE_",
        );
    }

    #[test]
    fn launch_failures_are_not_recoverable() {
        assert!(!EngineError::BinaryMissing { path: "/p".into() }.is_recoverable());
        assert!(!EngineError::spawn_failed("/p", io_err()).is_recoverable());
    }
}
