//! Operation outcomes.
//!
//! The orchestrator produces exactly one [`OperationOutcome`] per engine
//! invocation. The requesting workflow session consumes it once and retains
//! it for display until the next operation starts.

use serde::{Deserialize, Serialize};

use crate::EngineStats;

/// Discriminated result of one engine invocation.
///
/// Failures never cross the orchestrator boundary as faults; they arrive
/// here as data with a stable code and a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The engine exited cleanly and reported statistics.
    Succeeded(EngineStats),

    /// The invocation failed at launch, in the engine, or at the protocol.
    Failed(FailureDetail),
}

impl OperationOutcome {
    /// Returns `true` for [`Succeeded`](Self::Succeeded).
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The statistics payload, if the operation succeeded.
    #[must_use]
    pub fn stats(&self) -> Option<&EngineStats> {
        match self {
            Self::Succeeded(stats) => Some(stats),
            Self::Failed(_) => None,
        }
    }

    /// The failure detail, if the operation failed.
    #[must_use]
    pub fn failure(&self) -> Option<&FailureDetail> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(detail) => Some(detail),
        }
    }
}

/// Why an invocation failed, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Stable machine-readable code, UPPER_SNAKE_CASE.
    pub code: String,

    /// Diagnostic text surfaced verbatim.
    pub message: String,
}

impl FailureDetail {
    /// Creates a failure detail.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
