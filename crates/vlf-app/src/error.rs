//! Application errors.

use thiserror::Error;
use vlf_settings::SettingsError;
use vlf_types::{ErrorCode, Mode};
use vlf_workflow::WorkflowPhase;

use crate::capability::Capability;

/// Errors raised while dispatching application commands.
///
/// Engine failures are not errors at this layer: a failed operation is a
/// normal [`OperationOutcome`](vlf_types::OperationOutcome) the workflow
/// session records and the frontend displays.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisting the configuration record failed.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// The active session does not hold the capability a command requires.
    #[error("permission denied: '{command}' is not granted to this session")]
    PermissionDenied {
        command: &'static str,
        required: Capability,
    },

    /// An operation was requested while the session cannot start one.
    #[error("{mode} session cannot start while {phase}")]
    SessionNotReady { mode: Mode, phase: WorkflowPhase },

    /// A setup command arrived outside a valid setup state.
    #[error("setup error: {0}")]
    Setup(String),

    /// A shell-level operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Creates a permission denied error for a command.
    pub fn permission_denied(command: &'static str, required: Capability) -> Self {
        Self::PermissionDenied { command, required }
    }
}

impl ErrorCode for AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Settings(e) => e.code(),
            Self::PermissionDenied { .. } => "APP_PERMISSION_DENIED",
            Self::SessionNotReady { .. } => "APP_SESSION_NOT_READY",
            Self::Setup(_) => "APP_SETUP_ERROR",
            Self::Io(_) => "APP_IO_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Settings(e) => e.is_recoverable(),
            Self::PermissionDenied { .. } => false,
            Self::SessionNotReady { .. } => true,
            Self::Setup(_) => true,
            Self::Io(_) => true,
        }
    }
}
