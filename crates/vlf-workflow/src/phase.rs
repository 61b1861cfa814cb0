//! Phase types for workflow session tracking.
//!
//! Each operation mode owns one [`WorkflowSession`](crate::WorkflowSession)
//! whose phase reports where the selected file is in its journey and which
//! actions are currently enabled.
//!
//! # Phase Lifecycle
//!
//! ```text
//! Empty → FileSelected → Ready → Running → Succeeded
//!                                    ↓
//!                                  Failed
//! ```
//!
//! A finished session restarts directly from `Succeeded`/`Failed` (the file
//! stays selected); clearing the file returns any phase to `Empty`.
//!
//! # Example
//!
//! ```
//! use vlf_workflow::WorkflowPhase;
//!
//! assert!(WorkflowPhase::Ready.can_start());
//! assert!(WorkflowPhase::Running.is_active());
//! assert!(!WorkflowPhase::Running.can_start());
//! ```

use serde::{Deserialize, Serialize};

/// Where a workflow session is in its lifecycle.
///
/// # Phase Categories
///
/// | Category | Phases | Start Enabled |
/// |----------|--------|---------------|
/// | Selecting | `Empty`, `FileSelected` | No (paths incomplete) |
/// | Startable | `Ready`, `Succeeded`, `Failed` | Yes |
/// | Active | `Running` | No (operation in flight) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// No input file selected.
    #[default]
    Empty,

    /// An input file is selected but the output path is missing.
    ///
    /// Reached only when the user empties the output path field; selection
    /// itself derives an output path and lands in `Ready`.
    FileSelected,

    /// Both paths are set; the start action is enabled.
    Ready,

    /// An engine invocation is in flight.
    ///
    /// The sole concurrency guard: one operation per session at a time.
    Running,

    /// The last operation completed and reported statistics.
    Succeeded,

    /// The last operation failed; the failure detail is retained for display.
    Failed,
}

impl WorkflowPhase {
    /// Returns `true` if the start action may fire.
    ///
    /// Startable phases: `Ready`, `Succeeded`, `Failed`
    ///
    /// # Example
    ///
    /// ```
    /// use vlf_workflow::WorkflowPhase;
    ///
    /// assert!(WorkflowPhase::Ready.can_start());
    /// assert!(WorkflowPhase::Failed.can_start());
    /// assert!(!WorkflowPhase::Empty.can_start());
    /// ```
    #[must_use]
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Ready | Self::Succeeded | Self::Failed)
    }

    /// Returns `true` while an operation is in flight.
    ///
    /// # Example
    ///
    /// ```
    /// use vlf_workflow::WorkflowPhase;
    ///
    /// assert!(WorkflowPhase::Running.is_active());
    /// assert!(!WorkflowPhase::Ready.is_active());
    /// ```
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns `true` once an operation has finished, either way.
    ///
    /// Terminal phases: `Succeeded`, `Failed`
    ///
    /// # Example
    ///
    /// ```
    /// use vlf_workflow::WorkflowPhase;
    ///
    /// assert!(WorkflowPhase::Succeeded.is_terminal());
    /// assert!(!WorkflowPhase::Running.is_terminal());
    /// ```
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::FileSelected => write!(f, "file_selected"),
            Self::Ready => write!(f, "ready"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
