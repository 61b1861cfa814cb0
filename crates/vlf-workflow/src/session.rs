//! Per-mode workflow session.
//!
//! One session exists per operation mode and tracks a single file's journey
//! from selection through engine invocation to result display. Event handling
//! is a pure dispatch: events go in via [`WorkflowSession::handle`], the
//! session mutates, and side-effect instructions come out for the caller to
//! execute. The session itself never touches the filesystem and never spawns
//! anything, which is what makes the lifecycle testable without a rendering
//! surface or a real engine.
//!
//! # Dispatch Loop
//!
//! ```text
//! UI event ──→ WorkflowSession::handle ──→ Vec<WorkflowEffect>
//!                     │                           │
//!                     │                    execute (orchestrator)
//!                     │                           │
//!                     └──── OperationFinished ←───┘
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use vlf_types::{Mode, OperationOutcome};

use crate::WorkflowPhase;

// ── Events ───────────────────────────────────────────────────────────

/// What happened at the UI boundary.
///
/// Selection events carry `None` when the user dismissed the dialog without
/// choosing; dismissal is a no-op, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// An input file was picked (browse or drag-drop), or the dialog was
    /// dismissed.
    FileChosen(Option<PathBuf>),

    /// A save path was picked for the output, or the dialog was dismissed.
    SavePathChosen(Option<PathBuf>),

    /// The output path field was emptied.
    OutputCleared,

    /// The start action was triggered.
    StartRequested,

    /// The orchestrator delivered the outcome of the in-flight operation.
    OperationFinished(OperationOutcome),

    /// The selected file was cleared.
    Cleared,
}

// ── Effects ──────────────────────────────────────────────────────────

/// Side-effect instruction returned by a dispatch.
///
/// The caller executes these; the session only records that they were
/// requested.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEffect {
    /// Invoke the engine, then feed the outcome back as
    /// [`WorkflowEvent::OperationFinished`].
    RunOperation {
        mode: Mode,
        input_path: PathBuf,
        output_path: PathBuf,
    },
}

// ── Output path derivation ───────────────────────────────────────────

/// Derives the output path for `input`: the configured output directory
/// joined with the input's base name plus the mode suffix.
///
/// Deterministic: `report.txt` in forward mode with output directory `/out`
/// always yields `/out/report_compressed.txt`.
#[must_use]
pub fn derive_output_path(output_dir: &Path, input: &Path, mode: Mode) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(mode.output_suffix());
    output_dir.join(name)
}

// ── Session ──────────────────────────────────────────────────────────

/// UI-facing state for one operation mode.
///
/// Holds the selected input, the derived output path, the current
/// [`WorkflowPhase`] and the last [`OperationOutcome`]. Never shared across
/// modes; the forward and inverse sessions are fully independent.
///
/// Invariant: the phase only reaches [`WorkflowPhase::Ready`] (or beyond)
/// while both paths are set.
///
/// # Example
///
/// ```
/// use vlf_types::Mode;
/// use vlf_workflow::{WorkflowEvent, WorkflowPhase, WorkflowSession};
///
/// let mut session = WorkflowSession::new(Mode::Forward, "/out");
/// session.handle(WorkflowEvent::FileChosen(Some("/tmp/report.txt".into())));
///
/// assert_eq!(session.phase(), WorkflowPhase::Ready);
/// assert_eq!(
///     session.derived_output().unwrap().to_str(),
///     Some("/out/report_compressed.txt")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowSession {
    mode: Mode,
    output_dir: PathBuf,
    selected_input: Option<PathBuf>,
    derived_output: Option<PathBuf>,
    phase: WorkflowPhase,
    last_result: Option<OperationOutcome>,
}

impl WorkflowSession {
    /// Creates an empty session for `mode`.
    ///
    /// `output_dir` is the configured output directory used for path
    /// derivation; it is fixed for the life of the session.
    #[must_use]
    pub fn new(mode: Mode, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            output_dir: output_dir.into(),
            selected_input: None,
            derived_output: None,
            phase: WorkflowPhase::Empty,
            last_result: None,
        }
    }

    /// The operation mode this session runs.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// The selected input file, if any.
    #[must_use]
    pub fn selected_input(&self) -> Option<&Path> {
        self.selected_input.as_deref()
    }

    /// The output path the next operation will write to, if set.
    #[must_use]
    pub fn derived_output(&self) -> Option<&Path> {
        self.derived_output.as_deref()
    }

    /// Outcome of the last finished operation, retained for display until
    /// the next one starts.
    #[must_use]
    pub fn last_result(&self) -> Option<&OperationOutcome> {
        self.last_result.as_ref()
    }

    /// Returns `true` if the start action is currently enabled.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.phase.can_start()
    }

    /// Applies one event and returns the effects the caller must execute.
    ///
    /// Dispatch is total: events that make no sense in the current phase are
    /// logged and dropped, never panicked on.
    pub fn handle(&mut self, event: WorkflowEvent) -> Vec<WorkflowEffect> {
        match event {
            WorkflowEvent::FileChosen(None) | WorkflowEvent::SavePathChosen(None) => {
                debug!(mode = %self.mode, "selection dialog dismissed");
                Vec::new()
            }
            WorkflowEvent::FileChosen(Some(path)) => self.on_file_chosen(path),
            WorkflowEvent::SavePathChosen(Some(path)) => self.on_save_path_chosen(path),
            WorkflowEvent::OutputCleared => self.on_output_cleared(),
            WorkflowEvent::StartRequested => self.on_start_requested(),
            WorkflowEvent::OperationFinished(outcome) => self.on_operation_finished(outcome),
            WorkflowEvent::Cleared => self.on_cleared(),
        }
    }

    fn on_file_chosen(&mut self, path: PathBuf) -> Vec<WorkflowEffect> {
        if self.phase.is_active() {
            warn!(mode = %self.mode, "ignoring file selection while an operation is in flight");
            return Vec::new();
        }
        let derived = derive_output_path(&self.output_dir, &path, self.mode);
        debug!(
            mode = %self.mode,
            input = %path.display(),
            output = %derived.display(),
            "input file selected"
        );
        self.selected_input = Some(path);
        self.derived_output = Some(derived);
        self.last_result = None;
        self.phase = WorkflowPhase::Ready;
        Vec::new()
    }

    fn on_save_path_chosen(&mut self, path: PathBuf) -> Vec<WorkflowEffect> {
        if self.phase.is_active() {
            warn!(mode = %self.mode, "ignoring save path while an operation is in flight");
            return Vec::new();
        }
        if self.selected_input.is_none() {
            warn!(mode = %self.mode, "ignoring save path with no input selected");
            return Vec::new();
        }
        debug!(mode = %self.mode, output = %path.display(), "output path retargeted");
        self.derived_output = Some(path);
        if !self.phase.is_terminal() {
            self.phase = WorkflowPhase::Ready;
        }
        Vec::new()
    }

    fn on_output_cleared(&mut self) -> Vec<WorkflowEffect> {
        if self.phase.is_active() {
            warn!(mode = %self.mode, "ignoring output clear while an operation is in flight");
            return Vec::new();
        }
        self.derived_output = None;
        self.phase = if self.selected_input.is_some() {
            WorkflowPhase::FileSelected
        } else {
            WorkflowPhase::Empty
        };
        Vec::new()
    }

    fn on_start_requested(&mut self) -> Vec<WorkflowEffect> {
        if !self.phase.can_start() {
            warn!(mode = %self.mode, phase = %self.phase, "start refused in current phase");
            return Vec::new();
        }
        let (Some(input), Some(output)) =
            (self.selected_input.clone(), self.derived_output.clone())
        else {
            warn!(mode = %self.mode, "start refused: paths incomplete");
            return Vec::new();
        };
        info!(
            mode = %self.mode,
            input = %input.display(),
            output = %output.display(),
            "operation started"
        );
        self.last_result = None;
        self.phase = WorkflowPhase::Running;
        vec![WorkflowEffect::RunOperation {
            mode: self.mode,
            input_path: input,
            output_path: output,
        }]
    }

    fn on_operation_finished(&mut self, outcome: OperationOutcome) -> Vec<WorkflowEffect> {
        if !self.phase.is_active() {
            // Stale completion, e.g. the session was cleared mid-run.
            warn!(mode = %self.mode, phase = %self.phase, "dropping outcome for a session no longer running");
            return Vec::new();
        }
        if outcome.is_success() {
            info!(mode = %self.mode, "operation succeeded");
            self.phase = WorkflowPhase::Succeeded;
        } else {
            if let Some(detail) = outcome.failure() {
                warn!(mode = %self.mode, code = %detail.code, error = %detail.message, "operation failed");
            }
            self.phase = WorkflowPhase::Failed;
        }
        self.last_result = Some(outcome);
        Vec::new()
    }

    fn on_cleared(&mut self) -> Vec<WorkflowEffect> {
        // Honored in every phase, mid-run included; a completion that arrives
        // after a clear is dropped as stale.
        debug!(mode = %self.mode, "session cleared");
        self.selected_input = None;
        self.derived_output = None;
        self.last_result = None;
        self.phase = WorkflowPhase::Empty;
        Vec::new()
    }
}
