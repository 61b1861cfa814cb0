//! First-run setup flow.
//!
//! A short-lived modal session that runs only when no resolved configuration
//! record exists. It offers the recommended per-user directory layout or
//! custom folders, then creates the directories and persists the record
//! before the main session is allowed to proceed.
//!
//! Like the workflow session, this is a pure dispatch machine: the flow
//! never touches the filesystem itself. Directory creation and the write
//! happen in the caller, which reports back with
//! [`SetupEvent::PersistSucceeded`] or [`SetupEvent::PersistFailed`].
//!
//! # Phase Lifecycle
//!
//! ```text
//! ChoosingMode ⇄ CollectingPaths
//!       │              │
//!       └→ Finalizing ←┘
//!              │
//!            Closed
//! ```
//!
//! A persist failure returns `Finalizing` to the phase it came from, with
//! the error retained for display, so the user can retry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ── Choice ───────────────────────────────────────────────────────────

/// Which directory layout the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupChoice {
    /// The recommended layout under the per-user application data root.
    #[default]
    Defaults,

    /// User-chosen input and output folders.
    Custom,
}

impl std::fmt::Display for SetupChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

// ── Phase ────────────────────────────────────────────────────────────

/// Where the setup flow is in its short life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupPhase {
    /// Picking between the default layout and custom folders.
    #[default]
    ChoosingMode,

    /// Custom layout selected; collecting the two folders.
    CollectingPaths,

    /// Directories being created and the record persisted.
    Finalizing,

    /// Setup persisted; the main session may proceed.
    Closed,
}

impl SetupPhase {
    /// Returns `true` while the flow still reacts to user input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::ChoosingMode | Self::CollectingPaths)
    }

    /// Returns `true` once setup has completed and persisted.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for SetupPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChoosingMode => write!(f, "choosing_mode"),
            Self::CollectingPaths => write!(f, "collecting_paths"),
            Self::Finalizing => write!(f, "finalizing"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

// ── Events ───────────────────────────────────────────────────────────

/// What happened at the setup dialog boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupEvent {
    /// A layout option was picked.
    ChoiceMade(SetupChoice),

    /// An input folder was picked, or the dialog was dismissed.
    InputDirChosen(Option<PathBuf>),

    /// An output folder was picked, or the dialog was dismissed.
    OutputDirChosen(Option<PathBuf>),

    /// The continue action was triggered.
    ContinueRequested,

    /// The caller created both directories and persisted the record.
    PersistSucceeded,

    /// Directory creation or the write failed; setup must not complete.
    PersistFailed(String),
}

// ── Effects ──────────────────────────────────────────────────────────

/// Side-effect instruction returned by a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupEffect {
    /// Create both directories (recursively), then persist the record with
    /// the first-run flag cleared. Feed the result back as
    /// [`SetupEvent::PersistSucceeded`] or [`SetupEvent::PersistFailed`].
    PersistSettings {
        input_dir: PathBuf,
        output_dir: PathBuf,
    },
}

// ── Flow ─────────────────────────────────────────────────────────────

/// State of the one-time setup dialog.
///
/// # Example
///
/// ```
/// use vlf_workflow::{SetupEffect, SetupEvent, SetupFlow};
///
/// let mut flow = SetupFlow::new("/data/input", "/data/output");
/// let effects = flow.handle(SetupEvent::ContinueRequested);
///
/// assert_eq!(
///     effects,
///     vec![SetupEffect::PersistSettings {
///         input_dir: "/data/input".into(),
///         output_dir: "/data/output".into(),
///     }]
/// );
///
/// flow.handle(SetupEvent::PersistSucceeded);
/// assert!(flow.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct SetupFlow {
    default_input: PathBuf,
    default_output: PathBuf,
    phase: SetupPhase,
    choice: SetupChoice,
    custom_input: Option<PathBuf>,
    custom_output: Option<PathBuf>,
    last_error: Option<String>,
}

impl SetupFlow {
    /// Creates a flow offering `default_input`/`default_output` as the
    /// recommended layout.
    #[must_use]
    pub fn new(default_input: impl Into<PathBuf>, default_output: impl Into<PathBuf>) -> Self {
        Self {
            default_input: default_input.into(),
            default_output: default_output.into(),
            phase: SetupPhase::ChoosingMode,
            choice: SetupChoice::Defaults,
            custom_input: None,
            custom_output: None,
            last_error: None,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SetupPhase {
        self.phase
    }

    /// The layout currently selected.
    #[must_use]
    pub fn choice(&self) -> SetupChoice {
        self.choice
    }

    /// The custom input folder, once chosen.
    #[must_use]
    pub fn custom_input(&self) -> Option<&Path> {
        self.custom_input.as_deref()
    }

    /// The custom output folder, once chosen.
    #[must_use]
    pub fn custom_output(&self) -> Option<&Path> {
        self.custom_output.as_deref()
    }

    /// The error from the last failed finalization, retained for display.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns `true` once setup has persisted and closed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase.is_closed()
    }

    /// Returns `true` if the continue action may fire.
    ///
    /// The defaults are always complete; custom folders must both be chosen
    /// before continuing.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.phase.is_interactive() && self.chosen_dirs().is_some()
    }

    /// Applies one event and returns the effects the caller must execute.
    pub fn handle(&mut self, event: SetupEvent) -> Vec<SetupEffect> {
        match event {
            SetupEvent::ChoiceMade(choice) => self.on_choice(choice),
            SetupEvent::InputDirChosen(None) | SetupEvent::OutputDirChosen(None) => {
                debug!("directory dialog dismissed");
                Vec::new()
            }
            SetupEvent::InputDirChosen(Some(dir)) => self.on_input_dir(dir),
            SetupEvent::OutputDirChosen(Some(dir)) => self.on_output_dir(dir),
            SetupEvent::ContinueRequested => self.on_continue(),
            SetupEvent::PersistSucceeded => self.on_persist_succeeded(),
            SetupEvent::PersistFailed(message) => self.on_persist_failed(message),
        }
    }

    fn on_choice(&mut self, choice: SetupChoice) -> Vec<SetupEffect> {
        if !self.phase.is_interactive() {
            warn!(phase = %self.phase, "ignoring layout choice");
            return Vec::new();
        }
        self.choice = choice;
        self.phase = match choice {
            SetupChoice::Defaults => SetupPhase::ChoosingMode,
            SetupChoice::Custom => SetupPhase::CollectingPaths,
        };
        Vec::new()
    }

    fn on_input_dir(&mut self, dir: PathBuf) -> Vec<SetupEffect> {
        if self.phase != SetupPhase::CollectingPaths {
            warn!(phase = %self.phase, "ignoring input folder outside path collection");
            return Vec::new();
        }
        debug!(dir = %dir.display(), "input folder chosen");
        self.custom_input = Some(dir);
        Vec::new()
    }

    fn on_output_dir(&mut self, dir: PathBuf) -> Vec<SetupEffect> {
        if self.phase != SetupPhase::CollectingPaths {
            warn!(phase = %self.phase, "ignoring output folder outside path collection");
            return Vec::new();
        }
        debug!(dir = %dir.display(), "output folder chosen");
        self.custom_output = Some(dir);
        Vec::new()
    }

    fn on_continue(&mut self) -> Vec<SetupEffect> {
        if !self.phase.is_interactive() {
            warn!(phase = %self.phase, "continue refused outside the dialog");
            return Vec::new();
        }
        let Some((input_dir, output_dir)) = self.chosen_dirs() else {
            warn!("continue refused: both folders must be chosen first");
            return Vec::new();
        };
        info!(
            choice = %self.choice,
            input = %input_dir.display(),
            output = %output_dir.display(),
            "finalizing setup"
        );
        self.last_error = None;
        self.phase = SetupPhase::Finalizing;
        vec![SetupEffect::PersistSettings {
            input_dir,
            output_dir,
        }]
    }

    fn on_persist_succeeded(&mut self) -> Vec<SetupEffect> {
        if self.phase != SetupPhase::Finalizing {
            warn!(phase = %self.phase, "ignoring persist confirmation");
            return Vec::new();
        }
        info!("setup complete");
        self.phase = SetupPhase::Closed;
        Vec::new()
    }

    fn on_persist_failed(&mut self, message: String) -> Vec<SetupEffect> {
        if self.phase != SetupPhase::Finalizing {
            warn!(phase = %self.phase, "ignoring persist failure report");
            return Vec::new();
        }
        warn!(error = %message, "setup persist failed");
        self.last_error = Some(message);
        // Back to where the user came from so they can retry.
        self.phase = match self.choice {
            SetupChoice::Defaults => SetupPhase::ChoosingMode,
            SetupChoice::Custom => SetupPhase::CollectingPaths,
        };
        Vec::new()
    }

    fn chosen_dirs(&self) -> Option<(PathBuf, PathBuf)> {
        match self.choice {
            SetupChoice::Defaults => {
                Some((self.default_input.clone(), self.default_output.clone()))
            }
            SetupChoice::Custom => self.custom_input.clone().zip(self.custom_output.clone()),
        }
    }
}
