//! The application core: session wiring and command dispatch.
//!
//! [`App`] owns everything a frontend needs behind one async entry point,
//! [`App::dispatch`]. Construction reads the persisted record once and
//! decides which session runs:
//!
//! ```text
//! SettingsStore::is_first_run()
//!          │
//!     ┌────┴─────┐
//!   false       true
//!     │           │
//! MAIN_SESSION  SETUP_SESSION
//! (one workflow (SetupFlow holds the
//!  per mode)     defaults until persisted)
//! ```
//!
//! Completing setup swaps the capability set, rebuilds the workflow
//! sessions against the persisted directories, and drops the flow. No
//! directory is created at startup; that happens only when setup
//! finalizes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use vlf_engine::{EngineEnv, EngineLocation, Orchestrator};
use vlf_settings::{Settings, SettingsError, SettingsStore};
use vlf_types::Mode;
use vlf_workflow::{
    SetupChoice, SetupEffect, SetupEvent, SetupFlow, SetupPhase, WorkflowEffect, WorkflowEvent,
    WorkflowSession,
};

use crate::capability::Capability;
use crate::command::{AppCommand, AppResponse, SetupTarget};
use crate::error::AppError;
use crate::shell;

// ── Builder ──────────────────────────────────────────────────────────

/// Builder for [`App`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use vlf_app::App;
/// use vlf_engine::EngineLocation;
///
/// let app = App::builder()
///     .with_engine_location(EngineLocation::packaged("/opt/vlf/resources"))
///     .with_timeout(Duration::from_secs(120))
///     .build();
/// ```
pub struct AppBuilder {
    store: Option<SettingsStore>,
    location: EngineLocation,
    timeout: Option<Duration>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            store: None,
            location: EngineLocation::Dev,
            timeout: None,
        }
    }

    /// Uses an explicit settings store instead of the per-user default.
    #[must_use]
    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the engine location strategy. Defaults to
    /// [`EngineLocation::Dev`].
    #[must_use]
    pub fn with_engine_location(mut self, location: EngineLocation) -> Self {
        self.location = location;
        self
    }

    /// Bounds every engine invocation; unbounded when unset.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the application, choosing between the main and setup
    /// sessions from the persisted record.
    #[must_use]
    pub fn build(self) -> App {
        let store = self.store.unwrap_or_else(SettingsStore::at_default_location);
        let first_run = store.is_first_run();
        let settings = store.load().unwrap_or_else(SettingsStore::default_settings);

        info!(
            settings_path = %store.path().display(),
            first_run,
            engine = %self.location,
            "application starting"
        );

        let (granted, setup) = if first_run {
            let flow = SetupFlow::new(settings.input_dir.clone(), settings.output_dir.clone());
            (Capability::SETUP_SESSION, Some(flow))
        } else {
            (Capability::MAIN_SESSION, None)
        };

        let forward = WorkflowSession::new(Mode::Forward, settings.output_dir.clone());
        let inverse = WorkflowSession::new(Mode::Inverse, settings.output_dir.clone());
        let orchestrator = build_orchestrator(&self.location, &settings, self.timeout);

        App {
            store,
            settings,
            granted,
            setup,
            forward,
            inverse,
            orchestrator,
            location: self.location,
            timeout: self.timeout,
        }
    }
}

// ── App ──────────────────────────────────────────────────────────────

/// The application core.
///
/// Owns the settings store, the engine orchestrator, one workflow session
/// per mode, and the setup flow while it runs. All state changes go
/// through [`dispatch`](Self::dispatch), which gates every command on the
/// active session's capabilities before touching anything else.
pub struct App {
    store: SettingsStore,
    settings: Settings,
    granted: Capability,
    setup: Option<SetupFlow>,
    forward: WorkflowSession,
    inverse: WorkflowSession,
    orchestrator: Orchestrator,
    location: EngineLocation,
    timeout: Option<Duration>,
}

impl App {
    /// Starts building an application.
    #[must_use]
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// The resolved configuration record.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Capabilities the active session holds.
    #[must_use]
    pub fn granted(&self) -> Capability {
        self.granted
    }

    /// Returns `true` while the setup session is active.
    #[must_use]
    pub fn in_setup(&self) -> bool {
        self.setup.is_some()
    }

    /// The setup flow, while the setup session is active.
    #[must_use]
    pub fn setup(&self) -> Option<&SetupFlow> {
        self.setup.as_ref()
    }

    /// The workflow session for `mode`.
    #[must_use]
    pub fn session(&self, mode: Mode) -> &WorkflowSession {
        match mode {
            Mode::Forward => &self.forward,
            Mode::Inverse => &self.inverse,
        }
    }

    fn session_mut(&mut self, mode: Mode) -> &mut WorkflowSession {
        match mode {
            Mode::Forward => &mut self.forward,
            Mode::Inverse => &mut self.inverse,
        }
    }

    /// Dispatches one command against the active session.
    ///
    /// The capability gate runs first: a command the session does not hold
    /// is rejected with [`AppError::PermissionDenied`] before any state is
    /// read or changed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] for permission, readiness, setup, persistence,
    /// and shell failures. A failed engine operation is not an error here:
    /// it arrives as a failed
    /// [`OperationOutcome`](vlf_types::OperationOutcome) inside
    /// [`AppResponse::Outcome`].
    pub async fn dispatch(&mut self, command: AppCommand) -> Result<AppResponse, AppError> {
        let required = command.required_capability();
        if !self.granted.contains(required) {
            return Err(AppError::permission_denied(command.name(), required));
        }
        debug!(command = command.name(), "dispatching");

        match command {
            AppCommand::SelectFile { mode, path } => {
                self.session_mut(mode)
                    .handle(WorkflowEvent::FileChosen(path));
                Ok(AppResponse::Applied)
            }
            AppCommand::SelectSavePath { mode, path } => {
                self.session_mut(mode)
                    .handle(WorkflowEvent::SavePathChosen(path));
                Ok(AppResponse::Applied)
            }
            AppCommand::ClearFile { mode } => {
                self.session_mut(mode).handle(WorkflowEvent::Cleared);
                Ok(AppResponse::Applied)
            }
            AppCommand::Run { mode } => self.run_operation(mode).await,
            AppCommand::Reveal { path } => {
                match path {
                    Some(path) => shell::reveal_item(&path)?,
                    // Without a target, open the configured output folder.
                    None => shell::open_folder(&self.settings.output_dir)?,
                }
                Ok(AppResponse::Applied)
            }
            AppCommand::ReadConfig => Ok(AppResponse::Settings(self.settings.clone())),
            AppCommand::SelectDirectory { target, path } => self.select_directory(target, path),
            AppCommand::CompleteSetup {
                use_default,
                input_dir,
                output_dir,
            } => self.complete_setup(use_default, input_dir, output_dir),
        }
    }

    /// Starts the session's operation, awaits the engine, and feeds the
    /// outcome back into the session.
    async fn run_operation(&mut self, mode: Mode) -> Result<AppResponse, AppError> {
        let effects = self.session_mut(mode).handle(WorkflowEvent::StartRequested);
        let Some(WorkflowEffect::RunOperation {
            input_path,
            output_path,
            ..
        }) = effects.into_iter().next()
        else {
            return Err(AppError::SessionNotReady {
                mode,
                phase: self.session(mode).phase(),
            });
        };

        let outcome = self
            .orchestrator
            .invoke(mode, &input_path, &output_path)
            .await;
        self.session_mut(mode)
            .handle(WorkflowEvent::OperationFinished(outcome.clone()));
        Ok(AppResponse::Outcome(outcome))
    }

    fn select_directory(
        &mut self,
        target: SetupTarget,
        path: Option<PathBuf>,
    ) -> Result<AppResponse, AppError> {
        let Some(flow) = self.setup.as_mut() else {
            return Err(AppError::Setup("setup is not running".into()));
        };

        // Browsing for a folder implies the custom layout.
        if flow.phase() == SetupPhase::ChoosingMode {
            flow.handle(SetupEvent::ChoiceMade(SetupChoice::Custom));
        }
        let event = match target {
            SetupTarget::Input => SetupEvent::InputDirChosen(path),
            SetupTarget::Output => SetupEvent::OutputDirChosen(path),
        };
        flow.handle(event);
        Ok(AppResponse::Applied)
    }

    fn complete_setup(
        &mut self,
        use_default: bool,
        input_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<AppResponse, AppError> {
        let Some(flow) = self.setup.as_mut() else {
            return Err(AppError::Setup("setup is not running".into()));
        };

        if use_default {
            if flow.choice() != SetupChoice::Defaults {
                flow.handle(SetupEvent::ChoiceMade(SetupChoice::Defaults));
            }
        } else {
            if flow.choice() != SetupChoice::Custom {
                flow.handle(SetupEvent::ChoiceMade(SetupChoice::Custom));
            }
            if let Some(dir) = input_dir {
                flow.handle(SetupEvent::InputDirChosen(Some(dir)));
            }
            if let Some(dir) = output_dir {
                flow.handle(SetupEvent::OutputDirChosen(Some(dir)));
            }
        }

        let effects = flow.handle(SetupEvent::ContinueRequested);
        let Some(SetupEffect::PersistSettings {
            input_dir,
            output_dir,
        }) = effects.into_iter().next()
        else {
            return Err(AppError::Setup(
                "both input and output directories are required".into(),
            ));
        };

        match persist_settings(&self.store, &input_dir, &output_dir) {
            Ok(settings) => {
                flow.handle(SetupEvent::PersistSucceeded);
                self.adopt_settings(settings);
                Ok(AppResponse::Settings(self.settings.clone()))
            }
            Err(e) => {
                flow.handle(SetupEvent::PersistFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Swaps in the persisted record: main-session capabilities, fresh
    /// workflow sessions, and an orchestrator bound to the new directories.
    fn adopt_settings(&mut self, settings: Settings) {
        info!(
            input_dir = %settings.input_dir.display(),
            output_dir = %settings.output_dir.display(),
            "settings adopted, main session active"
        );
        self.forward = WorkflowSession::new(Mode::Forward, settings.output_dir.clone());
        self.inverse = WorkflowSession::new(Mode::Inverse, settings.output_dir.clone());
        self.orchestrator = build_orchestrator(&self.location, &settings, self.timeout);
        self.settings = settings;
        self.granted = Capability::MAIN_SESSION;
        self.setup = None;
    }
}

/// Creates both directories recursively, then writes the record with the
/// first-run flag cleared.
fn persist_settings(
    store: &SettingsStore,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Settings, SettingsError> {
    std::fs::create_dir_all(input_dir).map_err(|e| SettingsError::create_dir(input_dir, e))?;
    std::fs::create_dir_all(output_dir).map_err(|e| SettingsError::create_dir(output_dir, e))?;

    let settings = Settings::new(input_dir, output_dir);
    store.save(&settings)?;
    Ok(settings)
}

fn build_orchestrator(
    location: &EngineLocation,
    settings: &Settings,
    timeout: Option<Duration>,
) -> Orchestrator {
    let orchestrator = Orchestrator::new(
        location.clone(),
        EngineEnv::new(&settings.input_dir, &settings.output_dir),
    );
    match timeout {
        Some(limit) => orchestrator.with_timeout(limit),
        None => orchestrator,
    }
}
