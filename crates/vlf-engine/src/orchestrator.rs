//! Engine invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};
use vlf_types::{EngineStats, ErrorCode, FailureDetail, Mode, OperationOutcome};

use crate::{EngineError, EngineLocation};

/// Environment variable naming the configured input directory.
pub const ENV_INPUT_DIR: &str = "VLF_INPUT_DIR";

/// Environment variable naming the configured output directory.
pub const ENV_OUTPUT_DIR: &str = "VLF_OUTPUT_DIR";

/// Directories injected into the engine's environment so it resolves
/// relative paths consistently with the orchestrating session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEnv {
    /// Exported as `VLF_INPUT_DIR`.
    pub input_dir: PathBuf,

    /// Exported as `VLF_OUTPUT_DIR`.
    pub output_dir: PathBuf,
}

impl EngineEnv {
    /// Creates the environment from the configured directories.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Launches the engine and maps process results to typed outcomes.
///
/// One orchestrator serves both operation modes; each [`invoke`] is a
/// single attempt with no retry. The subprocess is awaited as a
/// cancellable task: when the optional timeout elapses the child is
/// killed and a timeout failure is returned.
///
/// # Example
///
/// ```no_run
/// use vlf_engine::{EngineEnv, EngineLocation, Orchestrator};
/// use vlf_types::Mode;
/// use std::path::Path;
///
/// # async fn run() {
/// let orchestrator = Orchestrator::new(
///     EngineLocation::Dev,
///     EngineEnv::new("/u/in", "/u/out"),
/// );
///
/// let outcome = orchestrator
///     .invoke(Mode::Forward, Path::new("/tmp/a.txt"), Path::new("/u/out/a_compressed.txt"))
///     .await;
/// if let Some(stats) = outcome.stats() {
///     println!("ratio {}", stats.ratio_display());
/// }
/// # }
/// ```
///
/// [`invoke`]: Self::invoke
#[derive(Debug, Clone)]
pub struct Orchestrator {
    location: EngineLocation,
    env: EngineEnv,
    timeout: Option<Duration>,
}

impl Orchestrator {
    /// Creates an orchestrator with no invocation timeout.
    #[must_use]
    pub fn new(location: EngineLocation, env: EngineEnv) -> Self {
        Self {
            location,
            env,
            timeout: None,
        }
    }

    /// Bounds every invocation; the child is killed when the bound
    /// elapses.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured location strategy.
    #[must_use]
    pub fn location(&self) -> &EngineLocation {
        &self.location
    }

    /// Runs one engine invocation and reports the outcome as data.
    ///
    /// This is the orchestrator boundary: every failure arrives as
    /// [`OperationOutcome::Failed`] with a stable code and a diagnostic
    /// message, never as an error the caller must not drop.
    pub async fn invoke(
        &self,
        mode: Mode,
        input_path: &Path,
        output_path: &Path,
    ) -> OperationOutcome {
        match self.try_invoke(mode, input_path, output_path).await {
            Ok(stats) => OperationOutcome::Succeeded(stats),
            Err(e) => {
                warn!(mode = %mode, code = e.code(), error = %e, "engine invocation failed");
                OperationOutcome::Failed(FailureDetail::new(e.code(), e.to_string()))
            }
        }
    }

    /// Runs one engine invocation, exposing the typed error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] for launch, engine, protocol, and timeout
    /// failures.
    pub async fn try_invoke(
        &self,
        mode: Mode,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<EngineStats, EngineError> {
        let binary = self.location.verify()?;

        debug!(
            binary = %binary.display(),
            mode = %mode,
            input = %input_path.display(),
            output = %output_path.display(),
            "invoking engine"
        );

        let mut cmd = Command::new(&binary);
        cmd.arg(mode.engine_command())
            .arg(input_path)
            .arg(output_path)
            .arg("--json")
            .env(ENV_INPUT_DIR, &self.env.input_dir)
            .env(ENV_OUTPUT_DIR, &self.env.output_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = self.location.working_dir() {
            cmd.current_dir(dir);
        }

        let child = cmd
            .spawn()
            .map_err(|e| EngineError::spawn_failed(&binary, e))?;

        let collected = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, collected).await {
                Ok(result) => result.map_err(|e| EngineError::WaitFailed { source: e })?,
                // Dropping the future kills the child (kill_on_drop).
                Err(_) => return Err(EngineError::TimedOut { limit }),
            },
            None => collected
                .await
                .map_err(|e| EngineError::WaitFailed { source: e })?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(EngineError::exit_failure(output.status.code(), &stderr));
        }

        let stats: EngineStats = serde_json::from_str(stdout.trim())
            .map_err(|e| EngineError::MalformedOutput { source: e })?;

        if !stats.success {
            let message = stats
                .error
                .unwrap_or_else(|| "engine reported failure".to_string());
            return Err(EngineError::Reported { message });
        }

        info!(
            mode = %mode,
            output_file = %stats.output_file,
            ratio = stats.compression_ratio,
            "engine invocation succeeded"
        );
        Ok(stats)
    }
}
