//! Settings file persistence.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{default_settings_path, Settings, SettingsError};

/// Reads and writes the settings record at one fixed location.
///
/// Loading fails soft: any read or parse problem logs its cause and reads
/// as "no configuration". Saving is atomic — the record is written to a
/// temp file beside the target and renamed into place.
///
/// # Example
///
/// ```
/// use vlf_settings::{Settings, SettingsStore};
/// # let dir = tempfile::tempdir().unwrap();
/// # let path = dir.path().join("settings.json");
///
/// let store = SettingsStore::new(path);
/// assert!(store.is_first_run());
///
/// store.save(&Settings::new("/in", "/out"))?;
/// assert!(!store.is_first_run());
/// # Ok::<(), vlf_settings::SettingsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store backed by an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the fixed per-user location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(default_settings_path())
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted record, or `None` when it is absent or broken.
    #[must_use]
    pub fn load(&self) -> Option<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No settings file");
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read settings");
                return None;
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!(
                    input_dir = %settings.input_dir.display(),
                    output_dir = %settings.output_dir.display(),
                    first_run = settings.first_run,
                    "Loaded settings"
                );
                Some(settings)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse settings");
                None
            }
        }
    }

    /// Persists the record, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the parent directory cannot be created
    /// or the file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::create_dir(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(settings)?;
        let temp_path = self.temp_path();

        std::fs::write(&temp_path, &json).map_err(|e| SettingsError::write_file(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| SettingsError::write_file(&self.path, e))?;

        debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    /// Returns `true` when no record exists or its flag is not explicitly
    /// `false`. This is the single gate that decides whether setup runs.
    #[must_use]
    pub fn is_first_run(&self) -> bool {
        self.load().map_or(true, |settings| settings.first_run)
    }

    /// Derives the default record from the per-user application-data root.
    #[must_use]
    pub fn default_settings() -> Settings {
        Settings::default_under(&crate::default_data_root())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("settings.json");
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}
