//! The persisted configuration record.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config/data roots.
const APP_DIR: &str = "vlf-compress";

/// Settings file name.
const SETTINGS_FILE: &str = "settings.json";

/// The configuration record: where files are read and written, plus the
/// first-run flag.
///
/// Serialized field names are a wire contract shared with earlier releases;
/// they stay camelCase regardless of Rust naming.
///
/// # Example
///
/// ```
/// use vlf_settings::Settings;
///
/// let json = r#"{"inputDir": "/in", "outputDir": "/out", "firstRun": false}"#;
/// let settings: Settings = serde_json::from_str(json).unwrap();
/// assert!(!settings.first_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory the user's source files are expected in.
    #[serde(rename = "inputDir")]
    pub input_dir: PathBuf,

    /// Directory derived output paths point into.
    #[serde(rename = "outputDir")]
    pub output_dir: PathBuf,

    /// Whether setup still needs to run. A record missing this flag is
    /// treated as first-run; only an explicit `false` clears the gate.
    #[serde(rename = "firstRun", default = "default_true")]
    pub first_run: bool,
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Creates a resolved record with the given directories.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            first_run: false,
        }
    }

    /// Derives the default record under an application-data root.
    ///
    /// The returned record has `first_run = false`: a default configuration
    /// is considered resolved for the running session. It only reaches disk
    /// when the setup flow completes.
    #[must_use]
    pub fn default_under(root: &Path) -> Self {
        Self {
            input_dir: root.join("input"),
            output_dir: root.join("output"),
            first_run: false,
        }
    }
}

/// Returns the per-user application-data root for default directories.
#[must_use]
pub fn default_data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the fixed per-user settings file location.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(SETTINGS_FILE)
}

/// Expands `~` to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(rest) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
    }
    path.to_path_buf()
}
