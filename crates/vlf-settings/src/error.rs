//! Settings errors.

use std::path::PathBuf;
use thiserror::Error;
use vlf_types::ErrorCode;

/// Errors raised when persisting or resolving settings.
///
/// Reads never produce these: a missing or unreadable record is "no
/// configuration", handled by [`SettingsStore::load`](crate::SettingsStore::load)
/// returning `None`.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to serialize the record.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the settings file.
    #[error("failed to write settings file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    /// Creates a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a create dir error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for SettingsError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialize(_) => "SETTINGS_SERIALIZE_FAILED",
            Self::WriteFile { .. } => "SETTINGS_WRITE_FAILED",
            Self::CreateDir { .. } => "SETTINGS_DIR_CREATE_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Serialize(_) => false,
            Self::WriteFile { .. } | Self::CreateDir { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlf_types::assert_error_code;

    #[test]
    fn error_display_names_path() {
        let err = SettingsError::write_file(
            "/etc/vlf/settings.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/etc/vlf/settings.json"));
    }

    #[test]
    fn error_codes_follow_conventions() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "x");
        assert_error_code(&SettingsError::write_file("/p", io()), "SETTINGS_");
        assert_error_code(&SettingsError::create_dir("/p", io()), "SETTINGS_");
    }

    #[test]
    fn write_failures_are_recoverable() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "x");
        assert!(SettingsError::write_file("/p", io).is_recoverable());
    }
}
