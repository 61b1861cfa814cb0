//! Engine binary resolution.
//!
//! Where the engine executable lives depends on how the application is
//! running. Development builds rely on the system path; packaged builds
//! ship the binary under a fixed resources subdirectory.

use std::path::{Path, PathBuf};

use crate::EngineError;

/// Base name of the engine executable, platform-suffixed.
pub const ENGINE_BINARY: &str = if cfg!(windows) {
    "vlf_compress_core.exe"
} else {
    "vlf_compress_core"
};

/// Subdirectory of the resources root holding the bundled engine.
const BUNDLE_DIR: &str = "engine";

/// Strategy for locating the engine executable.
///
/// # Example
///
/// ```
/// use vlf_engine::EngineLocation;
/// use std::path::PathBuf;
///
/// let dev = EngineLocation::Dev;
/// assert_eq!(dev.resolve(), PathBuf::from("vlf_compress_core"));
///
/// let packaged = EngineLocation::packaged("/opt/vlf/resources");
/// assert_eq!(
///     packaged.resolve(),
///     PathBuf::from("/opt/vlf/resources/engine/vlf_compress_core")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineLocation {
    /// Development context: the well-known binary name, looked up on the
    /// system path at spawn time.
    Dev,

    /// Packaged context: the bundled executable under the application's
    /// resources directory. Existence is verified before launch.
    Packaged { resources_dir: PathBuf },

    /// An explicit binary path supplied by the operator. Verified like a
    /// packaged binary.
    Explicit { binary: PathBuf },
}

impl EngineLocation {
    /// Creates a packaged location rooted at `resources_dir`.
    #[must_use]
    pub fn packaged(resources_dir: impl Into<PathBuf>) -> Self {
        Self::Packaged {
            resources_dir: resources_dir.into(),
        }
    }

    /// Creates an explicit location for a known binary path.
    #[must_use]
    pub fn explicit(binary: impl Into<PathBuf>) -> Self {
        Self::Explicit {
            binary: binary.into(),
        }
    }

    /// Resolves the path handed to the process spawner.
    ///
    /// For [`Dev`](Self::Dev) this is the bare binary name; the system
    /// path lookup happens at spawn time.
    #[must_use]
    pub fn resolve(&self) -> PathBuf {
        match self {
            Self::Dev => PathBuf::from(ENGINE_BINARY),
            Self::Packaged { resources_dir } => {
                resources_dir.join(BUNDLE_DIR).join(ENGINE_BINARY)
            }
            Self::Explicit { binary } => binary.clone(),
        }
    }

    /// Resolves and verifies the binary can plausibly be launched.
    ///
    /// Packaged and explicit locations fail with
    /// [`EngineError::BinaryMissing`] before any spawn is attempted. The
    /// dev lookup cannot be verified ahead of time; a bad name surfaces as
    /// a spawn failure instead.
    pub fn verify(&self) -> Result<PathBuf, EngineError> {
        let path = self.resolve();
        match self {
            Self::Dev => Ok(path),
            Self::Packaged { .. } | Self::Explicit { .. } => {
                if path.exists() {
                    Ok(path)
                } else {
                    Err(EngineError::BinaryMissing { path })
                }
            }
        }
    }

    /// Working directory for the child, when the location pins one.
    ///
    /// Packaged engines run from their bundle directory so sibling
    /// resources resolve; other locations inherit the parent's directory.
    #[must_use]
    pub fn working_dir(&self) -> Option<PathBuf> {
        match self {
            Self::Packaged { .. } => self.resolve().parent().map(Path::to_path_buf),
            Self::Dev | Self::Explicit { .. } => None,
        }
    }
}

impl std::fmt::Display for EngineLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dev => write!(f, "dev ({ENGINE_BINARY})"),
            Self::Packaged { resources_dir } => {
                write!(f, "packaged ({})", resources_dir.display())
            }
            Self::Explicit { binary } => write!(f, "explicit ({})", binary.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn dev_resolves_to_bare_name() {
        assert_eq!(EngineLocation::Dev.resolve(), PathBuf::from(ENGINE_BINARY));
        assert!(EngineLocation::Dev.working_dir().is_none());
    }

    #[test]
    fn dev_verify_defers_to_spawn() {
        // No existence check is possible for a path lookup.
        assert!(EngineLocation::Dev.verify().is_ok());
    }

    #[test]
    fn packaged_resolves_under_bundle_dir() {
        let location = EngineLocation::packaged("/opt/app/resources");
        let resolved = location.resolve();
        assert!(resolved.starts_with("/opt/app/resources/engine"));
        assert!(resolved.ends_with(ENGINE_BINARY));
    }

    #[test]
    fn packaged_missing_binary_fails_verify() {
        let dir = TempDir::new().expect("create temp dir");
        let location = EngineLocation::packaged(dir.path());

        match location.verify() {
            Err(EngineError::BinaryMissing { path }) => {
                assert!(path.starts_with(dir.path()));
            }
            other => panic!("expected BinaryMissing, got: {other:?}"),
        }
    }

    #[test]
    fn packaged_present_binary_verifies() {
        let dir = TempDir::new().expect("create temp dir");
        let bundle = dir.path().join(BUNDLE_DIR);
        std::fs::create_dir_all(&bundle).expect("create bundle dir");
        std::fs::write(bundle.join(ENGINE_BINARY), b"").expect("touch binary");

        let location = EngineLocation::packaged(dir.path());
        let verified = location.verify().expect("should verify");
        assert_eq!(verified, bundle.join(ENGINE_BINARY));
        assert_eq!(location.working_dir(), Some(bundle));
    }

    #[test]
    fn explicit_is_verified() {
        let location = EngineLocation::explicit("/nowhere/engine");
        assert!(matches!(
            location.verify(),
            Err(EngineError::BinaryMissing { .. })
        ));
    }

    #[test]
    fn display_names_strategy() {
        assert!(EngineLocation::Dev.to_string().starts_with("dev"));
        assert!(EngineLocation::packaged("/r")
            .to_string()
            .starts_with("packaged"));
    }
}
