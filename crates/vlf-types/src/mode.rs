//! Operation modes.
//!
//! The two user-facing transforms are identical at the orchestration layer;
//! only the engine subcommand and the derived output suffix differ.

use serde::{Deserialize, Serialize};

/// Direction of the transform a workflow session runs.
///
/// # Example
///
/// ```
/// use vlf_types::Mode;
///
/// assert_eq!(Mode::Forward.engine_command(), "compress");
/// assert_eq!(Mode::Inverse.output_suffix(), "_decompressed.txt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Compress an input file and report statistics.
    Forward,

    /// Invert the transform on a previously encoded file.
    Inverse,
}

impl Mode {
    /// Both modes, in display order.
    pub const ALL: [Self; 2] = [Self::Forward, Self::Inverse];

    /// The positional subcommand handed to the engine binary.
    #[must_use]
    pub fn engine_command(&self) -> &'static str {
        match self {
            Self::Forward => "compress",
            Self::Inverse => "decompress",
        }
    }

    /// Suffix appended to the input base name when deriving an output path.
    #[must_use]
    pub fn output_suffix(&self) -> &'static str {
        match self {
            Self::Forward => "_compressed.txt",
            Self::Inverse => "_decompressed.txt",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Inverse => write!(f, "inverse"),
        }
    }
}
