//! Engine statistics schema.
//!
//! The engine reports one JSON object on stdout per invocation. Forward and
//! inverse payloads share most fields but not all: forward reports
//! `original_size` and `space_saved_percent`, inverse reports
//! `decompressed_size`. Unknown fields are ignored so engine upgrades that
//! add fields do not break parsing.

use serde::{Deserialize, Serialize};

use crate::format_bytes;

/// Statistics payload parsed from the engine's stdout.
///
/// All numeric fields default to zero / absent so both payload shapes parse
/// with one schema. Fields are consumed verbatim for display; no derived
/// math happens on this side of the subprocess boundary.
///
/// # Example
///
/// ```
/// use vlf_types::EngineStats;
///
/// let json = r#"{
///     "success": true,
///     "original_size": 1000,
///     "compressed_size": 400,
///     "encoded_size": 640,
///     "character_count": 640,
///     "compression_ratio": 2.5,
///     "space_saved_percent": 36.0,
///     "output_file": "/out/a_compressed.txt"
/// }"#;
/// let stats: EngineStats = serde_json::from_str(json).unwrap();
/// assert_eq!(stats.ratio_display(), "2.5:1");
/// assert_eq!(stats.saved_display().as_deref(), Some("36%"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineStats {
    /// Engine-reported success flag. Absent reads as `true`; a parsed
    /// payload with `success: false` carries its reason in [`error`](Self::error).
    pub success: bool,

    /// Size of the original input in bytes (forward payloads).
    pub original_size: Option<u64>,

    /// Size after compression, before text encoding, in bytes.
    pub compressed_size: u64,

    /// Size of the encoded text in characters.
    pub encoded_size: u64,

    /// Size after decompression in bytes (inverse payloads).
    pub decompressed_size: Option<u64>,

    /// Transmittable character count.
    pub character_count: u64,

    /// Compression ratio, rendered as `"N:1"`.
    pub compression_ratio: f64,

    /// Percentage of space saved end to end (forward payloads).
    pub space_saved_percent: Option<f64>,

    /// End-to-end ratio including encoding overhead.
    pub overall_ratio: Option<f64>,

    /// Path of the input file as the engine saw it.
    pub input_file: Option<String>,

    /// Path the engine wrote its output to.
    pub output_file: String,

    /// Diagnostic text when `success` is `false`.
    pub error: Option<String>,
}

impl Default for EngineStats {
    fn default() -> Self {
        Self {
            success: true,
            original_size: None,
            compressed_size: 0,
            encoded_size: 0,
            decompressed_size: None,
            character_count: 0,
            compression_ratio: 0.0,
            space_saved_percent: None,
            overall_ratio: None,
            input_file: None,
            output_file: String::new(),
            error: None,
        }
    }
}

impl EngineStats {
    /// Compression ratio formatted for display, e.g. `"2.5:1"`.
    #[must_use]
    pub fn ratio_display(&self) -> String {
        format!("{}:1", self.compression_ratio)
    }

    /// Space saved formatted for display, e.g. `"60%"`.
    ///
    /// `None` for inverse payloads, which do not report it.
    #[must_use]
    pub fn saved_display(&self) -> Option<String> {
        self.space_saved_percent.map(|p| format!("{p}%"))
    }

    /// Original size formatted as a human-readable byte count.
    #[must_use]
    pub fn original_display(&self) -> Option<String> {
        self.original_size.map(format_bytes)
    }

    /// Compressed size formatted as a human-readable byte count.
    #[must_use]
    pub fn compressed_display(&self) -> String {
        format_bytes(self.compressed_size)
    }

    /// Encoded size formatted as a human-readable byte count.
    #[must_use]
    pub fn encoded_display(&self) -> String {
        format_bytes(self.encoded_size)
    }

    /// Decompressed size formatted as a human-readable byte count.
    #[must_use]
    pub fn decompressed_display(&self) -> Option<String> {
        self.decompressed_size.map(format_bytes)
    }
}
