//! Core types for VLF Compress.
//!
//! This crate provides the foundational types shared by every layer of the
//! VLF Compress core: operation modes, the engine statistics schema, the
//! operation outcome consumed by workflow sessions, and the unified
//! [`ErrorCode`] interface.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 Foundation Layer                        │
//! ├────────────────────────────────────────────────────────┤
//! │  vlf-types    : Mode, EngineStats, OperationOutcome ◄── │
//! └────────────────────────────────────────────────────────┘
//!                            ↓
//! ┌────────────────────────────────────────────────────────┐
//! │                 Core Layer                              │
//! ├────────────────────────────────────────────────────────┤
//! │  vlf-settings : configuration record, first-run gate    │
//! │  vlf-engine   : subprocess orchestration                │
//! │  vlf-workflow : per-mode session + setup state machines │
//! └────────────────────────────────────────────────────────┘
//!                            ↓
//! ┌────────────────────────────────────────────────────────┐
//! │                 Application Layer                       │
//! ├────────────────────────────────────────────────────────┤
//! │  vlf-app      : capability surface, bootstrap           │
//! │  vlf-cli      : command-line driver                     │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use vlf_types::{Mode, OperationOutcome, FailureDetail};
//!
//! // The two transforms share one orchestration surface.
//! assert_eq!(Mode::Forward.engine_command(), "compress");
//! assert_eq!(Mode::Inverse.engine_command(), "decompress");
//!
//! // Failures are data, not panics.
//! let outcome = OperationOutcome::Failed(FailureDetail::new(
//!     "ENGINE_EXIT_FAILURE",
//!     "exited with status 1",
//! ));
//! assert!(!outcome.is_success());
//! ```

mod error;
mod format;
mod mode;
mod outcome;
mod stats;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use format::format_bytes;
pub use mode::Mode;
pub use outcome::{FailureDetail, OperationOutcome};
pub use stats::EngineStats;
