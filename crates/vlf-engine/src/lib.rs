//! Engine subprocess orchestration for VLF Compress.
//!
//! The transform engine is an external executable reached only through a
//! command-line boundary. This crate owns that boundary:
//!
//! ```text
//! EngineLocation (dev | packaged | explicit)
//!   → resolved binary path (packaged: existence checked before launch)
//!   → <operation> <inputPath> <outputPath> --json
//!     env: VLF_INPUT_DIR, VLF_OUTPUT_DIR
//!   → exit 0 → parse stdout JSON  → EngineStats
//!     exit ≠0 → stderr (or generic) → EngineError
//! ```
//!
//! Every invocation is a single attempt; retry policy belongs to the
//! operator, not this layer. Failures come back as data
//! ([`OperationOutcome::Failed`](vlf_types::OperationOutcome)), never as
//! panics.

mod error;
mod location;
mod orchestrator;

pub use error::EngineError;
pub use location::{EngineLocation, ENGINE_BINARY};
pub use orchestrator::{EngineEnv, Orchestrator, ENV_INPUT_DIR, ENV_OUTPUT_DIR};
