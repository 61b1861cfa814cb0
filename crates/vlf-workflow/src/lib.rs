//! Workflow state machines for VLF Compress.
//!
//! Two machines live here, both pure dispatch: events go in through
//! `handle`, the machine mutates, and side-effect instructions come out for
//! the caller to execute. Nothing in this crate touches the filesystem or
//! spawns processes, so every lifecycle is testable without a rendering
//! surface or a real engine.
//!
//! - [`WorkflowSession`] — one per operation mode, tracking a file from
//!   selection through engine invocation to result display.
//! - [`SetupFlow`] — the one-time first-run bootstrap that establishes the
//!   configuration record before the main session starts.

mod phase;
mod session;
mod setup;

pub use phase::WorkflowPhase;
pub use session::{derive_output_path, WorkflowEffect, WorkflowEvent, WorkflowSession};
pub use setup::{SetupChoice, SetupEffect, SetupEvent, SetupFlow, SetupPhase};
