//! VLF Compress application layer.
//!
//! Ties the workspace together behind one dispatcher: capability-gated
//! commands in, typed responses and operation outcomes out.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  vlf-types (modes, outcomes, stats, error codes)            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  vlf-settings (persistence)   vlf-engine (subprocess)       │
//! │  vlf-workflow (session + setup state machines)              │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Application Layer  ◄── HERE                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  vlf-app (App::dispatch, capabilities, AppError)            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Frontend Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  vlf-cli (uses AppError → anyhow/stderr)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Sessions
//!
//! The application always runs exactly one of two sessions. A resolved
//! configuration record starts the main session: two independent workflow
//! sessions (forward and inverse) plus settings reads and shell reveals.
//! A missing or unresolved record starts the setup session instead, which
//! can only collect directories and finalize; every main-session command
//! is rejected until setup persists.

mod app;
mod capability;
mod command;
mod error;
mod shell;

pub use app::{App, AppBuilder};
pub use capability::Capability;
pub use command::{AppCommand, AppResponse, SetupTarget};
pub use error::AppError;

// Re-export the service layer frontends build against.
pub use vlf_engine::EngineLocation;
pub use vlf_settings::{expand_tilde, Settings, SettingsStore};
pub use vlf_types::{EngineStats, ErrorCode, Mode, OperationOutcome};
pub use vlf_workflow::{SetupChoice, SetupFlow, SetupPhase, WorkflowPhase, WorkflowSession};
