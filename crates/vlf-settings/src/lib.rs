//! Settings persistence for VLF Compress.
//!
//! One small JSON record decides where the application reads and writes
//! user files, and whether the one-time setup flow must run first:
//!
//! ```json
//! { "inputDir": "...", "outputDir": "...", "firstRun": false }
//! ```
//!
//! The record lives at a fixed per-user location
//! (`<config-dir>/vlf-compress/settings.json`). Absence or a parse failure
//! is not an error: it means "no configuration", which triggers first-run
//! behavior. Writes are atomic (temp file, then rename) and create parent
//! directories as needed.
//!
//! # Example
//!
//! ```no_run
//! use vlf_settings::SettingsStore;
//!
//! let store = SettingsStore::at_default_location();
//! if store.is_first_run() {
//!     // run setup flow, then:
//!     let settings = SettingsStore::default_settings();
//!     store.save(&settings)?;
//! }
//! # Ok::<(), vlf_settings::SettingsError>(())
//! ```

mod error;
mod record;
mod store;

pub use error::SettingsError;
pub use record::{default_data_root, default_settings_path, expand_tilde, Settings};
pub use store::SettingsStore;
