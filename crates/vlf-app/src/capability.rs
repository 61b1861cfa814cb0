//! Capability-based command gating.
//!
//! Two isolated capability sets exist: the main session's and the setup
//! session's. A command presented to a session whose set does not grant it
//! is rejected with a typed permission error, never silently dropped.
//!
//! # Example
//!
//! ```
//! use vlf_app::Capability;
//!
//! let main = Capability::MAIN_SESSION;
//! assert!(main.contains(Capability::RUN_FORWARD));
//! assert!(!main.contains(Capability::COMPLETE_SETUP));
//!
//! let setup = Capability::SETUP_SESSION;
//! assert!(setup.contains(Capability::SELECT_DIRECTORY));
//! assert!(!setup.contains(Capability::RUN_FORWARD));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Logical capabilities gating application commands.
    ///
    /// Each capability admits the commands listed; the active session holds
    /// exactly one of the two composed sets.
    ///
    /// | Capability | Commands |
    /// |------------|----------|
    /// | [`SELECT_FILE`](Self::SELECT_FILE) | `select-file`, `clear-file` |
    /// | [`SELECT_SAVE_PATH`](Self::SELECT_SAVE_PATH) | `save-dialog` |
    /// | [`REVEAL`](Self::REVEAL) | `show-item-in-folder` |
    /// | [`READ_CONFIG`](Self::READ_CONFIG) | `get-settings` |
    /// | [`RUN_FORWARD`](Self::RUN_FORWARD) | `compress-file` |
    /// | [`RUN_INVERSE`](Self::RUN_INVERSE) | `decompress-file` |
    /// | [`SELECT_DIRECTORY`](Self::SELECT_DIRECTORY) | `select-directory` |
    /// | [`COMPLETE_SETUP`](Self::COMPLETE_SETUP) | `complete-setup` |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capability: u8 {
        /// Pick or clear a workflow input file: `select-file`, `clear-file`
        const SELECT_FILE      = 0b0000_0001;
        /// Pick an output save path: `save-dialog`
        const SELECT_SAVE_PATH = 0b0000_0010;
        /// Reveal a file or folder in the OS shell: `show-item-in-folder`
        const REVEAL           = 0b0000_0100;
        /// Read the configuration record: `get-settings`
        const READ_CONFIG      = 0b0000_1000;
        /// Run a forward operation: `compress-file`
        const RUN_FORWARD      = 0b0001_0000;
        /// Run an inverse operation: `decompress-file`
        const RUN_INVERSE      = 0b0010_0000;
        /// Pick a directory during setup: `select-directory`
        const SELECT_DIRECTORY = 0b0100_0000;
        /// Finalize setup: `complete-setup`
        const COMPLETE_SETUP   = 0b1000_0000;
    }
}

impl Capability {
    /// Everything the main session may do.
    pub const MAIN_SESSION: Self = Self::SELECT_FILE
        .union(Self::SELECT_SAVE_PATH)
        .union(Self::REVEAL)
        .union(Self::READ_CONFIG)
        .union(Self::RUN_FORWARD)
        .union(Self::RUN_INVERSE);

    /// Everything the setup session may do.
    pub const SETUP_SESSION: Self = Self::SELECT_DIRECTORY.union(Self::COMPLETE_SETUP);

    /// Returns a human-readable list of capability names.
    ///
    /// # Example
    ///
    /// ```
    /// use vlf_app::Capability;
    ///
    /// let caps = Capability::SELECT_FILE | Capability::REVEAL;
    /// let names = caps.names();
    /// assert!(names.contains(&"SELECT_FILE"));
    /// assert!(names.contains(&"REVEAL"));
    /// ```
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::SELECT_FILE) {
            names.push("SELECT_FILE");
        }
        if self.contains(Self::SELECT_SAVE_PATH) {
            names.push("SELECT_SAVE_PATH");
        }
        if self.contains(Self::REVEAL) {
            names.push("REVEAL");
        }
        if self.contains(Self::READ_CONFIG) {
            names.push("READ_CONFIG");
        }
        if self.contains(Self::RUN_FORWARD) {
            names.push("RUN_FORWARD");
        }
        if self.contains(Self::RUN_INVERSE) {
            names.push("RUN_INVERSE");
        }
        if self.contains(Self::SELECT_DIRECTORY) {
            names.push("SELECT_DIRECTORY");
        }
        if self.contains(Self::COMPLETE_SETUP) {
            names.push("COMPLETE_SETUP");
        }
        names
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}
