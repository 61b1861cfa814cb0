//! Application commands and their responses.
//!
//! Every operation a frontend can invoke is a variant of [`AppCommand`].
//! Commands carry their wire name and the [`Capability`] they require, so
//! the dispatcher can gate them uniformly before touching any state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vlf_settings::Settings;
use vlf_types::{Mode, OperationOutcome};

use crate::capability::Capability;

/// Which directory a setup-time selection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupTarget {
    /// The default location operations read from.
    Input,
    /// The default location operations write to.
    Output,
}

/// A command presented to the application.
///
/// Dialog-backed commands carry the dialog's result: `None` means the user
/// dismissed the dialog and the command is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum AppCommand {
    /// Choose an input file for the given session.
    SelectFile {
        mode: Mode,
        /// Dialog result; `None` when dismissed.
        path: Option<PathBuf>,
    },
    /// Choose an explicit save path for the given session.
    SelectSavePath {
        mode: Mode,
        /// Dialog result; `None` when dismissed.
        path: Option<PathBuf>,
    },
    /// Clear the given session back to its empty state.
    ClearFile { mode: Mode },
    /// Run the given session's operation on its selected paths.
    Run { mode: Mode },
    /// Reveal a path in the OS file manager, or the output directory when
    /// no path is given.
    Reveal { path: Option<PathBuf> },
    /// Read the current configuration record.
    ReadConfig,
    /// Choose a custom directory during setup.
    SelectDirectory {
        target: SetupTarget,
        /// Dialog result; `None` when dismissed.
        path: Option<PathBuf>,
    },
    /// Finalize setup with the default directories or the collected
    /// custom ones.
    CompleteSetup {
        use_default: bool,
        input_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    },
}

impl AppCommand {
    /// Returns the command's wire name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectFile { .. } => "select-file",
            Self::SelectSavePath { .. } => "save-dialog",
            Self::ClearFile { .. } => "clear-file",
            Self::Run { mode: Mode::Forward } => "compress-file",
            Self::Run { mode: Mode::Inverse } => "decompress-file",
            Self::Reveal { .. } => "show-item-in-folder",
            Self::ReadConfig => "get-settings",
            Self::SelectDirectory { .. } => "select-directory",
            Self::CompleteSetup { .. } => "complete-setup",
        }
    }

    /// Returns the capability a session must hold to dispatch this command.
    #[must_use]
    pub fn required_capability(&self) -> Capability {
        match self {
            Self::SelectFile { .. } | Self::ClearFile { .. } => Capability::SELECT_FILE,
            Self::SelectSavePath { .. } => Capability::SELECT_SAVE_PATH,
            Self::Run { mode: Mode::Forward } => Capability::RUN_FORWARD,
            Self::Run { mode: Mode::Inverse } => Capability::RUN_INVERSE,
            Self::Reveal { .. } => Capability::REVEAL,
            Self::ReadConfig => Capability::READ_CONFIG,
            Self::SelectDirectory { .. } => Capability::SELECT_DIRECTORY,
            Self::CompleteSetup { .. } => Capability::COMPLETE_SETUP,
        }
    }
}

/// What a successfully dispatched command produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppResponse {
    /// The command was applied; there is nothing further to report.
    Applied,
    /// The current configuration record.
    Settings(Settings),
    /// The outcome of a finished operation.
    Outcome(OperationOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_the_wire_protocol() {
        let cases = [
            (
                AppCommand::SelectFile {
                    mode: Mode::Forward,
                    path: None,
                },
                "select-file",
            ),
            (
                AppCommand::SelectSavePath {
                    mode: Mode::Forward,
                    path: None,
                },
                "save-dialog",
            ),
            (AppCommand::ClearFile { mode: Mode::Inverse }, "clear-file"),
            (AppCommand::Run { mode: Mode::Forward }, "compress-file"),
            (AppCommand::Run { mode: Mode::Inverse }, "decompress-file"),
            (AppCommand::Reveal { path: None }, "show-item-in-folder"),
            (AppCommand::ReadConfig, "get-settings"),
            (
                AppCommand::SelectDirectory {
                    target: SetupTarget::Input,
                    path: None,
                },
                "select-directory",
            ),
            (
                AppCommand::CompleteSetup {
                    use_default: true,
                    input_dir: None,
                    output_dir: None,
                },
                "complete-setup",
            ),
        ];
        for (command, expected) in cases {
            assert_eq!(command.name(), expected);
        }
    }

    #[test]
    fn main_session_grants_every_main_command() {
        let commands = [
            AppCommand::SelectFile {
                mode: Mode::Forward,
                path: None,
            },
            AppCommand::ClearFile { mode: Mode::Forward },
            AppCommand::Run { mode: Mode::Inverse },
            AppCommand::Reveal { path: None },
            AppCommand::ReadConfig,
        ];
        for command in commands {
            assert!(
                Capability::MAIN_SESSION.contains(command.required_capability()),
                "main session should grant {}",
                command.name()
            );
            assert!(
                !Capability::SETUP_SESSION.contains(command.required_capability()),
                "setup session should not grant {}",
                command.name()
            );
        }
    }

    #[test]
    fn setup_session_grants_only_setup_commands() {
        let commands = [
            AppCommand::SelectDirectory {
                target: SetupTarget::Output,
                path: None,
            },
            AppCommand::CompleteSetup {
                use_default: false,
                input_dir: None,
                output_dir: None,
            },
        ];
        for command in commands {
            assert!(Capability::SETUP_SESSION.contains(command.required_capability()));
            assert!(!Capability::MAIN_SESSION.contains(command.required_capability()));
        }
    }
}
