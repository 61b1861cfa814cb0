//! OS shell integration.
//!
//! Fire-and-forget launches of the platform file manager. The spawned
//! process is not awaited; a reveal that fails after launch is the file
//! manager's problem, not ours.

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Reveals a file in the platform file manager, selecting it when the
/// platform supports selection.
pub(crate) fn reveal_item(path: &Path) -> io::Result<()> {
    debug!(path = %path.display(), "revealing item in file manager");

    if cfg!(target_os = "macos") {
        Command::new("open").arg("-R").arg(path).spawn()?;
    } else if cfg!(windows) {
        Command::new("explorer")
            .arg(format!("/select,{}", path.display()))
            .spawn()?;
    } else {
        // No selection protocol over xdg-open; open the containing folder.
        let target = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path);
        Command::new("xdg-open").arg(target).spawn()?;
    }
    Ok(())
}

/// Opens a directory in the platform file manager.
pub(crate) fn open_folder(dir: &Path) -> io::Result<()> {
    debug!(dir = %dir.display(), "opening folder in file manager");

    if cfg!(target_os = "macos") {
        Command::new("open").arg(dir).spawn()?;
    } else if cfg!(windows) {
        Command::new("explorer").arg(dir).spawn()?;
    } else {
        Command::new("xdg-open").arg(dir).spawn()?;
    }
    Ok(())
}
