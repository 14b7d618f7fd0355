use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use tracing::{info, warn};

use triage_core::Platform;
use triage_io::{CommandRunner, ToolCommand};

use crate::config::ImagingConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Created,
    /// The copy failed; `partial` is set when the run created or changed the
    /// destination file. It is not removed.
    Failed { message: String, partial: bool },
}

/// Builds the block-copy invocation with progress reporting enabled.
pub fn dd_command(platform: Platform, source: &str, config: &ImagingConfig) -> ToolCommand {
    let input = format!("if={}", source);
    let mut output = OsString::from("of=");
    output.push(&config.destination);
    let block_size = format!("bs={}", config.block_size);

    match platform {
        Platform::Linux => ToolCommand::new("sudo")
            .arg("dd")
            .arg(input)
            .arg(output)
            .arg(block_size)
            .arg("status=progress"),
        Platform::Windows => ToolCommand::new(".\\dd.exe")
            .arg(input)
            .arg(output)
            .arg(block_size)
            .arg("--progress"),
    }
}

/// Size and modification time of a file, or `None` when it does not exist.
type FileState = Option<(u64, Option<SystemTime>)>;

fn file_state(path: &Path) -> FileState {
    fs::metadata(path)
        .ok()
        .map(|meta| (meta.len(), meta.modified().ok()))
}

/// Runs the copy attached to the terminal so its progress is visible.
pub fn write_image<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &ToolCommand,
    destination: &Path,
) -> ImageOutcome {
    let before = file_state(destination);

    let message = match runner.run_attached(command) {
        Ok(Some(0)) => {
            info!(path = %destination.display(), "disk image created");
            return ImageOutcome::Created;
        }
        Ok(Some(code)) => format!("Command '{}' returned non-zero exit status {}.", command, code),
        Ok(None) => format!("Command '{}' was terminated by a signal.", command),
        Err(e) => format!("Command '{}' could not be started: {}", command, e),
    };

    let after = file_state(destination);
    let partial = after.is_some() && after != before;
    warn!(%command, partial, "block copy failed");
    ImageOutcome::Failed { message, partial }
}
