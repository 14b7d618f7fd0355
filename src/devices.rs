use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::{debug, warn};

use triage_core::listing::parse_disk_listing;
use triage_core::selection::{disk_menu, resolve_selection};
use triage_core::{CoreError, DiskRecord, Platform};
use triage_io::{CommandRunner, ToolCommand};

pub fn listing_command(platform: Platform) -> ToolCommand {
    match platform {
        Platform::Linux => ToolCommand::new("lsblk").args(["-d", "-o", "NAME,SIZE,MODEL"]),
        Platform::Windows => {
            ToolCommand::new("wmic").args(["diskdrive", "get", "Index,Model,Size,MediaType"])
        }
    }
}

/// Lists physical disks in the order the platform tool reports them.
///
/// A listing tool that cannot be run or exits non-zero yields an empty
/// list; [`require_disks`] turns that into the fatal error.
pub fn enumerate_disks<R: CommandRunner + ?Sized>(runner: &R, platform: Platform) -> Vec<DiskRecord> {
    let command = listing_command(platform);

    let output = match runner.capture(&command) {
        Ok(output) => output,
        Err(e) => {
            warn!(%command, error = %e, "disk listing failed to start");
            return Vec::new();
        }
    };
    if !output.success() {
        warn!(%command, failure = %output.failure_message(), "disk listing exited with an error");
        return Vec::new();
    }

    let disks = parse_disk_listing(platform, &output.stdout);
    debug!(%platform, count = disks.len(), "disks enumerated");
    disks
}

/// Enumerates disks and fails with `NoDevicesFound` when there are none.
pub fn require_disks<R: CommandRunner + ?Sized>(
    runner: &R,
    platform: Platform,
) -> Result<Vec<DiskRecord>, CoreError> {
    let disks = enumerate_disks(runner, platform);
    if disks.is_empty() {
        return Err(CoreError::NoDevicesFound);
    }
    Ok(disks)
}

pub fn print_disk_menu(platform: Platform, disks: &[DiskRecord]) {
    println!("Available Disks:");
    for line in disk_menu(platform, disks) {
        println!("{}", line);
    }
}

/// Shows the disk list and asks once for a disk number.
pub fn prompt_selection(platform: Platform, disks: &[DiskRecord]) -> Result<String> {
    print_disk_menu(platform, disks);
    println!();

    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the number of the disk you want to image")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read disk selection")?;

    Ok(resolve_selection(platform, disks, &answer)?)
}
