use crate::error::{CoreError, Result};
use crate::types::{DiskRecord, Platform};

/// One line per disk, in the form shown before the selection prompt.
pub fn disk_menu(platform: Platform, disks: &[DiskRecord]) -> Vec<String> {
    disks
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "  [{}] {} - {} - {}",
                i,
                platform.device_label(&d.identifier),
                d.size,
                d.model
            )
        })
        .collect()
}

/// Resolves the operator's answer to a device path.
///
/// The answer must be an index into `disks`. There is a single attempt;
/// anything else is an `InvalidSelection`.
pub fn resolve_selection(platform: Platform, disks: &[DiskRecord], input: &str) -> Result<String> {
    let invalid = || CoreError::InvalidSelection {
        input: input.trim().to_string(),
        count: disks.len(),
    };

    let index: usize = input.trim().parse().map_err(|_| invalid())?;
    let disk = disks.get(index).ok_or_else(invalid)?;

    Ok(platform.device_path(&disk.identifier))
}
