//! Partition lookup, deleted-entry listing and per-file extraction, all
//! delegated to The Sleuth Kit.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use triage_core::deleted::parse_deleted_entries;
use triage_core::partition::{locate_partition_offset, offset_to_sector};
use triage_core::RecoveredEntry;
use triage_io::{CommandRunner, ToolCommand};

use crate::config::{RecoveryConfig, ToolPaths};
use crate::status;

pub fn mmls_command(tools: &ToolPaths, image: &Path) -> ToolCommand {
    ToolCommand::new(&tools.mmls).arg(image)
}

pub fn fls_command(tools: &ToolPaths, image: &Path, offset: u64) -> ToolCommand {
    ToolCommand::new(&tools.fls)
        .args(["-rd", "-o"])
        .arg(offset_to_sector(offset).to_string())
        .arg(image)
}

pub fn icat_command(tools: &ToolPaths, image: &Path, offset: u64, meta_address: &str) -> ToolCommand {
    ToolCommand::new(&tools.icat)
        .arg("-o")
        .arg(offset_to_sector(offset).to_string())
        .arg(image)
        .arg(meta_address)
}

/// Byte offset of the configured partition, or 0 for an unpartitioned image.
pub fn locate_offset<R: CommandRunner + ?Sized>(runner: &R, config: &RecoveryConfig) -> u64 {
    let output = capture_or_empty(runner, &mmls_command(&config.tools, &config.image));
    let offset = locate_partition_offset(&output, &config.partition_label);
    debug!(offset, label = %config.partition_label, "partition offset");
    offset
}

pub fn scan_deleted<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &RecoveryConfig,
    offset: u64,
) -> Vec<RecoveredEntry> {
    let output = capture_or_empty(runner, &fls_command(&config.tools, &config.image, offset));
    parse_deleted_entries(&output)
}

/// A failed listing is reported and treated as producing no output.
fn capture_or_empty<R: CommandRunner + ?Sized>(runner: &R, command: &ToolCommand) -> String {
    match runner.capture(command) {
        Ok(output) if output.success() => output.stdout,
        Ok(output) => {
            warn!(%command, failure = %output.failure_message(), "tool failed");
            status::failure(format!("Error running command: {}", command));
            String::new()
        }
        Err(e) => {
            warn!(%command, error = %e, "tool failed to start");
            status::failure(format!("Error running command: {}", command));
            String::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Extracted(PathBuf),
    /// The extractor ran but failed; whatever it wrote is left at `path`.
    ToolFailed { path: PathBuf, message: String },
    /// No output file exists for the entry.
    NotWritten { reason: String },
}

impl RecoveryOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            RecoveryOutcome::Extracted(path) | RecoveryOutcome::ToolFailed { path, .. } => {
                Some(path)
            }
            RecoveryOutcome::NotWritten { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, RecoveryOutcome::Extracted(_))
    }
}

/// Extracts one entry into the recovery directory as `{meta}_{name}`.
///
/// Only a recovery directory that cannot be created is an error; extraction
/// failures are returned as outcomes.
pub fn recover_file<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &RecoveryConfig,
    offset: u64,
    entry: &RecoveredEntry,
) -> Result<RecoveryOutcome> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create recovery directory {}",
            config.output_dir.display()
        )
    })?;

    let path = config.output_dir.join(entry.output_file_name());
    let command = icat_command(&config.tools, &config.image, offset, &entry.meta_address);

    let outcome = match runner.run_to_file(&command, &path) {
        Ok(output) if output.success() => RecoveryOutcome::Extracted(path),
        Ok(output) => {
            let message = output.failure_message();
            warn!(%command, failure = %message, "extraction failed");
            RecoveryOutcome::ToolFailed { path, message }
        }
        Err(e) => {
            warn!(%command, error = %e, "extraction could not run");
            remove_empty(&path);
            RecoveryOutcome::NotWritten {
                reason: e.to_string(),
            }
        }
    };
    Ok(outcome)
}

fn remove_empty(path: &Path) {
    if fs::metadata(path).map(|m| m.len() == 0).unwrap_or(false) {
        let _ = fs::remove_file(path);
    }
}
