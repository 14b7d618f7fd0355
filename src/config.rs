//! Typed configuration for the imaging and recovery pipelines.

use std::path::{Path, PathBuf};

use triage_core::partition::DEFAULT_PARTITION_LABEL;
use triage_core::{CoreError, Result};

pub const DEFAULT_BLOCK_SIZE: &str = "4M";
pub const DEFAULT_RECOVERY_DIR: &str = "recovered_files";
pub const DEFAULT_REPORT_FILE: &str = "report.csv";

/// Programs used for the Sleuth Kit steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub mmls: PathBuf,
    pub fls: PathBuf,
    pub icat: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            mmls: PathBuf::from("mmls"),
            fls: PathBuf::from("fls"),
            icat: PathBuf::from("icat"),
        }
    }
}

impl ToolPaths {
    /// Resolves all three tools inside `dir` instead of through `PATH`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            mmls: dir.join("mmls"),
            fls: dir.join("fls"),
            icat: dir.join("icat"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagingConfig {
    pub destination: PathBuf,
    pub block_size: String,
}

impl ImagingConfig {
    pub fn new(destination: impl Into<PathBuf>, block_size: impl Into<String>) -> Result<Self> {
        let destination = destination.into();
        let block_size = block_size.into();

        if destination.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "destination path is empty".to_string(),
            ));
        }
        if block_size.is_empty() || block_size.contains(char::is_whitespace) {
            return Err(CoreError::InvalidConfig(format!(
                "invalid block size '{}'",
                block_size
            )));
        }

        Ok(Self {
            destination,
            block_size,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryConfig {
    pub image: PathBuf,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub partition_label: String,
    pub tools: ToolPaths,
    pub summary_path: Option<PathBuf>,
}

impl RecoveryConfig {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            output_dir: PathBuf::from(DEFAULT_RECOVERY_DIR),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            partition_label: DEFAULT_PARTITION_LABEL.to_string(),
            tools: ToolPaths::default(),
            summary_path: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_partition_label(mut self, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "partition label is empty".to_string(),
            ));
        }
        self.partition_label = label;
        Ok(self)
    }

    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_summary_path(mut self, path: Option<PathBuf>) -> Self {
        self.summary_path = path;
        self
    }
}
