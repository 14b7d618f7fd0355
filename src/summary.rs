use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use triage_core::partition::offset_to_sector;

use crate::config::RecoveryConfig;
use crate::report::ReportSummary;

/// JSON record of one recovery run, written next to the CSV report on
/// request.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub image: String,
    pub partition_offset: u64,
    pub start_sector: u64,
    pub entries: usize,
    pub anomalous_rows: usize,
    pub failed_recoveries: usize,
    pub report_path: String,
    pub recovery_dir: String,
    pub generated_at: String,
}

impl RunSummary {
    pub fn new(config: &RecoveryConfig, offset: u64, report: &ReportSummary) -> Self {
        Self {
            image: config.image.display().to_string(),
            partition_offset: offset,
            start_sector: offset_to_sector(offset),
            entries: report.rows,
            anomalous_rows: report.anomalous,
            failed_recoveries: report.failed_recoveries,
            report_path: config.report_path.display().to_string(),
            recovery_dir: config.output_dir.display().to_string(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        Ok(())
    }
}
