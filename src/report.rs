//! CSV report over the recovered deleted files.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use triage_core::{anomaly, Anomaly, DetectedType, RecoveredEntry, ReportRow};
use triage_io::{detect_file_type, sha256_file_or_empty, CommandRunner};

use crate::config::RecoveryConfig;
use crate::recovery::{recover_file, RecoveryOutcome};

/// Counts collected while writing the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows: usize,
    pub anomalous: usize,
    pub failed_recoveries: usize,
}

/// Recovers every entry in order and writes one CSV row per entry.
///
/// The report file is truncated first. Each entry is extracted, hashed and
/// classified before the next one starts.
pub fn generate_report<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &RecoveryConfig,
    offset: u64,
    entries: &[RecoveredEntry],
) -> Result<ReportSummary> {
    let file = File::create(&config.report_path).with_context(|| {
        format!("Failed to create report {}", config.report_path.display())
    })?;
    let mut writer = BufWriter::new(file);
    let mut summary = ReportSummary::default();

    write_record(&mut writer, &ReportRow::HEADER[..]).context("Failed to write report header")?;

    for entry in entries {
        let outcome = recover_file(runner, config, offset, entry)?;
        let row = build_row(entry, &outcome);

        write_record(&mut writer, &row.fields()[..]).context("Failed to write report row")?;

        summary.rows += 1;
        if row.has_anomalies() {
            summary.anomalous += 1;
        }
        if outcome.is_failure() {
            summary.failed_recoveries += 1;
        }
    }

    writer.flush().context("Failed to flush report")?;
    debug!(?summary, path = %config.report_path.display(), "report written");
    Ok(summary)
}

/// Describes one entry from the file the recoverer left on disk.
pub fn build_row(entry: &RecoveredEntry, outcome: &RecoveryOutcome) -> ReportRow {
    let inspected = outcome.path().and_then(|path| inspect_file(path).map(|i| (path, i)));

    let Some((path, inspection)) = inspected else {
        return ReportRow {
            meta_address: entry.meta_address.clone(),
            filename: entry.filename.clone(),
            recovered_path: None,
            size_bytes: 0,
            sha256_hex: String::new(),
            detected_mime: String::new(),
            extension: String::new(),
            anomalies: vec![Anomaly::RecoveryFailed],
        };
    };

    let mut anomalies = anomaly::evaluate(
        inspection.size,
        &inspection.detected,
        &inspection.extension,
        &inspection.sha256_hex,
    );
    if outcome.is_failure() {
        anomalies.push(Anomaly::RecoveryFailed);
    }

    ReportRow {
        meta_address: entry.meta_address.clone(),
        filename: entry.filename.clone(),
        recovered_path: Some(path.to_path_buf()),
        size_bytes: inspection.size,
        sha256_hex: inspection.sha256_hex,
        detected_mime: inspection.detected.mime,
        extension: inspection.extension,
        anomalies,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInspection {
    pub size: u64,
    pub sha256_hex: String,
    pub detected: DetectedType,
    /// Lowercased suffix including the dot; empty when there is none.
    pub extension: String,
}

/// Size, digest, sniffed type and extension of a recovered file.
///
/// Returns `None` when the file does not exist.
pub fn inspect_file(path: &Path) -> Option<FileInspection> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "recovered file missing");
            return None;
        }
    };

    let detected = detect_file_type(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "could not sniff file type");
        DetectedType::unknown()
    });

    Some(FileInspection {
        size,
        sha256_hex: sha256_file_or_empty(path),
        detected,
        extension: file_extension(path),
    })
}

pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Writes one CRLF-terminated CSV record.
pub fn write_record<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| csv_escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")
}

/// Quotes a field when it contains a comma, quote or line break.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
