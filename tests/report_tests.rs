mod common;

use std::fs;

use common::{argv, ScriptedRunner, MMLS_NO_LINUX};
use tempfile::TempDir;
use triage::recovery::{locate_offset, scan_deleted};
use triage::report::generate_report;
use triage::summary::RunSummary;
use triage::RecoveryConfig;
use triage_core::RecoveredEntry;

const HEADER: &str = "Meta,Filename,RecoveredPath,Size(Bytes),SHA256,DetectedType,Extension,Anomaly";
const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R', // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00,
    0x1F, 0x15, 0xC4, 0x89,
    0x00, 0x00, 0x00, 0x00, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82,
];

fn config_in(dir: &TempDir) -> RecoveryConfig {
    RecoveryConfig::new("disk.dd")
        .with_output_dir(dir.path().join("recovered_files"))
        .with_report_path(dir.path().join("report.csv"))
}

fn report_lines(config: &RecoveryConfig) -> Vec<String> {
    fs::read_to_string(&config.report_path)
        .unwrap()
        .split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn anomaly_column(line: &str) -> &str {
    line.rsplit(',').next().unwrap()
}

#[test]
fn test_zero_byte_file_is_corrupted() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new().with_file("7", b"");

    generate_report(&runner, &config, 0, &[RecoveredEntry::new("7", "empty.log")]).unwrap();

    let lines = report_lines(&config);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].contains(",0,"));
    assert!(anomaly_column(&lines[1]).contains("Corrupted (0B)"));
}

#[test]
fn test_text_file_flags_only_hash_placeholder() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new().with_file("12", b"meeting notes\n");

    generate_report(&runner, &config, 0, &[RecoveredEntry::new("12", "notes.txt")]).unwrap();

    let lines = report_lines(&config);
    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields[0], "12");
    assert_eq!(fields[1], "notes.txt");
    assert!(fields[2].ends_with("12_notes.txt"));
    assert_eq!(fields[3], "14");
    assert_eq!(fields[4].len(), 64);
    assert!(!fields[4].contains("txt"));
    assert_eq!(fields[5], "text/plain");
    assert_eq!(fields[6], ".txt");
    assert_eq!(fields[7], "Hash-Extension Mismatch");
}

#[test]
fn test_renamed_image_is_extension_mismatch() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new().with_file("3", PNG);

    generate_report(&runner, &config, 0, &[RecoveredEntry::new("3", "budget.doc")]).unwrap();

    let lines = report_lines(&config);
    assert!(lines[1].contains(",image/png,.doc,"));
    assert_eq!(
        anomaly_column(&lines[1]),
        "Extension Mismatch; Hash-Extension Mismatch"
    );
}

#[test]
fn test_extensionless_file_has_no_anomalies() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new().with_file("4", PNG);

    let summary =
        generate_report(&runner, &config, 0, &[RecoveredEntry::new("4", "picture")]).unwrap();

    assert_eq!(anomaly_column(&report_lines(&config)[1]), "None");
    assert_eq!(summary.anomalous, 0);
}

#[test]
fn test_failed_recoveries_are_flagged() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new()
        .with_failed_extraction("8", "Error reading inode")
        .with_unspawnable_extraction("9");
    let entries = [
        RecoveredEntry::new("8", "partial.bin"),
        RecoveredEntry::new("9", "missing.bin"),
    ];

    let summary = generate_report(&runner, &config, 0, &entries).unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.failed_recoveries, 2);

    let lines = report_lines(&config);
    assert!(anomaly_column(&lines[1]).starts_with("Corrupted (0B)"));
    assert!(anomaly_column(&lines[1]).ends_with("Recovery Failed"));
    assert_eq!(lines[2], "9,missing.bin,,0,,,,Recovery Failed");
}

#[test]
fn test_filename_with_comma_is_quoted() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new().with_file("5", b"a");

    generate_report(&runner, &config, 0, &[RecoveredEntry::new("5", "a,b")]).unwrap();

    let lines = report_lines(&config);
    assert!(lines[1].starts_with("5,\"a,b\","));
}

#[test]
fn test_report_is_overwritten_each_run() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new().with_file("1", b"x").with_file("2", b"y");

    let both = [RecoveredEntry::new("1", "a"), RecoveredEntry::new("2", "b")];
    generate_report(&runner, &config, 0, &both).unwrap();
    assert_eq!(report_lines(&config).len(), 3);

    generate_report(&runner, &config, 0, &both[..1]).unwrap();
    assert_eq!(report_lines(&config).len(), 2);
}

#[test]
fn test_unpartitioned_end_to_end_with_summary() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let runner = ScriptedRunner::new()
        .with_output("mmls", MMLS_NO_LINUX)
        .with_output("fls", "r/r * 21:\tnotes.txt\nr/r * 22:\tphoto.png\n")
        .with_file("21", b"hello\n")
        .with_file("22", PNG);

    let offset = locate_offset(&runner, &config);
    let entries = scan_deleted(&runner, &config, offset);
    let report = generate_report(&runner, &config, offset, &entries).unwrap();

    assert_eq!(report.rows, 2);
    for icat in runner.calls_to("icat") {
        assert_eq!(&argv(&icat)[..2], ["-o", "0"]);
    }
    assert!(config.output_dir.join("21_notes.txt").exists());
    assert!(config.output_dir.join("22_photo.png").exists());

    let summary_path = dir.path().join("summary.json");
    RunSummary::new(&config, offset, &report).write(&summary_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(json["start_sector"], 0);
    assert_eq!(json["entries"], 2);
    assert_eq!(json["image"], "disk.dd");
}
