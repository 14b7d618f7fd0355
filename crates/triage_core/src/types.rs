use std::fmt;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Sector size assumed by the partition and filesystem tools.
pub const SECTOR_SIZE: u64 = 512;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
}

impl Platform {
    /// Detects the platform of the running host.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            other => Err(CoreError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Full device path for a disk identifier, in the platform's native naming.
    pub fn device_path(&self, identifier: &str) -> String {
        match self {
            Platform::Linux => format!("/dev/{}", identifier),
            Platform::Windows => format!("\\\\.\\PhysicalDrive{}", identifier),
        }
    }

    /// Short device name used when listing disks to the operator.
    pub fn device_label(&self, identifier: &str) -> String {
        match self {
            Platform::Linux => format!("/dev/{}", identifier),
            Platform::Windows => format!("PhysicalDrive{}", identifier),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::Windows => write!(f, "Windows"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiskSize {
    /// Size column as printed by the listing tool (e.g. `465.8G`).
    Text(String),
    Gigabytes(f64),
}

impl DiskSize {
    pub fn from_bytes(bytes: u64) -> Self {
        DiskSize::Gigabytes(bytes as f64 / GIB)
    }
}

impl fmt::Display for DiskSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskSize::Text(text) => write!(f, "{}", text),
            DiskSize::Gigabytes(gb) => write!(f, "{:.2} GB", gb),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskRecord {
    pub identifier: String,
    pub model: String,
    pub size: DiskSize,
}

/// A deleted regular file reported by the filesystem listing tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredEntry {
    pub meta_address: String,
    pub filename: String,
}

impl RecoveredEntry {
    pub fn new(meta_address: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            meta_address: meta_address.into(),
            filename: filename.into(),
        }
    }

    /// Name of the local file the entry is recovered into.
    ///
    /// The metadata address prefix keeps entries that share a name apart.
    /// Path separators are flattened so the file always lands directly in
    /// the recovery directory.
    pub fn output_file_name(&self) -> String {
        format!(
            "{}_{}",
            flatten_separators(&self.meta_address),
            flatten_separators(&self.filename)
        )
    }
}

fn flatten_separators(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}

/// Result of content sniffing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedType {
    pub mime: String,
    /// Extension the sniffer associates with the content, without a dot.
    pub extension: Option<String>,
}

impl DetectedType {
    pub fn new(mime: impl Into<String>, extension: Option<&str>) -> Self {
        Self {
            mime: mime.into(),
            extension: extension.map(str::to_string),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    Corrupted,
    ExtensionMismatch,
    HashExtensionMismatch,
    RecoveryFailed,
}

impl Anomaly {
    pub fn label(&self) -> &'static str {
        match self {
            Anomaly::Corrupted => "Corrupted (0B)",
            Anomaly::ExtensionMismatch => "Extension Mismatch",
            Anomaly::HashExtensionMismatch => "Hash-Extension Mismatch",
            Anomaly::RecoveryFailed => "Recovery Failed",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub meta_address: String,
    pub filename: String,
    /// Empty when the recoverer produced no file.
    pub recovered_path: Option<PathBuf>,
    pub size_bytes: u64,
    pub sha256_hex: String,
    pub detected_mime: String,
    pub extension: String,
    pub anomalies: Vec<Anomaly>,
}

impl ReportRow {
    pub const HEADER: [&'static str; 8] = [
        "Meta",
        "Filename",
        "RecoveredPath",
        "Size(Bytes)",
        "SHA256",
        "DetectedType",
        "Extension",
        "Anomaly",
    ];

    pub fn anomaly_field(&self) -> String {
        if self.anomalies.is_empty() {
            "None".to_string()
        } else {
            self.anomalies
                .iter()
                .map(Anomaly::label)
                .collect::<Vec<_>>()
                .join("; ")
        }
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Column values in `HEADER` order.
    pub fn fields(&self) -> [String; 8] {
        [
            self.meta_address.clone(),
            self.filename.clone(),
            self.recovered_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            self.size_bytes.to_string(),
            self.sha256_hex.clone(),
            self.detected_mime.clone(),
            self.extension.clone(),
            self.anomaly_field(),
        ]
    }
}
