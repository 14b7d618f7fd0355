pub mod anomaly;
pub mod deleted;
mod error;
pub mod listing;
pub mod partition;
pub mod selection;
mod types;

pub use error::{CoreError, Result};
pub use types::{
    Anomaly, DetectedType, DiskRecord, DiskSize, Platform, RecoveredEntry, ReportRow, SECTOR_SIZE,
};
