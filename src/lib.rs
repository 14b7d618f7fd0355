pub mod config;
pub mod devices;
pub mod imaging;
pub mod logging;
pub mod recovery;
pub mod report;
pub mod status;
pub mod summary;

pub use config::{ImagingConfig, RecoveryConfig, ToolPaths};
pub use imaging::ImageOutcome;
pub use recovery::RecoveryOutcome;
pub use report::ReportSummary;
