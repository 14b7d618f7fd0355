use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unsupported system: {0}")]
    UnsupportedPlatform(String),

    #[error("No disks found.")]
    NoDevicesFound,

    #[error("Invalid selection '{input}': expected a disk number below {count}")]
    InvalidSelection { input: String, count: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
