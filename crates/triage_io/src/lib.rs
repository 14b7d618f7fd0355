//! I/O adapters for triage: external tool execution, file hashing and
//! content sniffing.

mod command;
pub mod hashing;
pub mod sniff;

pub use command::{CommandRunner, SystemRunner, ToolCommand, ToolOutput};
pub use hashing::{sha256_file, sha256_file_or_empty};
pub use sniff::{detect_bytes, detect_file_type};
