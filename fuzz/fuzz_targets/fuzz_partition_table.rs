#![no_main]

use libfuzzer_sys::fuzz_target;
use triage_core::partition::{locate_partition_offset, DEFAULT_PARTITION_LABEL};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let offset = locate_partition_offset(&text, DEFAULT_PARTITION_LABEL);
    assert_eq!(offset % 512, 0);
});
