#![no_main]

use libfuzzer_sys::fuzz_target;
use triage_core::deleted::parse_deleted_entries;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for entry in parse_deleted_entries(&text) {
        assert!(!entry.meta_address.is_empty());
        assert!(!entry.filename.is_empty());
        assert!(!entry.output_file_name().contains('/'));
    }
});
