#![no_main]

use libfuzzer_sys::fuzz_target;
use triage_core::listing::{parse_lsblk, parse_wmic};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = parse_lsblk(&text);
    let _ = parse_wmic(&text);
});
