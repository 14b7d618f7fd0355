use crate::types::SECTOR_SIZE;

/// Partition label searched for when none is configured.
pub const DEFAULT_PARTITION_LABEL: &str = "Linux";

/// Finds the byte offset of the first partition whose description ends with
/// `label` in `mmls` output.
///
/// Returns 0 when no line matches, which callers treat as an unpartitioned
/// image. A matching line whose start column is not a sector number, or
/// whose sector overflows a byte offset, is skipped.
pub fn locate_partition_offset(mmls_output: &str, label: &str) -> u64 {
    mmls_output
        .lines()
        .filter(|line| line.trim().ends_with(label))
        .find_map(|line| {
            let sector: u64 = line.split_whitespace().nth(2)?.parse().ok()?;
            sector.checked_mul(SECTOR_SIZE)
        })
        .unwrap_or(0)
}

/// Converts a byte offset to the sector units the Sleuth Kit tools take.
///
/// Truncates; a partial trailing sector is ignored.
pub fn offset_to_sector(offset: u64) -> u64 {
    offset / SECTOR_SIZE
}
