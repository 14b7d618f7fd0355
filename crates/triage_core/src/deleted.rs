//! Parser for `fls -rd` listings.

use crate::types::RecoveredEntry;

/// Type marker that starts a regular-file line in the listing.
const REGULAR_FILE_MARKER: char = 'r';
/// Flag `fls` prints between the type and the address of a deleted entry.
const DELETED_FLAG: &str = "*";

/// Extracts deleted regular files from `fls` output, in listing order.
///
/// Lines are split into at most three whitespace-separated fields: the type,
/// the metadata address and the name. Lines with fewer fields are dropped.
pub fn parse_deleted_entries(fls_output: &str) -> Vec<RecoveredEntry> {
    fls_output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<RecoveredEntry> {
    if !line.starts_with(REGULAR_FILE_MARKER) {
        return None;
    }

    let mut fields = split_fields(line, 3);
    if fields.len() < 3 {
        return None;
    }

    if fields[1] == DELETED_FLAG {
        let rest = split_fields(fields[2], 2);
        if rest.len() < 2 {
            return None;
        }
        fields = vec![fields[0], rest[0], rest[1]];
    }

    let meta = fields[1].trim_matches(':');
    let name = fields[2].trim();
    if meta.is_empty() || name.is_empty() {
        return None;
    }

    Some(RecoveredEntry::new(meta, name))
}

/// Splits on runs of whitespace into at most `max` fields; the last field
/// keeps the remainder of the line untouched.
fn split_fields(text: &str, max: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(max);
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        if fields.len() + 1 == max {
            fields.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                fields.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }
    fields
}
