//! Parsers for the platform disk-listing commands.
//!
//! Both parsers keep the row order of the command output and skip the
//! header line. Rows that do not carry enough columns are dropped.

use crate::types::{DiskRecord, DiskSize, Platform};

pub fn parse_disk_listing(platform: Platform, output: &str) -> Vec<DiskRecord> {
    match platform {
        Platform::Linux => parse_lsblk(output),
        Platform::Windows => parse_wmic(output),
    }
}

/// Parses `lsblk -d -o NAME,SIZE,MODEL` output.
///
/// Rows without a model column are dropped.
pub fn parse_lsblk(output: &str) -> Vec<DiskRecord> {
    output
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return None;
            }
            Some(DiskRecord {
                identifier: parts[0].to_string(),
                model: parts[2..].join(" "),
                size: DiskSize::Text(parts[1].to_string()),
            })
        })
        .collect()
}

/// Parses `wmic diskdrive get Index,Model,Size,MediaType` output.
///
/// `wmic` prints a fixed-width table and sorts the columns itself, so the
/// header line is used to locate each column. Rows with an empty index or a
/// non-numeric size (e.g. card readers with no media) are dropped, as are
/// rows where a value runs across a column boundary.
pub fn parse_wmic(output: &str) -> Vec<DiskRecord> {
    let mut lines = output
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns = header_columns(header);

    let (Some(index_col), Some(size_col)) = (
        columns.iter().position(|c| c.name.eq_ignore_ascii_case("Index")),
        columns.iter().position(|c| c.name.eq_ignore_ascii_case("Size")),
    ) else {
        return Vec::new();
    };
    let model_col = columns
        .iter()
        .position(|c| c.name.eq_ignore_ascii_case("Model"));

    lines
        .filter_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if crosses_column_boundary(&chars, &columns) {
                return None;
            }
            let field = |col: usize| column_text(&chars, &columns, col);

            let identifier = field(index_col);
            if identifier.is_empty() {
                return None;
            }
            let bytes: u64 = field(size_col).parse().ok()?;
            let model = model_col.map(field).unwrap_or_default();

            Some(DiskRecord {
                identifier,
                model,
                size: DiskSize::from_bytes(bytes),
            })
        })
        .collect()
}

struct Column<'a> {
    name: &'a str,
    start: usize,
}

fn header_columns(header: &str) -> Vec<Column<'_>> {
    let mut columns = Vec::new();
    let mut start = None;

    for (pos, (byte_idx, c)) in header.char_indices().enumerate() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some((pos, byte_idx)),
            (true, Some((col_start, byte_start))) => {
                columns.push(Column {
                    name: &header[byte_start..byte_idx],
                    start: col_start,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some((col_start, byte_start)) = start {
        columns.push(Column {
            name: &header[byte_start..],
            start: col_start,
        });
    }
    columns
}

/// True when a non-blank run straddles the start of any column after the
/// first, which means the row is not aligned with the header.
fn crosses_column_boundary(chars: &[char], columns: &[Column<'_>]) -> bool {
    columns.iter().skip(1).any(|column| {
        let start = column.start;
        start > 0
            && start < chars.len()
            && !chars[start - 1].is_whitespace()
            && !chars[start].is_whitespace()
    })
}

fn column_text(chars: &[char], columns: &[Column<'_>], col: usize) -> String {
    let start = columns[col].start.min(chars.len());
    let end = columns
        .get(col + 1)
        .map(|next| next.start)
        .unwrap_or(chars.len())
        .min(chars.len());

    chars[start..end].iter().collect::<String>().trim().to_string()
}
