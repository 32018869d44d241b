//! CSV import: header row plus quoted-field records

use std::path::Path;

use tracing::{info, warn};

use crate::domain::model::Row;
use crate::error::{FramemarkError, FramemarkResult};

/// Split CSV text into records.
///
/// Quoted fields may contain commas, doubled quotes and line breaks. `\r\n`
/// and `\n` both end a record; blank lines are dropped.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut current)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut current));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(std::mem::take(&mut record));
                }
                record.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() || !record.is_empty() {
        record.push(current);
        records.push(record);
    }
    records
}

/// Parse CSV text into rows keyed by the header.
///
/// Records whose field count differs from the header are skipped.
pub fn parse_rows(text: &str) -> FramemarkResult<Vec<Row>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text).into_iter();

    let header = records.next().ok_or_else(|| FramemarkError::MalformedCsv {
        message: "CSV is empty".to_string(),
    })?;
    if header.iter().all(|column| column.trim().is_empty()) {
        return Err(FramemarkError::MalformedCsv {
            message: "CSV header row is empty".to_string(),
        });
    }
    let header: Vec<String> = header.into_iter().map(|column| column.trim().to_string()).collect();

    let mut rows = Vec::new();
    for (index, values) in records.enumerate() {
        if values.len() != header.len() {
            // 1-based, counting the header
            warn!(
                record = index + 2,
                expected = header.len(),
                found = values.len(),
                "Skipping malformed CSV record"
            );
            continue;
        }
        let row = header
            .iter()
            .zip(values)
            .fold(Row::new(), |row, (column, value)| row.with(column.as_str(), value));
        rows.push(row);
    }
    Ok(rows)
}

/// Read and parse a CSV file
pub fn read_rows(path: &Path) -> FramemarkResult<Vec<Row>> {
    if !path.exists() {
        return Err(FramemarkError::InputFileNotFound {
            path: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let rows = parse_rows(&text)?;
    info!(rows = rows.len(), path = %path.display(), "Read CSV file");
    Ok(rows)
}
